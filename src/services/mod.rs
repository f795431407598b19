//! Business logic services.

pub mod storage;
pub mod submission;

pub use storage::Storage;
pub use submission::{parse_submission, submit_artwork, SubmissionReceipt};
