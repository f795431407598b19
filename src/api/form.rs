//! Artwork submission form.
//!
//! Serves the single-page submission form and handles its POST. The page is
//! re-rendered on every attempt with the entered values preserved and exactly
//! one status message. Submission failures never escape as error responses;
//! every path ends in a rendered page so the form stays usable.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::{Datelike, Utc};
use tracing::{error, warn};

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{ArtworkSubmission, ProductionDate, MIN_PRODUCTION_YEAR,
    REQUIRED_FIELDS_MESSAGE};
use crate::services::submission::{parse_submission, submit_artwork, SubmissionReceipt};
use crate::services::Storage;

/// Shown when the row was stored.
pub const SUCCESS_MESSAGE: &str =
    "Your submission is complete! It will appear in the gallery once approved. Thank you.";

/// Shown when the insert executed but the database returned no row.
pub const EMPTY_INSERT_MESSAGE: &str =
    "Submission failed: the insert executed but returned no data.";

/// Status shown after a submission attempt. At most one per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Stored and queued for moderation
    Success,
    /// One of the four required fields was missing
    MissingFields,
    /// Insert ran but returned no row
    EmptyInsert,
    /// Upload or insert failed with the contained error text
    Failure(String),
}

impl StatusMessage {
    fn text(&self) -> String {
        match self {
            Self::Success => SUCCESS_MESSAGE.to_string(),
            Self::MissingFields => REQUIRED_FIELDS_MESSAGE.to_string(),
            Self::EmptyInsert => EMPTY_INSERT_MESSAGE.to_string(),
            Self::Failure(err) => format!("An error occurred: {}", err),
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "status success",
            _ => "status error",
        }
    }
}

/// Entered values carried back into the re-rendered form.
///
/// The file picker cannot be pre-populated and resets on every render.
struct FormValues {
    artist_name: String,
    title: String,
    description: String,
    additional_message: String,
    date: ProductionDate,
}

impl FormValues {
    /// Blank form with the date selects defaulting to today.
    fn empty() -> Self {
        FormValues {
            artist_name: String::new(),
            title: String::new(),
            description: String::new(),
            additional_message: String::new(),
            date: ProductionDate::today(),
        }
    }

    fn from_submission(submission: &ArtworkSubmission) -> Self {
        FormValues {
            artist_name: submission.artist_name.clone(),
            title: submission.title.clone(),
            description: submission.description.clone(),
            additional_message: submission.additional_message.clone(),
            date: submission.production_date,
        }
    }
}

/// Serve the submission form.
pub async fn show_form() -> HttpResponse {
    html_response(render_page(&FormValues::empty(), None, None))
}

/// Handle a form submission and re-render the page with its outcome.
pub async fn submit_form(
    mut payload: Multipart,
    config: web::Data<Config>,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
) -> HttpResponse {
    let submission = match parse_submission(&mut payload, config.max_upload_size).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Malformed submission: {}", e);
            return html_response(render_page(
                &FormValues::empty(),
                Some(&StatusMessage::Failure(e.to_string())),
                None,
            ));
        }
    };

    let values = FormValues::from_submission(&submission);

    // Presence check for the four required fields, before any remote call
    if submission.validate().is_err() {
        return html_response(render_page(
            &values,
            Some(&StatusMessage::MissingFields),
            None,
        ));
    }

    match submit_artwork(&storage, &pool, submission, config.debug_echo).await {
        Ok(receipt) => html_response(render_page(
            &values,
            Some(&StatusMessage::Success),
            Some(&receipt),
        )),
        Err(AppError::EmptyInsert) => {
            warn!("Artwork insert returned no data");
            html_response(render_page(
                &values,
                Some(&StatusMessage::EmptyInsert),
                None,
            ))
        }
        Err(e) => {
            error!("Artwork submission failed: {}", e);
            html_response(render_page(
                &values,
                Some(&StatusMessage::Failure(e.to_string())),
                None,
            ))
        }
    }
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Render the full page: form, optional status message, optional debug echo.
fn render_page(
    values: &FormValues,
    status: Option<&StatusMessage>,
    receipt: Option<&SubmissionReceipt>,
) -> String {
    let mut page = String::with_capacity(4096);

    page.push_str(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Art Gallery Submission</title>\n\
         <style>\n\
         body { font-family: sans-serif; margin: 2rem auto; max-width: 40rem; padding: 0 1rem; }\n\
         label { display: block; margin-top: 1rem; font-weight: bold; }\n\
         input[type=text], textarea, select { width: 100%; padding: 0.4rem; margin-top: 0.25rem; box-sizing: border-box; }\n\
         fieldset { margin-top: 1rem; }\n\
         fieldset select { width: auto; }\n\
         button { margin-top: 1.5rem; padding: 0.5rem 2rem; }\n\
         .status { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }\n\
         .status.success { background: #e6f4ea; border: 1px solid #34a853; }\n\
         .status.error { background: #fce8e6; border: 1px solid #ea4335; }\n\
         details { margin-top: 2rem; }\n\
         pre { background: #f5f5f5; padding: 0.75rem; overflow-x: auto; }\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <main>\n\
         <h1>Art Gallery Submission</h1>\n\
         <p>Please fill in the fields below to submit your artwork.</p>\n",
    );

    if let Some(status) = status {
        page.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            status.css_class(),
            escape_html(&status.text())
        ));
    }

    page.push_str("<form action=\"/submit\" method=\"post\" enctype=\"multipart/form-data\">\n");

    page.push_str(&format!(
        "<label for=\"artist_name\">Artist name (required)</label>\n\
         <input type=\"text\" id=\"artist_name\" name=\"artist_name\" value=\"{}\">\n",
        escape_html(&values.artist_name)
    ));

    page.push_str(&format!(
        "<label for=\"title\">Title (required)</label>\n\
         <input type=\"text\" id=\"title\" name=\"title\" value=\"{}\">\n",
        escape_html(&values.title)
    ));

    page.push_str(&format!(
        "<label for=\"description\">Description (required)</label>\n\
         <textarea id=\"description\" name=\"description\" rows=\"4\">{}</textarea>\n",
        escape_html(&values.description)
    ));

    page.push_str(&format!(
        "<label for=\"additional_message\">Anything else you would like to share (optional)</label>\n\
         <textarea id=\"additional_message\" name=\"additional_message\" rows=\"4\">{}</textarea>\n",
        escape_html(&values.additional_message)
    ));

    // Year select runs from the earliest accepted year to the current one
    let current_year = Utc::now().year();
    page.push_str("<fieldset>\n<legend>Production date</legend>\n");
    page.push_str(&format!(
        "<label for=\"year\">Year</label>\n<select id=\"year\" name=\"year\">{}</select>\n",
        select_options(MIN_PRODUCTION_YEAR..=current_year, values.date.year)
    ));
    page.push_str(&format!(
        "<label for=\"month\">Month</label>\n<select id=\"month\" name=\"month\">{}</select>\n",
        select_options(1..=12, values.date.month as i32)
    ));
    page.push_str(&format!(
        "<label for=\"day\">Day</label>\n<select id=\"day\" name=\"day\">{}</select>\n",
        select_options(1..=31, values.date.day as i32)
    ));
    page.push_str("</fieldset>\n");

    page.push_str(
        "<label for=\"image\">Artwork image (required)</label>\n\
         <input type=\"file\" id=\"image\" name=\"image\" accept=\".jpg,.jpeg,.png\">\n",
    );

    page.push_str("<button type=\"submit\">Submit</button>\n</form>\n");

    if let Some(receipt) = receipt {
        page.push_str(&render_debug_echo(receipt));
    }

    page.push_str("</main>\n</body>\n</html>\n");

    page
}

/// Render the raw remote responses when debug echo is enabled.
fn render_debug_echo(receipt: &SubmissionReceipt) -> String {
    let mut echoes = String::new();

    if let Some(ref upload) = receipt.upload_echo {
        echoes.push_str(&format!(
            "<h2>Storage upload response</h2>\n<pre>{}</pre>\n",
            escape_html(upload)
        ));
    }
    if let Some(ref record) = receipt.record_echo {
        echoes.push_str(&format!(
            "<h2>Record payload</h2>\n<pre>{}</pre>\n",
            escape_html(record)
        ));
    }
    if let Some(ref insert) = receipt.insert_echo {
        echoes.push_str(&format!(
            "<h2>Insert response</h2>\n<pre>{}</pre>\n",
            escape_html(insert)
        ));
    }

    if echoes.is_empty() {
        return String::new();
    }

    format!(
        "<details>\n<summary>Debug output</summary>\n{}</details>\n",
        echoes
    )
}

/// Render `<option>` elements, marking the selected value.
fn select_options(range: std::ops::RangeInclusive<i32>, selected: i32) -> String {
    let mut out = String::new();
    for value in range {
        if value == selected {
            out.push_str(&format!(
                "<option value=\"{}\" selected>{}</option>",
                value, value
            ));
        } else {
            out.push_str(&format!("<option value=\"{}\">{}</option>", value, value));
        }
    }
    out
}

/// Minimal HTML escaping for text interpolated into the page.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Configure form routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(show_form)))
        .service(web::resource("/submit").route(web::post().to(submit_form)));
}
