//! Plain-text download of a finished review.

use axum::http::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

pub const FEEDBACK_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// `resume_feedback_<role>.txt`, with whitespace in the role replaced by `_`.
///
/// Quotes, backslashes and control characters are dropped so the name can sit
/// inside a quoted `Content-Disposition` parameter.
pub fn feedback_filename(job_role: &str) -> String {
    let role: String = job_role
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            '"' | '\\' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    format!("resume_feedback_{role}.txt")
}

/// Feedback text served as a `text/plain` attachment.
pub struct FeedbackDownload {
    pub filename: String,
    pub feedback: String,
}

impl FeedbackDownload {
    pub fn new(job_role: &str, feedback: String) -> Self {
        Self {
            filename: feedback_filename(job_role),
            feedback,
        }
    }
}

impl IntoResponse for FeedbackDownload {
    fn into_response(self) -> Response {
        let disposition = HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            self.filename
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

        (
            [
                (CONTENT_TYPE, HeaderValue::from_static(FEEDBACK_CONTENT_TYPE)),
                (CONTENT_DISPOSITION, disposition),
            ],
            self.feedback,
        )
            .into_response()
    }
}
