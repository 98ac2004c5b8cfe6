//! Axum route handlers for the Review API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractedText};
use crate::llm_client::ApiKey;
use crate::models::review::{InvalidReviewRequest, ReviewRequest, ReviewResult};
use crate::review::download::FeedbackDownload;
use crate::review::reviewer::Reviewer;
use crate::review::tips::REVIEW_TIPS;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReviewTextRequest {
    pub resume_text: String,
    pub job_role: String,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Overrides the configured default credential.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub job_role: String,
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tips: Vec<&'static str>,
}

/// Fields of a multipart review upload.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Bytes>,
    job_role: Option<String>,
    job_description: Option<String>,
    api_key: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract
///
/// Extracts résumé text from an uploaded PDF so the client can preview it.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractedText>, AppError> {
    let form = read_upload_form(multipart).await?;
    let payload = form.file.ok_or_else(missing_file)?;

    let extracted = extract_text(payload).await?;
    Ok(Json(extracted))
}

/// POST /api/v1/reviews
///
/// Reviews pasted résumé text.
pub async fn handle_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewTextRequest>,
) -> Result<(StatusCode, Json<ReviewResult>), AppError> {
    let api_key = resolve_api_key(&state, request.api_key.as_deref())?;
    let review = ReviewRequest::new(
        &request.resume_text,
        &request.job_role,
        request.job_description.as_deref(),
    )?;

    Ok(run_review(&state, api_key, &review).await)
}

/// POST /api/v1/reviews/upload
///
/// Extracts text from an uploaded PDF and reviews it in one step.
pub async fn handle_review_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ReviewResult>), AppError> {
    let form = read_upload_form(multipart).await?;
    let api_key = resolve_api_key(&state, form.api_key.as_deref())?;

    let job_role = form.job_role.unwrap_or_default();
    if job_role.trim().is_empty() {
        return Err(InvalidReviewRequest::MissingJobRole.into());
    }

    let payload = form.file.ok_or_else(missing_file)?;
    let extracted = extract_text(payload).await?;

    let review = ReviewRequest::new(
        &extracted.text,
        &job_role,
        form.job_description.as_deref(),
    )?;

    Ok(run_review(&state, api_key, &review).await)
}

/// POST /api/v1/reviews/download
///
/// Returns feedback as a plain-text attachment named after the role.
pub async fn handle_download(
    Json(request): Json<DownloadRequest>,
) -> Result<FeedbackDownload, AppError> {
    if request.feedback.trim().is_empty() {
        return Err(AppError::Validation(
            "feedback cannot be empty".to_string(),
        ));
    }
    if request.job_role.trim().is_empty() {
        return Err(InvalidReviewRequest::MissingJobRole.into());
    }

    Ok(FeedbackDownload::new(&request.job_role, request.feedback))
}

/// GET /api/v1/tips
pub async fn handle_tips() -> Json<TipsResponse> {
    Json(TipsResponse {
        tips: REVIEW_TIPS.to_vec(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Picks the request's key, falling back to the configured default.
fn resolve_api_key(state: &AppState, supplied: Option<&str>) -> Result<ApiKey, AppError> {
    supplied
        .filter(|k| !k.trim().is_empty())
        .map(ApiKey::new)
        .or_else(|| state.config.openai_api_key.clone())
        .ok_or_else(|| {
            AppError::Validation(
                "Please enter your OpenAI API key to use the resume reviewer".to_string(),
            )
        })
}

/// Dispatches one review. A failed review is a 502 carrying the same body shape.
async fn run_review(
    state: &AppState,
    api_key: ApiKey,
    review: &ReviewRequest,
) -> (StatusCode, Json<ReviewResult>) {
    let span = info_span!("review", review_id = %Uuid::new_v4());
    let reviewer = Reviewer::new(state.completion.clone(), api_key);

    let result = async {
        info!("Analyzing resume for role '{}'", review.job_role());
        reviewer.analyze(review).await
    }
    .instrument(span)
    .await;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(result))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if !is_pdf(field.content_type(), field.file_name()) {
                    return Err(AppError::UnsupportedMediaType(
                        "Please upload your resume as a PDF file".to_string(),
                    ));
                }
                form.file = Some(field.bytes().await.map_err(bad_multipart)?);
            }
            "job_role" => form.job_role = Some(field.text().await.map_err(bad_multipart)?),
            "job_description" => {
                form.job_description = Some(field.text().await.map_err(bad_multipart)?)
            }
            "api_key" => form.api_key = Some(field.text().await.map_err(bad_multipart)?),
            other => tracing::debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    Ok(form)
}

/// Accepts `application/pdf` (any case, parameters ignored), or a `.pdf`
/// file name when the content type is missing or generic.
fn is_pdf(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let named_pdf = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);

    let essence = content_type.map(|ct| {
        ct.split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    });

    match essence.as_deref() {
        Some("application/pdf") => true,
        Some("application/octet-stream") | Some("") | None => named_pdf,
        Some(_) => false,
    }
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid upload: {e}"))
}

fn missing_file() -> AppError {
    AppError::Validation("Please upload your resume as a PDF file".to_string())
}
