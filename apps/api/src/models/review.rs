use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReviewRequest {
    #[error("Please provide your resume text")]
    MissingResumeText,

    #[error("Please specify the target job role")]
    MissingJobRole,
}

/// A résumé ready to be reviewed for one target role.
///
/// Résumé text and role are always non-blank. A blank job description is
/// stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    resume_text: String,
    job_role: String,
    job_description: Option<String>,
}

impl ReviewRequest {
    pub fn new(
        resume_text: &str,
        job_role: &str,
        job_description: Option<&str>,
    ) -> Result<Self, InvalidReviewRequest> {
        let resume_text = resume_text.trim();
        if resume_text.is_empty() {
            return Err(InvalidReviewRequest::MissingResumeText);
        }

        let job_role = job_role.trim();
        if job_role.is_empty() {
            return Err(InvalidReviewRequest::MissingJobRole);
        }

        let job_description = job_description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        Ok(Self {
            resume_text: resume_text.to_string(),
            job_role: job_role.to_string(),
            job_description,
        })
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_role(&self) -> &str {
        &self.job_role
    }

    pub fn job_description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }
}

/// Outcome of one review. Serializes as
/// `{"success": true, "feedback": ..}` or `{"success": false, "error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewResult {
    Success { feedback: String },
    Failure { error: String },
}

impl ReviewResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ReviewResult::Success { .. })
    }
}

impl Serialize for ReviewResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReviewResult", 2)?;
        match self {
            ReviewResult::Success { feedback } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("feedback", feedback)?;
            }
            ReviewResult::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
