//! Review dispatch — sends a rendered prompt to the completion service and
//! maps whatever comes back into a `ReviewResult`.
//!
//! Flow: build_review_prompt → CompletionService::complete → ReviewResult.
//! One call per review. Failures are returned as values, never retried.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::{ApiKey, ChatRequest, CompletionService};
use crate::models::review::{ReviewRequest, ReviewResult};
use crate::review::prompts::build_review_prompt;

pub const NO_FEEDBACK_ERROR: &str = "No feedback returned from OpenAI.";
pub const API_KEY_HINT: &str = " Please check your OpenAI API key.";

/// Dispatches review requests with one explicit credential.
#[derive(Clone)]
pub struct Reviewer {
    service: Arc<dyn CompletionService>,
    api_key: ApiKey,
}

impl Reviewer {
    pub fn new(service: Arc<dyn CompletionService>, api_key: ApiKey) -> Self {
        Self { service, api_key }
    }

    pub async fn analyze(&self, request: &ReviewRequest) -> ReviewResult {
        let prompt = build_review_prompt(request);
        let chat_request = ChatRequest::single_turn(&prompt);

        match self.service.complete(&self.api_key, &chat_request).await {
            Ok(response) => match response.text() {
                Some(feedback) => {
                    info!(
                        "Review completed for role '{}' ({} characters of feedback)",
                        request.job_role(),
                        feedback.chars().count()
                    );
                    ReviewResult::Success {
                        feedback: feedback.to_string(),
                    }
                }
                None => {
                    warn!(
                        "Completion response had no usable content ({} choices)",
                        response.choices.len()
                    );
                    ReviewResult::Failure {
                        error: NO_FEEDBACK_ERROR.to_string(),
                    }
                }
            },
            Err(e) => {
                warn!("Review dispatch failed: {e}");
                let mut error = e.to_string();
                if e.is_auth_failure() {
                    error.push_str(API_KEY_HINT);
                }
                ReviewResult::Failure { error }
            }
        }
    }
}
