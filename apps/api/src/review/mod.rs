// Résumé review: prompt building, dispatch to the completion service,
// and the HTTP handlers around them.
// All completion calls go through llm_client — no direct HTTP calls here.

pub mod download;
pub mod handlers;
pub mod prompts;
pub mod reviewer;
pub mod tips;
