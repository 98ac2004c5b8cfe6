// Prompt template for résumé feedback.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{fill_template, CONSTRUCTIVE_INSTRUCTION, REVIEWER_PERSONA};
use crate::models::review::ReviewRequest;

/// Review prompt template.
/// Replace: {persona}, {job_role}, {resume_text}, {job_description_block}, {closing}
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"{persona} analyze this resume for a {job_role} position.

Resume Text:
{resume_text}

{job_description_block}Provide detailed feedback in the following structure:

1. OVERALL SCORE: Rate the resume 1-10 for the target role

2. STRENGTHS:
- List 3-4 key strengths

3. AREAS FOR IMPROVEMENT:
- Missing skills/keywords for {job_role}
- Formatting/structure issues
- Content clarity problems

4. SPECIFIC RECOMMENDATIONS:
- Actionable suggestions to improve the resume
- Keywords to add
- Sections to enhance

5. SECTION-BY-SECTION FEEDBACK:
- Professional Summary/Objective
- Work Experience
- Skills
- Education
- Other sections

{closing}"#;

/// Label for the optional job description block.
pub const JOB_DESCRIPTION_LABEL: &str = "Job Description:";

/// Renders the feedback prompt for a review request.
///
/// The job description block is rendered only when the request carries one.
pub fn build_review_prompt(request: &ReviewRequest) -> String {
    let job_description_block = request
        .job_description()
        .map(|jd| format!("{JOB_DESCRIPTION_LABEL} {jd}\n\n"))
        .unwrap_or_default();

    fill_template(
        REVIEW_PROMPT_TEMPLATE,
        &[
            ("persona", REVIEWER_PERSONA),
            ("job_role", request.job_role()),
            ("resume_text", request.resume_text()),
            ("job_description_block", job_description_block.as_str()),
            ("closing", CONSTRUCTIVE_INSTRUCTION),
        ],
    )
}
