// Shared prompt fragments and the template renderer.
// Each feature that calls the LLM keeps its own prompts.rs alongside it.

/// Persona line every review prompt opens with.
pub const REVIEWER_PERSONA: &str = "As an expert HR professional and career coach,";

/// Closing instruction appended to feedback prompts.
pub const CONSTRUCTIVE_INSTRUCTION: &str =
    "Be specific, constructive, and actionable in your feedback.";

/// Substitutes `{name}` placeholders in a single pass.
///
/// Values are inserted verbatim and never rescanned, so user text containing
/// braces cannot trigger a second substitution. Unknown placeholders are left
/// as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replaced = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
