//! Answer prompt template and rendering.
//!
//! The generation step uses one fixed instructional template embedding
//! the evidence context and the user's question. The template instructs
//! the model to decline when the context is irrelevant, which keeps
//! answers grounded in retrieved passages.

use handlebars::Handlebars;
use std::collections::HashMap;
use tafsir_core::{AppError, AppResult};

/// The fixed instructional template for grounded answering.
const ANSWER_TEMPLATE: &str = "\
**System Instructions**
Provide an explanation grounded in the following passage excerpts:

{{context}}

**Question**:
{{question}}

If the excerpts are not relevant to the question, answer that you \
cannot answer it.
";

/// Render the answer prompt from evidence context and question.
pub fn build_answer_prompt(context: &str, question: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context.to_string());
    variables.insert("question".to_string(), question.to_string());

    render_template(ANSWER_TEMPLATE, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, no HTML escaping
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Other(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Other(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
