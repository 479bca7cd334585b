//! Consultation header rendering.
//!
//! The exported document opens with a small identification block — case
//! id, date, title — followed by the cleaned answer text. The header is
//! a Tera template so deployments can restyle it without touching the
//! DOCX transform.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;

/// Identification block for one exported consultation.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationMeta {
    pub title: String,
    /// Case (session) identifier, displayed verbatim.
    pub case_id: String,
    /// Human-readable date of the export.
    pub date: String,
}

const TEMPLATE_NAME: &str = "consultation.md";

const CONSULTATION_TEMPLATE: &str = "\
# {{ title }}

**Dosar:** {{ case_id }}
**Data:** {{ date }}

{{ body }}
";

/// Render the export source text: header block plus answer body, in the
/// Markdown subset the DOCX transform understands.
pub fn render_consultation(meta: &ConsultationMeta, body: &str) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, CONSULTATION_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let mut context = Context::from_value(serde_json::to_value(meta)?)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    context.insert("body", body);

    let rendered = tera.render(TEMPLATE_NAME, &context)?;
    Ok(rendered)
}
