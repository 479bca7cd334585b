//! DOCX generation from rendered consultation text.
//!
//! The transform is a fixed Markdown subset:
//! - `# ` / `## ` / `### ` → DOCX headings 1–3
//! - `- ` or `* ` → bullet list item (bullet character prefix)
//! - `**bold**` → bold run
//! - `---` → page break
//! - everything else → plain paragraph

use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use tracing::info;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Build a DOCX document from rendered consultation text.
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    for line in rendered.lines() {
        docx = docx.add_paragraph(paragraph_for(line.trim(), styles));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    info!(size = bytes.len(), "consultation DOCX generated");
    Ok(bytes)
}

fn paragraph_for(line: &str, styles: &DocumentStyles) -> Paragraph {
    if line.is_empty() {
        return Paragraph::new();
    }
    if line == "---" {
        return Paragraph::new().add_run(Run::new().add_break(BreakType::Page));
    }

    for (marker, style_id) in [
        ("### ", "Heading3"),
        ("## ", "Heading2"),
        ("# ", "Heading1"),
    ] {
        if let Some(text) = line.strip_prefix(marker) {
            return Paragraph::new()
                .style(style_id)
                .add_run(Run::new().add_text(text));
        }
    }

    let bullet_text = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "));

    let mut para = Paragraph::new().align(AlignmentType::Left);
    let body = match bullet_text {
        Some(text) => {
            para = para.add_run(
                Run::new()
                    .add_text("\u{2022} ")
                    .fonts(RunFonts::new().ascii(&styles.body_font)),
            );
            text
        }
        None => line,
    };
    for run in inline_runs(body, styles) {
        para = para.add_run(run);
    }
    para
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    // OOXML sizes are half-points.
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2)
}

/// Split a line into runs, bolding `**…**` segments. An unclosed `**`
/// is treated as literal text.
fn inline_runs(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let fonts = || RunFonts::new().ascii(&styles.body_font);
    let mut runs = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let (before, tail) = rest.split_at(open);
        let tail = &tail[2..];
        let Some(close) = tail.find("**") else {
            break;
        };

        if !before.is_empty() {
            runs.push(Run::new().add_text(before).fonts(fonts()));
        }
        runs.push(Run::new().add_text(&tail[..close]).bold().fonts(fonts()));
        rest = &tail[close + 2..];
    }

    if !rest.is_empty() {
        runs.push(Run::new().add_text(rest).fonts(fonts()));
    }
    runs
}
