use dosar_export::docx::generate_docx;
use dosar_export::render::{render_consultation, ConsultationMeta};
use dosar_export::styles::DocumentStyles;

fn meta() -> ConsultationMeta {
    ConsultationMeta {
        title: "Consultație ONRC".to_string(),
        case_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string(),
        date: "2026-08-07".to_string(),
    }
}

#[test]
fn header_contains_identification_block() {
    let rendered = render_consultation(&meta(), "Corpul răspunsului.").unwrap();

    assert!(rendered.starts_with("# Consultație ONRC"));
    assert!(rendered.contains("**Dosar:** 3fa85f64-5717-4562-b3fc-2c963f66afa6"));
    assert!(rendered.contains("**Data:** 2026-08-07"));
    assert!(rendered.contains("Corpul răspunsului."));
}

#[test]
fn body_is_not_escaped() {
    let rendered = render_consultation(&meta(), "Taxă & tarif < 200 lei").unwrap();
    assert!(rendered.contains("Taxă & tarif < 200 lei"));
}

#[test]
fn generated_docx_is_a_zip_container() {
    let rendered = render_consultation(
        &meta(),
        "## Taxe\n\n- înregistrare: 122 lei\n- mențiuni: 45 lei\n\nDetalii **importante** aici.\n\n---\n\nAnexă.",
    )
    .unwrap();

    let bytes = generate_docx(&rendered, &DocumentStyles::default()).unwrap();
    // DOCX is a ZIP archive; check the local-file-header magic.
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn empty_body_still_produces_a_document() {
    let rendered = render_consultation(&meta(), "").unwrap();
    let bytes = generate_docx(&rendered, &DocumentStyles::default()).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}
