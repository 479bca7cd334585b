use dosar_core::error::CoreError;
use dosar_core::models::attachment::{mime_for_extension, Attachment, AttachmentData, CaseFile};

fn remote(name: &str) -> Attachment {
    Attachment {
        display_name: name.to_string(),
        mime_type: "application/pdf".to_string(),
        data: AttachmentData::Remote {
            uri: format!("https://files.example/{name}"),
        },
    }
}

#[test]
fn register_and_list() {
    let mut case = CaseFile::new();
    case.register(remote("cerere.pdf")).unwrap();
    case.register(remote("statut.pdf")).unwrap();

    assert_eq!(case.len(), 2);
    assert!(case.contains("cerere.pdf"));
    assert!(!case.contains("altceva.pdf"));
}

#[test]
fn duplicate_display_name_rejected_and_state_unchanged() {
    let mut case = CaseFile::new();
    case.register(remote("cerere.pdf")).unwrap();

    let err = case.register(remote("cerere.pdf")).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateAttachment(name) if name == "cerere.pdf"));
    assert_eq!(case.len(), 1);
}

#[test]
fn same_name_accepted_after_clear() {
    let mut case = CaseFile::new();
    case.register(remote("cerere.pdf")).unwrap();
    case.clear();
    assert!(case.is_empty());

    case.register(remote("cerere.pdf")).unwrap();
    assert_eq!(case.len(), 1);
}

#[test]
fn clear_is_idempotent() {
    let mut case = CaseFile::new();
    case.register(remote("cerere.pdf")).unwrap();
    case.clear();
    case.clear();
    assert!(case.is_empty());
}

#[test]
fn remove_reports_existence() {
    let mut case = CaseFile::new();
    case.register(remote("cerere.pdf")).unwrap();

    assert!(case.remove("cerere.pdf"));
    assert!(!case.remove("cerere.pdf"));
    assert!(case.is_empty());
}

#[test]
fn mime_table_covers_accepted_types() {
    assert_eq!(mime_for_extension("pdf"), Some("application/pdf"));
    assert_eq!(mime_for_extension("PNG"), Some("image/png"));
    assert_eq!(mime_for_extension("jpg"), Some("image/jpeg"));
    assert_eq!(mime_for_extension("jpeg"), Some("image/jpeg"));
    assert_eq!(mime_for_extension("docx"), None);
}
