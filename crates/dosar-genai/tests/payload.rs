use dosar_core::models::{Attachment, AttachmentData, ChatMessage, ChatRole};
use dosar_genai::payload::{
    assemble_contents, build_request, part_for, Part, ANALYZE_ATTACHMENTS_NOTE, MODEL_ROLE,
    USER_ROLE,
};

fn msg(role: ChatRole, content: &str) -> ChatMessage {
    ChatMessage {
        role,
        content: content.to_string(),
        timestamp: jiff::Timestamp::UNIX_EPOCH,
    }
}

fn text_of(part: &Part) -> &str {
    match part {
        Part::Text { text } => text,
        other => panic!("expected text part, got {other:?}"),
    }
}

/// History `[user:"A", assistant:"B"]` + input `"C"`, no attachments:
/// two history blocks (`user`, `model`) then one current block with a
/// single text part and no synthetic instruction.
#[test]
fn shape_without_attachments() {
    let history = [msg(ChatRole::User, "A"), msg(ChatRole::Assistant, "B")];
    let contents = assemble_contents(&history, &[], "C");

    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0].role, USER_ROLE);
    assert_eq!(text_of(&contents[0].parts[0]), "A");
    assert_eq!(contents[1].role, MODEL_ROLE);
    assert_eq!(text_of(&contents[1].parts[0]), "B");

    let current = &contents[2];
    assert_eq!(current.role, USER_ROLE);
    assert_eq!(current.parts.len(), 1);
    assert_eq!(text_of(&current.parts[0]), "C");
}

/// With one attachment the current block is: file part, synthetic
/// instruction part, then the user text.
#[test]
fn shape_with_remote_attachment() {
    let attachment = Attachment {
        display_name: "statut.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        data: AttachmentData::Remote {
            uri: "https://generativelanguage.googleapis.com/v1beta/files/abc".to_string(),
        },
    };
    let contents = assemble_contents(&[], std::slice::from_ref(&attachment), "Analizează");

    assert_eq!(contents.len(), 1);
    let parts = &contents[0].parts;
    assert_eq!(parts.len(), 3);

    match &parts[0] {
        Part::File { file_data } => {
            assert_eq!(file_data.mime_type, "application/pdf");
            assert!(file_data.file_uri.ends_with("files/abc"));
        }
        other => panic!("expected file part first, got {other:?}"),
    }
    assert_eq!(text_of(&parts[1]), ANALYZE_ATTACHMENTS_NOTE);
    assert_eq!(text_of(&parts[2]), "Analizează");
}

#[test]
fn inline_attachment_becomes_inline_data_part() {
    let attachment = Attachment {
        display_name: "poza.png".to_string(),
        mime_type: "image/png".to_string(),
        data: AttachmentData::Inline {
            bytes: vec![1, 2, 3],
        },
    };

    match part_for(&attachment) {
        Part::Inline { inline_data } => {
            assert_eq!(inline_data.mime_type, "image/png");
            assert_eq!(inline_data.data, "AQID");
        }
        other => panic!("expected inline part, got {other:?}"),
    }
}

/// History blocks carry cleaned text: stored raw output loses its
/// citation artifacts on the way into the payload.
#[test]
fn history_text_is_cleaned() {
    let history = [msg(
        ChatRole::Assistant,
        "Răspuns.<details>surse</details>",
    )];
    let contents = assemble_contents(&history, &[], "continuă");
    assert_eq!(text_of(&contents[0].parts[0]), "Răspuns.");
}

/// The wire shapes serialize under the provider's camelCase names.
#[test]
fn request_serializes_with_provider_field_names() {
    let contents = assemble_contents(&[], &[], "salut");
    let request = build_request(contents, "Ești avocat.");
    let json = serde_json::to_value(&request).unwrap();

    assert!(json.get("systemInstruction").is_some());
    assert!(json.get("generationConfig").is_some());
    assert_eq!(json["generationConfig"]["temperature"], 0.3);
    assert!(json["tools"][0].get("googleSearch").is_some());
    assert_eq!(json["contents"][0]["parts"][0]["text"], "salut");
}

#[test]
fn inline_and_file_parts_serialize_with_provider_field_names() {
    let inline = Attachment {
        display_name: "poza.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        data: AttachmentData::Inline { bytes: vec![0xFF] },
    };
    let remote = Attachment {
        display_name: "act.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        data: AttachmentData::Remote {
            uri: "files/xyz".to_string(),
        },
    };

    let json = serde_json::to_value(vec![part_for(&inline), part_for(&remote)]).unwrap();
    assert_eq!(json[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(json[1]["fileData"]["fileUri"], "files/xyz");
    assert_eq!(json[1]["fileData"]["mimeType"], "application/pdf");
}
