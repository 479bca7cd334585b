//! Integration tests against the real Generative Language API.
//!
//! These call the live service and require a valid key in the
//! environment (`GOOGLE_API_KEY`).
//!
//! Run with: `cargo test -p dosar-genai --test live_api -- --ignored`

use dosar_genai::payload::{assemble_contents, build_request};
use dosar_genai::stream::{stream_generate, FragmentSource};
use dosar_genai::GenAiClient;

fn client() -> GenAiClient {
    let key = std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY must be set");
    GenAiClient::new(key).expect("client should build")
}

#[tokio::test]
#[ignore]
async fn short_grounded_question_streams_at_least_one_fragment() {
    let contents = assemble_contents(&[], &[], "Ce este ONRC? Răspunde într-o propoziție.");
    let request = build_request(contents, "Ești un asistent juridic concis.");

    let mut stream = stream_generate(&client(), dosar_genai::client::DEFAULT_MODEL, &request)
        .await
        .expect("stream should open");

    let mut full = String::new();
    while let Some(fragment) = stream.next_fragment().await {
        full.push_str(&fragment.expect("fragment should arrive"));
    }
    assert!(!full.trim().is_empty(), "expected a non-empty answer");
}

#[tokio::test]
#[ignore]
async fn small_upload_reaches_active() {
    let client = client();
    let bytes = b"%PDF-1.4 minimal".to_vec();

    let file = dosar_genai::files::upload(&client, bytes, "minimal.pdf", "application/pdf")
        .await
        .expect("upload should succeed");
    let file = dosar_genai::files::wait_until_active(&client, file)
        .await
        .expect("file should become active");

    assert!(!file.uri.is_empty());
}
