use dosar_speech::{chunk_text, prepare_speech_text, SPEECH_CHAR_LIMIT};

#[test]
fn emphasis_asterisks_removed() {
    assert_eq!(
        prepare_speech_text("Taxa este **122 lei**."),
        "Taxa este 122 lei."
    );
}

#[test]
fn truncation_respects_char_boundaries() {
    // Diacritics are multi-byte; the limit counts characters, not bytes.
    let long = "ă".repeat(SPEECH_CHAR_LIMIT * 2);
    let prepared = prepare_speech_text(&long);
    assert_eq!(prepared.chars().count(), SPEECH_CHAR_LIMIT);
}

#[test]
fn short_text_is_untouched() {
    assert_eq!(prepare_speech_text("Bună ziua"), "Bună ziua");
}

#[test]
fn empty_text_yields_no_chunks() {
    assert!(chunk_text("", 200).is_empty());
    assert!(chunk_text("   \n  ", 200).is_empty());
}

#[test]
fn chunks_respect_limit_and_preserve_words() {
    let text = "unu doi trei patru cinci șase șapte opt";
    let chunks = chunk_text(text, 12);

    for chunk in &chunks {
        assert!(chunk.chars().count() <= 12, "chunk too long: {chunk:?}");
    }
    let rejoined = chunks.join(" ");
    assert_eq!(rejoined, text);
}

#[test]
fn overlong_word_is_hard_split() {
    let word = "x".repeat(25);
    let chunks = chunk_text(&word, 10);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].chars().count(), 10);
    assert_eq!(chunks[2].chars().count(), 5);
    assert_eq!(chunks.concat(), word);
}

#[test]
fn single_chunk_below_limit() {
    assert_eq!(chunk_text("scurt", 200), vec!["scurt".to_string()]);
}
