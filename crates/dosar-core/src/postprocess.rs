//! Response cleanup for model output.
//!
//! Grounded answers come back with provider artifacts — collapsible
//! citation blocks, stray HTML line breaks — that must not reach the
//! display, the exported document, or speech synthesis. Raw text is
//! persisted as-is; every read path goes through [`clean`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Citation blocks the grounding tool appends, `<details>…</details>`.
static CITATION_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<details\b.*?</details>").expect("valid pattern"));

/// `<br>`, `<br/>`, `<br />` in any casing.
static LINE_BREAK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid pattern"));

/// Any remaining markup tag.
static MARKUP_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid pattern"));

/// Three or more consecutive newlines.
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));

/// Strip provider artifacts from raw model output.
///
/// Deterministic, total, and idempotent: `clean(clean(x)) == clean(x)`.
/// Empty or malformed input yields the empty string after best-effort
/// cleanup.
///
/// 1. Citation `<details>` blocks are removed entirely.
/// 2. `<br>` variants become plain newlines.
/// 3. Remaining markup tags are stripped.
/// 4. Runs of three or more newlines collapse to exactly two.
pub fn clean(raw: &str) -> String {
    let text = CITATION_BLOCKS.replace_all(raw, "");
    let text = LINE_BREAK_TAGS.replace_all(&text, "\n");
    let text = MARKUP_TAGS.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
