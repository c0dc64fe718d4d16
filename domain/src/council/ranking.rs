//! Ranking response parsing
//!
//! Stage-2 models are instructed to end their evaluation with a
//! `FINAL RANKING:` marker followed by a numbered list of response labels.
//! Models follow that convention imperfectly, so extraction is a best-effort
//! recovery with two modes:
//!
//! 1. **Strict**: lines of the form `<digits>. Response <Letter>` after the
//!    marker, tolerating leading whitespace.
//! 2. **Lenient**: every `Response <Letter>` occurrence in order of
//!    appearance, scoped to the post-marker section when the marker exists
//!    and to the whole text otherwise.
//!
//! Output is not deduplicated. A model repeating a label produces repeated
//! entries, which skews its average rank downstream; that is accepted input,
//! not something to suppress here.

/// Literal marker the ranking prompt asks models to emit
pub const RANKING_MARKER: &str = "FINAL RANKING:";

const LABEL_PREFIX: &str = "Response ";

/// Extract the ordered label sequence from a model's ranking response
pub fn parse_ranking(text: &str) -> Vec<String> {
    if let Some(pos) = text.find(RANKING_MARKER) {
        let section = &text[pos + RANKING_MARKER.len()..];
        let numbered = parse_numbered_list(section);
        if !numbered.is_empty() {
            return numbered;
        }
        return scan_labels(section);
    }
    scan_labels(text)
}

/// Strict mode: collect labels from `<digits>. Response <Letter>` lines
fn parse_numbered_list(section: &str) -> Vec<String> {
    let mut labels = Vec::new();
    for line in section.lines() {
        let line = line.trim_start();
        let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            continue;
        }
        let Some(rest) = line[digits..].strip_prefix('.') else {
            continue;
        };
        if let Some(label) = leading_label(rest.trim_start()) {
            labels.push(label);
        }
    }
    labels
}

/// Lenient mode: collect every label occurrence in order of appearance
fn scan_labels(text: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(LABEL_PREFIX) {
        rest = &rest[pos..];
        if let Some(label) = leading_label(rest) {
            labels.push(label);
        }
        rest = &rest[LABEL_PREFIX.len()..];
    }
    labels
}

/// `Response <Letter>` at the start of `text`, if present
fn leading_label(text: &str) -> Option<String> {
    let after = text.strip_prefix(LABEL_PREFIX)?;
    let letter = after.chars().next().filter(char::is_ascii_uppercase)?;
    Some(format!("{LABEL_PREFIX}{letter}"))
}
