//! Query hint extraction.
//!
//! Pure token scan over the raw query text. Recognizes one citation
//! shape, "surat <name> ayat <number>" (surah names use hyphens in
//! place of spaces, e.g. "al-baqarah"), plus content-type intent from
//! keyword lists. No I/O and no failure mode: an unmatched query just
//! yields all-unset hints.

use crate::types::{QueryHints, SourceType};
use tafsir_core::config::KeywordConfig;

/// Parse surah/ayat citation and content-type intent from a query.
pub fn extract(query_text: &str, keywords: &KeywordConfig) -> QueryHints {
    let lower = query_text.to_lowercase();

    let (surah, ayat) = extract_citation(&lower);
    let preferred_source = extract_source_hint(&lower, keywords);

    let hints = QueryHints {
        surah,
        ayat,
        preferred_source,
    };

    if !hints.is_empty() {
        tracing::debug!(
            "Query hints: surah={:?} ayat={:?} source={:?}",
            hints.surah,
            hints.ayat,
            hints.preferred_source
        );
    }

    hints
}

/// Scan for the adjacent token run `surat <name> ayat <number>`.
/// Both fields are set together or not at all.
fn extract_citation(lower: &str) -> (Option<String>, Option<u32>) {
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '?' | '!' | ';' | ':'))
        .filter(|t| !t.is_empty())
        .collect();

    for window in tokens.windows(4) {
        let [marker, name, ayat_marker, number] = [window[0], window[1], window[2], window[3]];

        if !matches!(marker, "surat" | "surah") || ayat_marker != "ayat" {
            continue;
        }
        if name == "ayat" {
            continue;
        }

        if let Ok(n) = number.parse::<u32>() {
            return (Some(name.to_string()), Some(n));
        }
    }

    (None, None)
}

/// Keyword-class precedence is fixed: commentary wins over translation,
/// translation wins over original text.
fn extract_source_hint(lower: &str, keywords: &KeywordConfig) -> Option<SourceType> {
    let contains_any = |terms: &[String]| terms.iter().any(|term| lower.contains(term.as_str()));

    if contains_any(&keywords.commentary) {
        Some(SourceType::Commentary)
    } else if contains_any(&keywords.translation) {
        Some(SourceType::Translation)
    } else if contains_any(&keywords.original_text) {
        Some(SourceType::OriginalText)
    } else {
        None
    }
}
