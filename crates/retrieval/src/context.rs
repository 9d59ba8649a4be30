//! Evidence rendering.
//!
//! Serializes the selected evidence into the textual context block fed
//! to the generation prompt. Deterministic and order-preserving; empty
//! evidence yields an empty string, which callers must treat as
//! terminal before generation.

use crate::types::EvidenceSet;

/// Render evidence candidates into a context block.
pub fn format_evidence(evidence: &EvidenceSet) -> String {
    evidence
        .iter()
        .map(|candidate| {
            format!(
                "Surah: {}\nAyat {} | Source: {}\n\"{}\"",
                candidate.surah_name,
                candidate.ayat_number,
                candidate.source_type,
                candidate.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScoredCandidate, SourceType};

    fn candidate(id: &str, text: &str) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            text: text.to_string(),
            source_type: SourceType::Translation,
            ayat_number: 1,
            surah_name: "Al-Lahab".to_string(),
            surah_number: 111,
            score: 0.9,
        }
    }

    #[test]
    fn test_single_candidate_block() {
        let evidence = vec![candidate("c1", "Perish the hands of Abu Lahab")];
        let context = format_evidence(&evidence);

        assert_eq!(
            context,
            "Surah: Al-Lahab\nAyat 1 | Source: translation\n\"Perish the hands of Abu Lahab\""
        );
    }

    #[test]
    fn test_blocks_preserve_order_and_separation() {
        let evidence = vec![candidate("c1", "first"), candidate("c2", "second")];
        let context = format_evidence(&evidence);

        let blocks: Vec<&str> = context.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("first"));
        assert!(blocks[1].contains("second"));
    }

    #[test]
    fn test_empty_evidence_yields_empty_string() {
        assert_eq!(format_evidence(&Vec::new()), "");
    }
}
