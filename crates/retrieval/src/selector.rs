//! Evidence selection.
//!
//! Narrows ranked candidates using the parsed query hints. The policy
//! is a confidence cascade evaluated in strict order:
//!
//! 1. surah + ayat + type: exact match on all three.
//! 2. Same reference, step 1 empty: retry with source forced to
//!    translation.
//! 3. Same reference, still empty: return the full candidate set
//!    unfiltered.
//! 4. surah + ayat only: match the reference; an empty result is final.
//! 5. type only: filter by source type, falling back to the full set.
//! 6. No hints: full candidate set as ranked.
//!
//! Candidate order is preserved in every branch, so the evidence stays
//! sorted by descending score.

use crate::types::{EvidenceSet, QueryHints, ScoredCandidate, SourceType};

/// Select the evidence subset for the given hints.
pub fn select(candidates: &[ScoredCandidate], hints: &QueryHints) -> EvidenceSet {
    match (hints.reference(), hints.preferred_source) {
        (Some((surah, ayat)), Some(source)) => {
            let exact = filter_reference_typed(candidates, surah, ayat, source);
            if !exact.is_empty() {
                tracing::debug!("Evidence: exact reference+type match ({})", exact.len());
                return exact;
            }

            let fallback =
                filter_reference_typed(candidates, surah, ayat, SourceType::Translation);
            if !fallback.is_empty() {
                tracing::debug!("Evidence: translation fallback for reference ({})", fallback.len());
                return fallback;
            }

            tracing::debug!("Evidence: reference filter empty, using full candidate set");
            candidates.to_vec()
        }

        (Some((surah, ayat)), None) => {
            // A cited verse with no type hint has nothing to broaden to:
            // empty means the corpus has no chunks for that verse.
            let matched = filter_reference(candidates, surah, ayat);
            tracing::debug!("Evidence: reference-only match ({})", matched.len());
            matched
        }

        (None, Some(source)) => {
            let typed: EvidenceSet = candidates
                .iter()
                .filter(|c| c.source_type == source)
                .cloned()
                .collect();
            if typed.is_empty() {
                tracing::debug!("Evidence: no '{}' candidates, using full set", source);
                candidates.to_vec()
            } else {
                tracing::debug!("Evidence: type-only match ({})", typed.len());
                typed
            }
        }

        (None, None) => candidates.to_vec(),
    }
}

fn filter_reference(candidates: &[ScoredCandidate], surah: &str, ayat: u32) -> EvidenceSet {
    candidates
        .iter()
        .filter(|c| c.matches_reference(surah, ayat))
        .cloned()
        .collect()
}

fn filter_reference_typed(
    candidates: &[ScoredCandidate],
    surah: &str,
    ayat: u32,
    source: SourceType,
) -> EvidenceSet {
    candidates
        .iter()
        .filter(|c| c.matches_reference(surah, ayat) && c.source_type == source)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        id: &str,
        surah: &str,
        ayat: u32,
        source: SourceType,
        score: f32,
    ) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            text: format!("text {}", id),
            source_type: source,
            ayat_number: ayat,
            surah_name: surah.to_string(),
            surah_number: 111,
            score,
        }
    }

    fn hints(surah: Option<&str>, ayat: Option<u32>, source: Option<SourceType>) -> QueryHints {
        QueryHints {
            surah: surah.map(str::to_string),
            ayat,
            preferred_source: source,
        }
    }

    #[test]
    fn test_exact_match_beats_distractors() {
        let candidates = vec![
            candidate("distractor-1", "Al-Lahab", 1, SourceType::Commentary, 0.9),
            candidate("exact", "Al-Lahab", 2, SourceType::Commentary, 0.8),
            candidate("distractor-2", "Al-Lahab", 2, SourceType::Translation, 0.7),
        ];

        let selected = select(
            &candidates,
            &hints(Some("Al-Lahab"), Some(2), Some(SourceType::Commentary)),
        );

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "exact");
    }

    #[test]
    fn test_typed_fallback_to_translation() {
        let candidates = vec![
            candidate("other-verse", "Al-Lahab", 1, SourceType::Commentary, 0.9),
            candidate("translation", "Al-Lahab", 2, SourceType::Translation, 0.7),
        ];

        let selected = select(
            &candidates,
            &hints(Some("Al-Lahab"), Some(2), Some(SourceType::Commentary)),
        );

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "translation");
    }

    #[test]
    fn test_reference_with_type_falls_back_to_full_set() {
        let candidates = vec![
            candidate("a", "Al-Ikhlas", 1, SourceType::Commentary, 0.9),
            candidate("b", "Al-Ikhlas", 2, SourceType::Translation, 0.8),
        ];

        let selected = select(
            &candidates,
            &hints(Some("Al-Lahab"), Some(2), Some(SourceType::Commentary)),
        );

        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_reference_only_empty_is_final() {
        let candidates = vec![
            candidate("a", "Al-Ikhlas", 1, SourceType::Commentary, 0.9),
            candidate("b", "Al-Ikhlas", 2, SourceType::Translation, 0.8),
        ];

        let selected = select(&candidates, &hints(Some("Al-Lahab"), Some(2), None));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_reference_only_match_keeps_all_types() {
        let candidates = vec![
            candidate("commentary", "Al-Lahab", 2, SourceType::Commentary, 0.9),
            candidate("translation", "Al-Lahab", 2, SourceType::Translation, 0.8),
            candidate("other", "Al-Lahab", 1, SourceType::Commentary, 0.7),
        ];

        let selected = select(&candidates, &hints(Some("Al-Lahab"), Some(2), None));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "commentary");
        assert_eq!(selected[1].id, "translation");
    }

    #[test]
    fn test_type_only_filter() {
        let candidates = vec![
            candidate("t", "Al-Lahab", 1, SourceType::Translation, 0.9),
            candidate("c", "Al-Lahab", 1, SourceType::Commentary, 0.8),
        ];

        let selected = select(&candidates, &hints(None, None, Some(SourceType::Commentary)));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "c");
    }

    #[test]
    fn test_type_only_falls_back_to_full_set() {
        let candidates = vec![
            candidate("t", "Al-Lahab", 1, SourceType::Translation, 0.9),
        ];

        let selected = select(
            &candidates,
            &hints(None, None, Some(SourceType::OriginalText)),
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "t");
    }

    #[test]
    fn test_no_hints_returns_full_ranked_set() {
        let candidates = vec![
            candidate("a", "Al-Lahab", 1, SourceType::Translation, 0.9),
            candidate("b", "Al-Ikhlas", 1, SourceType::Commentary, 0.8),
        ];

        let selected = select(&candidates, &QueryHints::default());
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "a");
    }

    #[test]
    fn test_surah_match_ignores_case_and_apostrophes() {
        let candidates = vec![candidate("a", "Al-A'raf", 31, SourceType::Translation, 0.9)];

        let selected = select(&candidates, &hints(Some("al-araf"), Some(31), None));
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let candidates = vec![
            candidate("a", "Al-Lahab", 2, SourceType::Commentary, 0.9),
            candidate("b", "Al-Lahab", 2, SourceType::Translation, 0.8),
        ];
        let h = hints(Some("Al-Lahab"), Some(2), Some(SourceType::Commentary));

        let first = select(&candidates, &h);
        let second = select(&candidates, &h);
        assert_eq!(first, second);
    }
}
