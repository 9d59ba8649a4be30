//! Core data model for retrieval.

use serde::{Deserialize, Serialize};

/// Content type of a stored chunk.
///
/// Each verse may be chunked in up to three forms: the original Arabic
/// text, its translation, and its commentary (tafsir).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    OriginalText,
    Translation,
    Commentary,
}

impl SourceType {
    /// Stable wire name for this source type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OriginalText => "original_text",
            Self::Translation => "translation",
            Self::Commentary => "commentary",
        }
    }

    /// Parse a wire name into a source type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "original_text" => Some(Self::OriginalText),
            "translation" => Some(Self::Translation),
            "commentary" => Some(Self::Commentary),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable stored chunk: a word-bounded slice of a verse's text in
/// one source type, with its embedding.
///
/// Created once during ingestion (an external collaborator); never
/// mutated. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub source_type: SourceType,
    pub ayat_number: u32,
    pub surah_name: String,
    pub surah_number: u32,
    pub embedding: Vec<f32>,
}

/// A retrieved chunk with its similarity score.
///
/// Produced transiently per query; never persisted. `score` reflects a
/// monotonic similarity measure from the vector store — higher is more
/// relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    pub text: String,
    pub source_type: SourceType,
    pub ayat_number: u32,
    pub surah_name: String,
    pub surah_number: u32,
    pub score: f32,
}

impl ScoredCandidate {
    /// Build a candidate from a stored chunk and its search score.
    pub fn from_chunk(chunk: &Chunk, score: f32) -> Self {
        Self {
            id: chunk.id.clone(),
            text: chunk.text.clone(),
            source_type: chunk.source_type,
            ayat_number: chunk.ayat_number,
            surah_name: chunk.surah_name.clone(),
            surah_number: chunk.surah_number,
            score,
        }
    }

    /// Whether this candidate belongs to the given verse reference.
    pub fn matches_reference(&self, surah: &str, ayat: u32) -> bool {
        self.ayat_number == ayat && surah_key(&self.surah_name) == surah_key(surah)
    }
}

/// Hints parsed from the raw query text. Derived purely; no side effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryHints {
    /// Cited surah name, if the query carried an explicit citation
    pub surah: Option<String>,

    /// Cited ayat number, set together with `surah`
    pub ayat: Option<u32>,

    /// Content-type intent detected from keywords
    pub preferred_source: Option<SourceType>,
}

impl QueryHints {
    /// The explicit verse reference, when both parts were cited.
    pub fn reference(&self) -> Option<(&str, u32)> {
        match (self.surah.as_deref(), self.ayat) {
            (Some(surah), Some(ayat)) => Some((surah, ayat)),
            _ => None,
        }
    }

    /// Whether no hints were detected at all.
    pub fn is_empty(&self) -> bool {
        self.surah.is_none() && self.ayat.is_none() && self.preferred_source.is_none()
    }
}

/// Ordered evidence selected for the generation context. Empty is a
/// terminal "no answer" condition.
pub type EvidenceSet = Vec<ScoredCandidate>;

/// Normalization key for surah-name comparison.
///
/// Surah names vary in casing and apostrophe style across corpora
/// ("Al-Lahab", "al-lahab", "An-Naas" vs "An-Nas'"); comparison ignores
/// case and apostrophes.
pub fn surah_key(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '’' | '‘' | '`'))
        .collect::<String>()
        .to_lowercase()
}
