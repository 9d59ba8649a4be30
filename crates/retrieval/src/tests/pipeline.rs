//! End-to-end pipeline tests over an in-memory corpus.
//!
//! Uses the hashing embedder so query and chunk vectors are computed
//! the same deterministic way, a small Al-Lahab corpus in the memory
//! store, and a scripted chat client that counts generation calls.

use crate::embedder::HashEmbedder;
use crate::store::MemoryStore;
use crate::types::{Chunk, SourceType};
use crate::{Pipeline, Retriever};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tafsir_core::config::{GenerationConfig, KeywordConfig};
use tafsir_core::AppResult;
use tafsir_llm::{AnswerGenerator, ChatClient, ChatRequest, ChatResponse};

const DIMENSIONS: usize = 256;

struct StubChat {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl ChatClient for StubChat {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, _request: &ChatRequest) -> AppResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChatResponse {
            content: "Generated answer about Abu Lahab.".to_string(),
            model: "stub".to_string(),
            usage: Default::default(),
        })
    }
}

async fn corpus_chunk(
    embedder: &HashEmbedder,
    id: &str,
    text: &str,
    source: SourceType,
    ayat: u32,
) -> Chunk {
    use crate::embedder::Embedder;

    Chunk {
        id: id.to_string(),
        text: text.to_string(),
        source_type: source,
        ayat_number: ayat,
        surah_name: "Al-Lahab".to_string(),
        surah_number: 111,
        embedding: embedder.embed(text).await.unwrap(),
    }
}

/// Pipeline over an Al-Lahab corpus plus a call counter for the
/// generation stub.
async fn pipeline() -> (Pipeline, Arc<AtomicUsize>) {
    let embedder = HashEmbedder::new(DIMENSIONS);

    let chunks = vec![
        corpus_chunk(
            &embedder,
            "lahab-1-translation",
            "Binasalah kedua tangan Abu Lahab dan benar-benar binasa dia",
            SourceType::Translation,
            1,
        )
        .await,
        corpus_chunk(
            &embedder,
            "lahab-2-translation",
            "Tidaklah berguna baginya hartanya dan apa yang dia usahakan",
            SourceType::Translation,
            2,
        )
        .await,
        corpus_chunk(
            &embedder,
            "lahab-2-commentary",
            "Tafsir ayat kedua: harta Abu Lahab tidak menyelamatkannya dari azab",
            SourceType::Commentary,
            2,
        )
        .await,
    ];

    let retriever = Retriever::new(
        Arc::new(embedder),
        Arc::new(MemoryStore::from_chunks(chunks)),
    );

    let calls = Arc::new(AtomicUsize::new(0));
    let generator = AnswerGenerator::new(
        Arc::new(StubChat {
            calls: calls.clone(),
        }),
        GenerationConfig::default(),
    );

    // min_score 0.0: ranking behavior is under test, not the threshold
    let pipeline = Pipeline::new(retriever, generator, KeywordConfig::default(), 10, 0.0);
    (pipeline, calls)
}

#[tokio::test]
async fn test_cited_commentary_query_selects_exact_chunk() {
    let (pipeline, _) = pipeline().await;

    let evidence = pipeline
        .evidence("Apa tafsir surat Al-Lahab ayat 2?")
        .await
        .unwrap();

    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0].id, "lahab-2-commentary");
}

#[tokio::test]
async fn test_commentary_request_falls_back_to_translation() {
    let (pipeline, _) = pipeline().await;

    // Ayat 1 has no commentary chunk in the corpus
    let evidence = pipeline
        .evidence("Apa tafsir surat Al-Lahab ayat 1?")
        .await
        .unwrap();

    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0].id, "lahab-1-translation");
}

#[tokio::test]
async fn test_absent_verse_reference_skips_generation() {
    let (pipeline, calls) = pipeline().await;

    // No type keyword, so the reference-only branch applies and its
    // empty result is terminal
    let answer = pipeline.answer("surat Al-Lahab ayat 5 tentang apa").await;

    assert_eq!(answer, Pipeline::no_evidence_message());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_evidence_selection_is_idempotent() {
    let (pipeline, _) = pipeline().await;
    let query = "apa arti surat Al-Lahab ayat 2";

    let first = pipeline.evidence(query).await.unwrap();
    let second = pipeline.evidence(query).await.unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_answer_happy_path_calls_generator_once() {
    let (pipeline, calls) = pipeline().await;

    let answer = pipeline.answer("Apa tafsir surat Al-Lahab ayat 2?").await;

    assert_eq!(answer, "Generated answer about Abu Lahab.");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
