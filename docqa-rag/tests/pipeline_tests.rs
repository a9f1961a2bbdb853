//! End-to-end pipeline tests with stub providers and the in-memory store.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use docqa_model::MockChatModel;
use docqa_rag::memory::InMemoryVectorStore;
use docqa_rag::{
    CharacterChunker, Document, DocumentLoader, EmbeddingProvider, Metadata, RagError,
    RagPipeline,
};

/// A loader that returns fixed in-memory pages instead of reading a file.
struct StubLoader {
    pages: Vec<Document>,
}

impl StubLoader {
    fn single_page(text: &str) -> Self {
        let metadata: Metadata = [
            ("source".to_string(), json!("document.pdf")),
            ("page".to_string(), json!(0)),
        ]
        .into_iter()
        .collect();
        Self { pages: vec![Document::with_metadata(text, metadata)] }
    }
}

impl DocumentLoader for StubLoader {
    fn load(&self, _path: &Path) -> docqa_rag::Result<Vec<Document>> {
        Ok(self.pages.clone())
    }
}

/// A deterministic embedder that counts how often it is called.
struct CountingEmbedder {
    calls: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(text: &str) -> Vec<f32> {
        let sum: u32 = text.bytes().map(u32::from).sum();
        vec![text.len() as f32, (sum % 97) as f32, 1.0]
    }
}

#[async_trait]
impl EmbeddingProvider for CountingEmbedder {
    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vector_for(text))
    }

    fn dimensions(&self) -> usize {
        3
    }
}

struct TestPipeline {
    pipeline: RagPipeline,
    embedder: Arc<CountingEmbedder>,
    store: Arc<InMemoryVectorStore>,
    chat: Arc<MockChatModel>,
}

fn build_pipeline(loader: StubLoader, chunker: CharacterChunker) -> TestPipeline {
    let embedder = Arc::new(CountingEmbedder::new());
    let store = Arc::new(InMemoryVectorStore::new());
    let chat = Arc::new(MockChatModel::new("stub answer"));

    let pipeline = RagPipeline::builder()
        .collection("documents")
        .loader(Arc::new(loader))
        .chunker(Arc::new(chunker))
        .embedder(embedder.clone())
        .store(store.clone())
        .chat_model(chat.clone())
        .build()
        .unwrap();

    TestPipeline { pipeline, embedder, store, chat }
}

#[tokio::test]
async fn empty_question_is_rejected_before_any_provider_call() {
    let t = build_pipeline(StubLoader::single_page("text"), CharacterChunker::default());

    for question in ["", "   ", "\n\t"] {
        let err = t.pipeline.answer(question).await.unwrap_err();
        assert!(matches!(err, RagError::InvalidInput(_)), "question {question:?}");
    }

    assert_eq!(t.embedder.calls(), 0);
    assert!(t.chat.prompts().is_empty());
}

#[tokio::test]
async fn blank_source_terminates_ingestion_before_providers() {
    let t = build_pipeline(StubLoader::single_page("   \n "), CharacterChunker::default());

    let err = t.pipeline.ingest(Path::new("blank.pdf")).await.unwrap_err();
    assert!(matches!(err, RagError::EmptyDocument { .. }));

    // Neither the embedding provider nor the store was touched.
    assert_eq!(t.embedder.calls(), 0);
    assert_eq!(t.store.len("documents").await, None);
}

#[tokio::test]
async fn single_page_flows_verbatim_into_the_prompt() {
    let t = build_pipeline(
        StubLoader::single_page("Alpha Beta Gamma"),
        CharacterChunker::default(),
    );

    let stored = t.pipeline.ingest(Path::new("document.pdf")).await.unwrap();
    assert_eq!(stored, 1);

    let answer = t.pipeline.answer("What is in the document?").await.unwrap();
    assert_eq!(answer, "stub answer");

    let prompts = t.chat.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("CONTEXTO:\nAlpha Beta Gamma\n"));
    assert!(prompts[0].contains("PERGUNTA DO USUÁRIO:\nWhat is in the document?\n"));
}

#[tokio::test]
async fn ids_are_sequential_in_chunk_order() {
    let pages = vec![
        Document::new("abcdefghij".repeat(3)),
        Document::new("klmnopqrst".repeat(2)),
    ];
    let t = build_pipeline(StubLoader { pages }, CharacterChunker::new(10, 2).unwrap());

    let stored = t.pipeline.ingest(Path::new("document.pdf")).await.unwrap();
    assert!(stored > 2, "expected multiple chunks, got {stored}");

    for index in 0..stored {
        let record = t.store.get("documents", &format!("DOC-{index}")).await;
        assert!(record.is_some(), "missing DOC-{index}");
    }
    assert!(t.store.get("documents", &format!("DOC-{stored}")).await.is_none());

    // First chunk of the first page keeps source order.
    let first = t.store.get("documents", "DOC-0").await.unwrap();
    assert!(first.content.starts_with("abcdefghij"));
}

#[tokio::test]
async fn metadata_is_normalized_before_storage() {
    let metadata: Metadata = [
        ("source".to_string(), json!("document.pdf")),
        ("page".to_string(), json!(0)),
        ("author".to_string(), json!("")),
        ("producer".to_string(), Value::Null),
    ]
    .into_iter()
    .collect();
    let pages = vec![Document::with_metadata("Alpha Beta Gamma", metadata)];
    let t = build_pipeline(StubLoader { pages }, CharacterChunker::default());

    t.pipeline.ingest(Path::new("document.pdf")).await.unwrap();

    let record = t.store.get("documents", "DOC-0").await.unwrap();
    assert_eq!(record.metadata["source"], json!("document.pdf"));
    assert_eq!(record.metadata["page"], json!(0));
    assert_eq!(record.metadata["chunk_index"], json!(0));
    assert!(!record.metadata.contains_key("author"));
    assert!(!record.metadata.contains_key("producer"));
}

#[tokio::test]
async fn reingesting_overwrites_instead_of_duplicating() {
    let t = build_pipeline(
        StubLoader::single_page("Alpha Beta Gamma"),
        CharacterChunker::default(),
    );

    t.pipeline.ingest(Path::new("document.pdf")).await.unwrap();
    t.pipeline.ingest(Path::new("document.pdf")).await.unwrap();

    assert_eq!(t.store.len("documents").await, Some(1));
}

#[tokio::test]
async fn pipeline_without_chat_model_can_ingest_but_not_answer() {
    let embedder = Arc::new(CountingEmbedder::new());
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = RagPipeline::builder()
        .collection("documents")
        .loader(Arc::new(StubLoader::single_page("Alpha Beta Gamma")))
        .chunker(Arc::new(CharacterChunker::default()))
        .embedder(embedder)
        .store(store)
        .build()
        .unwrap();

    assert_eq!(pipeline.ingest(Path::new("document.pdf")).await.unwrap(), 1);
    let err = pipeline.answer("What is in the document?").await.unwrap_err();
    assert!(matches!(err, RagError::Config(_)));
}

#[test]
fn builder_names_the_missing_seam() {
    let err = RagPipeline::builder().collection("documents").build().unwrap_err();
    match err {
        RagError::Config(message) => assert!(message.contains("loader")),
        other => panic!("expected Config error, got {other:?}"),
    }
}
