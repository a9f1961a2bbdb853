//! Property tests for chunking windows and search ordering.

use proptest::prelude::*;

use docqa_rag::memory::InMemoryVectorStore;
use docqa_rag::{CharacterChunker, Chunker, Document, StoredRecord, VectorStore};

/// Source text mixing single- and multi-byte characters, never blank.
fn arb_text() -> impl Strategy<Value = String> {
    "[abç€x ]{1,300}".prop_filter("non-blank text", |t| !t.trim().is_empty())
}

/// A (chunk_size, chunk_overlap) pair with overlap strictly smaller.
fn arb_window() -> impl Strategy<Value = (usize, usize)> {
    (2usize..60).prop_flat_map(|size| (Just(size), 0usize..size))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every window is at most `chunk_size` characters and consecutive
    /// windows share exactly `chunk_overlap` characters, except possibly
    /// at the truncated end of the text.
    #[test]
    fn windows_are_bounded_and_overlap_exactly(
        text in arb_text(),
        (chunk_size, chunk_overlap) in arb_window(),
    ) {
        let chunker = CharacterChunker::new(chunk_size, chunk_overlap).unwrap();
        let chunks = chunker.split(&Document::new(text.clone()));

        prop_assert!(!chunks.is_empty());

        for chunk in &chunks {
            prop_assert!(chunk.content.chars().count() <= chunk_size);
        }

        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].content.chars().collect();
            let next: Vec<char> = pair[1].content.chars().collect();
            let shared: Vec<char> = prev[prev.len() - chunk_overlap.min(prev.len())..].to_vec();
            prop_assert!(
                next.len() >= shared.len() && next[..shared.len()] == shared[..],
                "consecutive windows do not share the configured overlap"
            );
        }

        // Dropping each window's leading overlap reassembles the source.
        let mut rebuilt: String = chunks[0].content.clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.content.chars().skip(chunk_overlap));
        }
        prop_assert_eq!(rebuilt, text);
    }
}

/// Generate a non-zero embedding of the given dimension.
fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter("non-zero embedding", |v| {
        v.iter().map(|x| x * x).sum::<f32>().sqrt() > 1e-6
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Search returns at most `top_k` results, ordered by descending score.
    #[test]
    fn search_results_are_ranked_and_bounded(
        embeddings in proptest::collection::vec(arb_embedding(8), 1..15),
        query in arb_embedding(8),
        top_k in 1usize..20,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let results = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            store.ensure_collection("documents", 8).await.unwrap();

            let records: Vec<StoredRecord> = embeddings
                .iter()
                .enumerate()
                .map(|(i, embedding)| StoredRecord {
                    id: format!("DOC-{i}"),
                    content: format!("chunk {i}"),
                    metadata: Default::default(),
                    embedding: embedding.clone(),
                })
                .collect();

            store.upsert("documents", &records).await.unwrap();
            store.search("documents", &query, top_k).await.unwrap()
        });

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= embeddings.len());
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
