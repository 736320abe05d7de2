//! Property-based tests for engine invariants.

use proptest::prelude::*;

use corpus_analytics::models::Reference;
use corpus_analytics::{AnalysisConfig, CorpusAnalyzer, GraphAnalyzer, PaperRecord, TopicModel};

/// Generate token documents drawn from a small content-word alphabet, so the
/// vocabulary is never emptied by stopword filtering.
fn arb_documents() -> impl Strategy<Value = Vec<Vec<String>>> {
    let token = prop::sample::select(vec![
        "graph", "topic", "trend", "citation", "cluster", "factor", "matrix", "corpus",
    ]);
    let document = prop::collection::vec(token, 1..8)
        .prop_map(|tokens| tokens.into_iter().map(str::to_string).collect::<Vec<_>>());
    prop::collection::vec(document, 2..12)
}

/// Generate paper records with arbitrary titles, authors, and references.
fn arb_papers() -> impl Strategy<Value = Vec<PaperRecord>> {
    let paper = (
        "[A-Za-z][A-Za-z ]{0,30}",
        prop::collection::vec("[A-Z][a-z]{1,8}", 0..4),
        prop::collection::vec("[A-Za-z][A-Za-z ]{0,30}", 0..4),
    )
        .prop_map(|(title, authors, references)| PaperRecord {
            title,
            authors,
            references: references.into_iter().map(|title| Reference::titled(title)).collect(),
            ..Default::default()
        });
    prop::collection::vec(paper, 0..12)
}

proptest! {
    /// Every document's topic distribution sums to 1.
    #[test]
    fn topic_weights_sum_to_one(documents in arb_documents(), seed in any::<u64>()) {
        let k = 2;
        prop_assume!(documents.len() >= k);

        let model = TopicModel::new(100, 10, seed);
        let result = model.fit(&documents, k).expect("corpus is large enough");

        for row in &result.weights {
            let sum: f64 = row.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "row sums to {}", sum);
            prop_assert!(row.iter().all(|w| *w >= 0.0));
        }
    }

    /// Graph density always lands in the unit interval, and tiny graphs
    /// report zero.
    #[test]
    fn density_stays_in_unit_interval(papers in arb_papers()) {
        let analyzer = GraphAnalyzer::default();

        for graph in [
            analyzer.build_citation_graph(&papers),
            analyzer.build_coauthor_graph(&papers),
        ] {
            let density = graph.density();
            prop_assert!((0.0..=1.0).contains(&density), "density {}", density);
            if graph.node_count() <= 1 {
                prop_assert!(density.abs() < f64::EPSILON);
            }
        }
    }

    /// Assembly never panics and its counters match the input.
    #[test]
    fn assemble_never_panics(papers in arb_papers(), seed in any::<u64>()) {
        let analyzer = CorpusAnalyzer::new(AnalysisConfig::new().with_seed(seed));
        let report = analyzer.assemble(&papers);

        prop_assert_eq!(report.summary.total_papers, papers.len());
        prop_assert_eq!(report.categories.len(), papers.len());
        prop_assert_eq!(report.summary.undated, papers.len());
    }
}
