//! Analysis components and the report assembler.
//!
//! Each component is a synchronous pure computation over a read-only view of
//! the paper collection. The topic model, graph analyzer, and trend analyzer
//! are independent of each other; [`CorpusAnalyzer::assemble`] runs them over
//! one corpus snapshot and merges the results.

mod classify;
mod graph;
mod normalize;
mod topics;
mod trends;

pub use classify::RuleBasedClassifier;
pub use graph::{GraphAnalyzer, RankMetric, RelationshipGraph, betweenness_centrality, degree_centrality};
pub use normalize::TextNormalizer;
pub use topics::TopicModel;
pub use trends::TemporalTrendAnalyzer;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::models::{
    AnalysisReport, CentralityReport, CorpusSummary, PaperCategory, PaperRecord, TopicResult,
    TrendSeries,
};

/// Runs the full analysis pipeline over a corpus snapshot.
///
/// Construction wires every component from one [`AnalysisConfig`]; repeated
/// calls with the same input produce identical reports.
#[derive(Debug, Clone)]
pub struct CorpusAnalyzer {
    config: AnalysisConfig,
    normalizer: TextNormalizer,
    classifier: RuleBasedClassifier,
    topics: TopicModel,
    graphs: GraphAnalyzer,
    trends: TemporalTrendAnalyzer,
}

impl CorpusAnalyzer {
    /// Create an analyzer from a configuration.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        let normalizer = TextNormalizer::new(config.normalizer.clone());
        let classifier = RuleBasedClassifier::new(&config.rules, config.fallback_category.clone());
        let topics = TopicModel::new(config.vocabulary_cap, config.top_terms, config.seed);
        let graphs = GraphAnalyzer::new(config.top_ranked);
        let trends = TemporalTrendAnalyzer::new(config.trend_window);
        Self { config, normalizer, classifier, topics, graphs, trends }
    }

    /// The configuration this analyzer was built from.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The classifier wired from the configured rules.
    #[must_use]
    pub fn classifier(&self) -> &RuleBasedClassifier {
        &self.classifier
    }

    /// The text normalizer wired from the configured resources.
    #[must_use]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Cache a category on every record that lacks one.
    ///
    /// This is the one place the engine writes to caller-owned records, and
    /// only on explicit request; [`Self::assemble`] never mutates its input.
    pub fn classify_all(&self, papers: &mut [PaperRecord]) {
        for paper in papers {
            if paper.category.is_none() {
                let label = self.classifier.classify(paper).to_string();
                paper.category = Some(label);
            }
        }
    }

    /// Fit the configured number of topics to the corpus.
    ///
    /// Documents are the normalized title + abstract of each paper, in input
    /// order.
    pub fn topic_model(&self, papers: &[PaperRecord]) -> AnalysisResult<TopicResult> {
        let documents: Vec<Vec<String>> = papers
            .iter()
            .map(|paper| {
                let mut text = paper.title.clone();
                if let Some(abs) = &paper.r#abstract {
                    text.push(' ');
                    text.push_str(abs);
                }
                self.normalizer.normalize(&text)
            })
            .collect();
        self.topics.fit(&documents, self.config.topic_count)
    }

    /// Citation-graph centrality report for the corpus.
    #[must_use]
    pub fn citation_report(&self, papers: &[PaperRecord]) -> CentralityReport {
        let graph = self.graphs.build_citation_graph(papers);
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "citation graph built");
        self.graphs.rank(&graph, RankMetric::Influence)
    }

    /// Co-authorship centrality report for the corpus.
    #[must_use]
    pub fn collaboration_report(&self, papers: &[PaperRecord]) -> CentralityReport {
        let graph = self.graphs.build_coauthor_graph(papers);
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "co-authorship graph built");
        self.graphs.rank(&graph, RankMetric::Eigenvector)
    }

    /// Publication trend series for the corpus.
    #[must_use]
    pub fn trend_series(&self, papers: &[PaperRecord]) -> TrendSeries {
        self.trends.trend(papers)
    }

    /// Assemble the full analysis report over one corpus snapshot.
    ///
    /// Classification runs first for papers without a category (reported,
    /// not written back); the topic model, relationship graphs, and trend
    /// series are then computed independently. A component that cannot
    /// produce output is omitted from the report rather than failing the
    /// run.
    #[must_use]
    pub fn assemble(&self, papers: &[PaperRecord]) -> AnalysisReport {
        let categories = papers
            .iter()
            .map(|paper| PaperCategory {
                title: paper.title.clone(),
                category: paper
                    .category
                    .clone()
                    .unwrap_or_else(|| self.classifier.classify(paper).to_string()),
            })
            .collect();

        let topics = match self.topic_model(papers) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(error = %err, "topic model omitted from report");
                None
            }
        };

        AnalysisReport {
            summary: summarize(papers),
            categories,
            topics,
            citations: Some(self.citation_report(papers)),
            collaborations: Some(self.collaboration_report(papers)),
            trends: Some(self.trend_series(papers)),
        }
    }
}

/// Corpus-level counters: totals, publication-year span, distinct authors.
fn summarize(papers: &[PaperRecord]) -> CorpusSummary {
    let years: Vec<i32> = papers.iter().filter_map(PaperRecord::year).collect();
    let authors: HashSet<&str> = papers
        .iter()
        .flat_map(|paper| paper.authors.iter())
        .map(String::as_str)
        .filter(|name| !name.trim().is_empty())
        .collect();

    CorpusSummary {
        total_papers: papers.len(),
        first_year: years.iter().min().copied(),
        last_year: years.iter().max().copied(),
        distinct_authors: authors.len(),
        undated: papers.iter().filter(|paper| paper.published.is_none()).count(),
    }
}
