//! Corpus Analytics Engine
//!
//! Derives structured analytical artifacts from a collection of academic
//! paper records: latent topics, citation and co-authorship centrality
//! rankings, and time-bucketed publication trends.
//!
//! # Features
//!
//! - **Text normalization**: lowercase, UAX-29 segmentation, base-form
//!   reduction, multi-language stopword filtering
//! - **Rule-based classification**: ordered first-match-wins trigger phrases
//! - **Topic modeling**: tf-idf term-document matrix + seeded non-negative
//!   factorization
//! - **Relationship graphs**: citation influence and co-authorship
//!   centrality with top-N rankings
//! - **Trends**: daily/monthly buckets with a trailing moving average
//!
//! Every component is a synchronous pure computation over caller-supplied
//! in-memory collections; the engine performs no I/O.
//!
//! # Example
//!
//! ```
//! use corpus_analytics::{AnalysisConfig, CategoryRule, CorpusAnalyzer, PaperRecord};
//!
//! let config = AnalysisConfig::new()
//!     .with_topic_count(2)
//!     .with_rules(vec![CategoryRule::new("vision", &["segmentation"])]);
//! let analyzer = CorpusAnalyzer::new(config);
//!
//! let papers = vec![
//!     PaperRecord { title: "Image segmentation survey".to_string(), ..Default::default() },
//!     PaperRecord { title: "Graph neural networks".to_string(), ..Default::default() },
//! ];
//! let report = analyzer.assemble(&papers);
//! assert_eq!(report.summary.total_papers, 2);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;

pub use analysis::{
    CorpusAnalyzer, GraphAnalyzer, RankMetric, RelationshipGraph, RuleBasedClassifier,
    TemporalTrendAnalyzer, TextNormalizer, TopicModel,
};
pub use config::{AnalysisConfig, CategoryRule, NormalizerConfig};
pub use error::{AnalysisError, AnalysisResult};
pub use models::{AnalysisReport, CentralityReport, PaperRecord, Reference, TopicResult, TrendSeries};
