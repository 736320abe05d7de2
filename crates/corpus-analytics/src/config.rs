//! Configuration for the corpus analytics engine.
//!
//! Everything the engine consumes is passed in by the caller at construction
//! time: category rules, topic count, vocabulary cap, trend window, stopword
//! sets, and the factorization seed. The engine reads nothing from disk or
//! the environment.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Engine defaults.
pub mod defaults {
    /// Number of latent topics fitted per run.
    pub const TOPIC_COUNT: usize = 5;

    /// Vocabulary cap: the term-document matrix keeps the top-M terms by
    /// corpus frequency.
    pub const VOCABULARY_CAP: usize = 1000;

    /// Representative terms listed per topic.
    pub const TOP_TERMS_PER_TOPIC: usize = 10;

    /// Entities listed in each centrality ranking.
    pub const TOP_RANKED: usize = 10;

    /// Trailing moving-average window over the monthly trend series.
    pub const TREND_WINDOW: usize = 3;

    /// Seed for the factorization's random initialization.
    pub const SEED: u64 = 42;

    /// Category assigned when no trigger phrase matches.
    pub const FALLBACK_CATEGORY: &str = "uncategorized";

    /// Damping factor for the citation rank-propagation score.
    pub const DAMPING: f64 = 0.85;

    /// Iteration cap shared by the factorization and the iterative
    /// centrality computations.
    pub const MAX_ITERATIONS: usize = 100;

    /// Convergence threshold for iterative computations.
    pub const EPSILON: f64 = 1e-6;

    /// Iteration cap for the multiplicative-update factorization.
    pub const FACTORIZATION_ITERATIONS: usize = 200;
}

/// One classification rule: a category plus its trigger phrases.
///
/// Rules are evaluated in configuration order and the first category with a
/// matching trigger wins, so the order of the rule list is part of the
/// contract, not an implementation detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label assigned on a match.
    pub category: String,

    /// Phrases matched case-insensitively against title + abstract +
    /// keywords.
    pub triggers: Vec<String>,
}

impl CategoryRule {
    /// Create a rule from a category label and trigger phrases.
    #[must_use]
    pub fn new(category: impl Into<String>, triggers: &[&str]) -> Self {
        Self {
            category: category.into(),
            triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Construction-time resources for the text normalizer.
///
/// The stopword set and lemma overrides are injected here rather than loaded
/// lazily from a process-wide cache, so two normalizers with the same config
/// are interchangeable.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Tokens dropped during normalization.
    pub stopwords: HashSet<String>,

    /// Exact token-to-lemma replacements, applied before the built-in
    /// inflection rules.
    pub lemma_overrides: HashMap<String, String>,
}

impl NormalizerConfig {
    /// Config with the default English + Chinese stopword sets.
    #[must_use]
    pub fn new() -> Self {
        let mut stopwords: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();
        stopwords.extend(stop_words::get(stop_words::LANGUAGE::Chinese));
        Self { stopwords, lemma_overrides: HashMap::new() }
    }

    /// Config with a caller-supplied stopword set and no lemma overrides.
    #[must_use]
    pub fn with_stopwords(stopwords: impl IntoIterator<Item = String>) -> Self {
        Self { stopwords: stopwords.into_iter().collect(), lemma_overrides: HashMap::new() }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of latent topics (k).
    pub topic_count: usize,

    /// Maximum vocabulary size for the term-document matrix (M).
    pub vocabulary_cap: usize,

    /// Representative terms per topic.
    pub top_terms: usize,

    /// Entities per centrality ranking.
    pub top_ranked: usize,

    /// Moving-average window over the monthly series.
    pub trend_window: usize,

    /// Seed for the factorization's random initialization. Runs with equal
    /// config and corpus produce identical reports.
    pub seed: u64,

    /// Ordered classification rules; first match wins.
    pub rules: Vec<CategoryRule>,

    /// Label assigned when no rule matches.
    pub fallback_category: String,

    /// Normalizer resources.
    pub normalizer: NormalizerConfig,
}

impl AnalysisConfig {
    /// Configuration with engine defaults and no classification rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            topic_count: defaults::TOPIC_COUNT,
            vocabulary_cap: defaults::VOCABULARY_CAP,
            top_terms: defaults::TOP_TERMS_PER_TOPIC,
            top_ranked: defaults::TOP_RANKED,
            trend_window: defaults::TREND_WINDOW,
            seed: defaults::SEED,
            rules: Vec::new(),
            fallback_category: defaults::FALLBACK_CATEGORY.to_string(),
            normalizer: NormalizerConfig::new(),
        }
    }

    /// Replace the classification rules, preserving their order.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<CategoryRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Set the topic count.
    #[must_use]
    pub fn with_topic_count(mut self, k: usize) -> Self {
        self.topic_count = k;
        self
    }

    /// Set the factorization seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
