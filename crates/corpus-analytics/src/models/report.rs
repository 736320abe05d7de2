//! Result types produced by the analysis pipeline.
//!
//! Every mapping uses `BTreeMap` so serialized reports are byte-stable:
//! assembling the same corpus twice with the same config yields identical
//! output, which callers rely on for caching and diffing.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar-month bucket key, ordered chronologically and serialized as
/// `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Bucket for a given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (year, month) = value
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{value}'"))?;
        let year: i32 = year.parse().map_err(|_| format!("invalid year in '{value}'"))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid month in '{value}'"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in '{value}'"));
        }
        Ok(Self { year, month })
    }
}

/// One latent topic: its identifier and representative terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    /// Topic identifier, 1..=k.
    pub id: usize,

    /// Top terms by factor weight, descending.
    pub terms: Vec<String>,
}

/// Output of the topic model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicResult {
    /// The k fitted topics.
    pub topics: Vec<TopicSummary>,

    /// One row per input document: its distribution over the k topics.
    /// Rows are non-negative and sum to ~1.
    pub weights: Vec<Vec<f64>>,
}

/// One entry in a centrality ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    /// Node identity (paper title or author name).
    pub name: String,

    /// Score of the ranking metric.
    pub score: f64,
}

/// Centrality metrics for one relationship graph.
///
/// Metrics that do not apply to a graph flavor are present but empty: the
/// citation graph has no eigenvector map, the co-authorship graph no
/// betweenness or influence map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityReport {
    /// Degree centrality per node.
    #[serde(default)]
    pub degree: BTreeMap<String, f64>,

    /// Betweenness centrality per node (citation graph).
    #[serde(default)]
    pub betweenness: BTreeMap<String, f64>,

    /// Eigenvector centrality per node (co-authorship graph).
    #[serde(default)]
    pub eigenvector: BTreeMap<String, f64>,

    /// Rank-propagation influence score per node (citation graph).
    #[serde(default)]
    pub influence: BTreeMap<String, f64>,

    /// Local clustering coefficient per node.
    #[serde(default)]
    pub clustering: BTreeMap<String, f64>,

    /// Top entities by the graph's ranking metric, descending; ties broken
    /// by first-seen order in the input collection.
    #[serde(default)]
    pub top_ranked: Vec<RankedEntity>,

    /// Fraction of possible edges realized; 0 for graphs with <= 1 node.
    #[serde(default)]
    pub density: f64,

    /// Mean of the local clustering coefficients.
    #[serde(default)]
    pub average_clustering: f64,
}

/// One point of the monthly moving-average series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Month bucket.
    pub bucket: YearMonth,

    /// Trailing mean over the configured window; absent for the first
    /// window-1 buckets.
    pub average: Option<f64>,
}

/// Time-bucketed publication counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Papers per publication day, chronological.
    #[serde(default)]
    pub daily: BTreeMap<NaiveDate, u64>,

    /// Papers per calendar month, chronological.
    #[serde(default)]
    pub monthly: BTreeMap<YearMonth, u64>,

    /// Trailing moving average over the monthly series, aligned with
    /// `monthly`.
    #[serde(default)]
    pub moving_average: Vec<TrendPoint>,

    /// Papers excluded from the buckets for lack of a publication date.
    #[serde(default)]
    pub undated: u64,
}

/// Category assignment for one paper, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperCategory {
    /// Paper title.
    pub title: String,

    /// Assigned (or pre-existing) category label.
    pub category: String,
}

/// Corpus-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Total records analyzed.
    pub total_papers: usize,

    /// Earliest publication year among dated records.
    pub first_year: Option<i32>,

    /// Latest publication year among dated records.
    pub last_year: Option<i32>,

    /// Number of distinct author names across the corpus.
    pub distinct_authors: usize,

    /// Records lacking a publication date.
    pub undated: usize,
}

/// The terminal aggregate of one analysis run.
///
/// A section is `None` only when its component aborted (for example the
/// topic model on a corpus smaller than k); empty inputs produce empty
/// structures instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Corpus-level counters.
    pub summary: CorpusSummary,

    /// Per-paper category labels, in input order.
    #[serde(default)]
    pub categories: Vec<PaperCategory>,

    /// Latent topics and per-document distributions.
    #[serde(default)]
    pub topics: Option<TopicResult>,

    /// Citation-graph centrality report.
    #[serde(default)]
    pub citations: Option<CentralityReport>,

    /// Co-authorship-graph centrality report.
    #[serde(default)]
    pub collaborations: Option<CentralityReport>,

    /// Publication trend series.
    #[serde(default)]
    pub trends: Option<TrendSeries>,
}
