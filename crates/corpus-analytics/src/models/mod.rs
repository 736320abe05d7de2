//! Data models: input paper records and analysis result types.
//!
//! All models use `#[serde(default)]` for optional fields so callers can
//! deserialize partial records from heterogeneous sources.

mod paper;
mod report;

pub use paper::{PaperRecord, Reference};
pub use report::{
    AnalysisReport, CentralityReport, CorpusSummary, PaperCategory, RankedEntity, TopicResult,
    TopicSummary, TrendPoint, TrendSeries, YearMonth,
};
