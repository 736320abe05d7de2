//! Temporal publication trend analysis.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::defaults;
use crate::error::AnalysisError;
use crate::models::{PaperRecord, TrendPoint, TrendSeries, YearMonth};

/// Buckets papers by publication date and derives a smoothed monthly trend.
#[derive(Debug, Clone)]
pub struct TemporalTrendAnalyzer {
    window: usize,
}

impl TemporalTrendAnalyzer {
    /// Create an analyzer with the given trailing moving-average window.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1) }
    }

    /// Bucket the corpus by day and calendar month, then compute a trailing
    /// moving average over the monthly series.
    ///
    /// Undated papers are excluded from the buckets but counted in
    /// [`TrendSeries::undated`] so totals stay auditable.
    #[must_use]
    pub fn trend(&self, papers: &[PaperRecord]) -> TrendSeries {
        let mut daily: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
        let mut monthly: BTreeMap<YearMonth, u64> = BTreeMap::new();
        let mut undated = 0u64;

        for paper in papers {
            match paper.published {
                Some(date) => {
                    *daily.entry(date).or_insert(0) += 1;
                    *monthly.entry(YearMonth::from_date(date)).or_insert(0) += 1;
                }
                None => {
                    let skip = AnalysisError::malformed(&paper.source_id, "publication date");
                    warn!(error = %skip, "record counted as undated");
                    undated += 1;
                }
            }
        }

        let moving_average = self.moving_average(&monthly);
        TrendSeries { daily, monthly, moving_average, undated }
    }

    /// Trailing moving average aligned with the monthly buckets: the value
    /// at bucket i is the mean of buckets i-w+1..=i and absent for the first
    /// w-1 buckets.
    fn moving_average(&self, monthly: &BTreeMap<YearMonth, u64>) -> Vec<TrendPoint> {
        let counts: Vec<(YearMonth, u64)> = monthly.iter().map(|(k, v)| (*k, *v)).collect();
        counts
            .iter()
            .enumerate()
            .map(|(i, &(bucket, _))| {
                let average = if i + 1 >= self.window {
                    let window = &counts[i + 1 - self.window..=i];
                    let sum: u64 = window.iter().map(|(_, count)| count).sum();
                    Some(sum as f64 / self.window as f64)
                } else {
                    None
                };
                TrendPoint { bucket, average }
            })
            .collect()
    }
}

impl Default for TemporalTrendAnalyzer {
    fn default() -> Self {
        Self::new(defaults::TREND_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn paper_on(year: i32, month: u32, day: u32) -> PaperRecord {
        PaperRecord {
            title: format!("paper-{year}-{month}-{day}"),
            published: NaiveDate::from_ymd_opt(year, month, day),
            ..Default::default()
        }
    }

    #[test]
    fn test_buckets_are_chronological() {
        let papers = vec![paper_on(2024, 3, 5), paper_on(2023, 11, 1), paper_on(2024, 3, 5)];
        let series = TemporalTrendAnalyzer::default().trend(&papers);

        let months: Vec<YearMonth> = series.monthly.keys().copied().collect();
        assert_eq!(months[0], YearMonth { year: 2023, month: 11 });
        assert_eq!(months[1], YearMonth { year: 2024, month: 3 });
        assert_eq!(series.monthly[&months[1]], 2);
        assert_eq!(series.daily.len(), 2);
    }

    #[test]
    fn test_moving_average_matches_fixture() {
        // Monthly counts [1, 2, 3, 4] with window 3 -> [None, None, 2.0, 3.0].
        let mut papers = Vec::new();
        for (month, count) in [(1u32, 1), (2, 2), (3, 3), (4, 4)] {
            for day in 1..=count {
                papers.push(paper_on(2024, month, day));
            }
        }
        let series = TemporalTrendAnalyzer::new(3).trend(&papers);
        let averages: Vec<Option<f64>> =
            series.moving_average.iter().map(|p| p.average).collect();
        assert_eq!(averages, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_undated_papers_counted_not_dropped() {
        let papers = vec![paper_on(2024, 1, 1), PaperRecord::default()];
        let series = TemporalTrendAnalyzer::default().trend(&papers);
        assert_eq!(series.undated, 1);
        assert_eq!(series.daily.values().sum::<u64>(), 1);
    }

    #[test]
    fn test_empty_corpus() {
        let series = TemporalTrendAnalyzer::default().trend(&[]);
        assert!(series.daily.is_empty());
        assert!(series.monthly.is_empty());
        assert!(series.moving_average.is_empty());
        assert_eq!(series.undated, 0);
    }
}
