//! Compact JSON views of analysis reports.

use serde_json::{Value, json};

use crate::models::AnalysisReport;

/// Create a compact report representation for downstream consumers that
/// only need the headline results, not the full per-node metric maps.
#[must_use]
pub fn compact_report(report: &AnalysisReport) -> Value {
    let mut obj = json!({
        "total_papers": report.summary.total_papers,
        "distinct_authors": report.summary.distinct_authors,
    });

    if let (Some(first), Some(last)) = (report.summary.first_year, report.summary.last_year) {
        obj["time_span"] = json!([first, last]);
    }

    if report.summary.undated > 0 {
        obj["undated"] = json!(report.summary.undated);
    }

    if let Some(topics) = &report.topics {
        obj["topics"] = json!(
            topics
                .topics
                .iter()
                .map(|topic| json!({"id": topic.id, "terms": topic.terms}))
                .collect::<Vec<_>>()
        );
    }

    if let Some(citations) = &report.citations {
        obj["influential_papers"] = json!(citations.top_ranked);
        obj["citation_density"] = json!(citations.density);
    }

    if let Some(collaborations) = &report.collaborations {
        obj["core_authors"] = json!(collaborations.top_ranked);
        obj["collaboration_density"] = json!(collaborations.density);
    }

    if let Some(trends) = &report.trends {
        obj["monthly_counts"] = serde_json::to_value(&trends.monthly).unwrap_or_default();
    }

    obj
}
