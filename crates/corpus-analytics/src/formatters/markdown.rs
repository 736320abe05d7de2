//! Markdown rendering of analysis reports.

use crate::models::AnalysisReport;

/// Render a full report as a Markdown digest.
///
/// String assembly only; writing the digest anywhere is the caller's
/// responsibility.
#[must_use]
pub fn render_report(report: &AnalysisReport) -> String {
    let mut output = String::from("# Corpus Analysis Report\n\n");

    output.push_str("## Summary\n\n");
    output.push_str(&format!("- Total papers: {}\n", report.summary.total_papers));
    match (report.summary.first_year, report.summary.last_year) {
        (Some(first), Some(last)) => {
            output.push_str(&format!("- Time span: {first} - {last}\n"));
        }
        _ => output.push_str("- Time span: n/a\n"),
    }
    output.push_str(&format!("- Distinct authors: {}\n", report.summary.distinct_authors));
    if report.summary.undated > 0 {
        output.push_str(&format!("- Undated papers: {}\n", report.summary.undated));
    }
    output.push('\n');

    if let Some(topics) = &report.topics {
        output.push_str("## Research Topics\n\n");
        for topic in &topics.topics {
            output.push_str(&format!("### Topic {}\n", topic.id));
            output.push_str(&format!("Keywords: {}\n\n", topic.terms.join(", ")));
        }
    }

    if let Some(citations) = &report.citations {
        output.push_str("## Citation Network\n\n");
        output.push_str("### Most Influential Papers\n\n");
        for entry in &citations.top_ranked {
            output.push_str(&format!("- {}: {:.4}\n", entry.name, entry.score));
        }
        output.push_str(&format!(
            "\nNetwork density: {:.4} | Average clustering: {:.4}\n\n",
            citations.density, citations.average_clustering
        ));
    }

    if let Some(collaborations) = &report.collaborations {
        output.push_str("## Author Collaboration\n\n");
        output.push_str("### Core Authors\n\n");
        for entry in &collaborations.top_ranked {
            output.push_str(&format!("- {}: {:.4}\n", entry.name, entry.score));
        }
        output.push_str(&format!(
            "\nNetwork density: {:.4} | Average clustering: {:.4}\n\n",
            collaborations.density, collaborations.average_clustering
        ));
    }

    if let Some(trends) = &report.trends {
        output.push_str("## Publication Trend\n\n");
        output.push_str("### Monthly Counts\n\n");
        for (bucket, count) in &trends.monthly {
            output.push_str(&format!("- {bucket}: {count} papers\n"));
        }
        let smoothed: Vec<String> = trends
            .moving_average
            .iter()
            .filter_map(|point| {
                point.average.map(|avg| format!("{}: {avg:.1}", point.bucket))
            })
            .collect();
        if !smoothed.is_empty() {
            output.push_str("\n### Smoothed Trend (3-month mean)\n\n");
            for line in smoothed {
                output.push_str(&format!("- {line}\n"));
            }
        }
        if trends.undated > 0 {
            output.push_str(&format!("\n{} papers had no publication date.\n", trends.undated));
        }
    }

    output
}
