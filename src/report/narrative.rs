//! Narrative generation seam.
//!
//! The core never calls an external model itself: it renders a prompt and a
//! quick offline summary, and callers inject a `NarrativeGenerator` built
//! once at startup. No ambient singletons.

use crate::error::InsightResult;
use crate::report::text::{format_money, quick_summary};
use crate::types::SummaryStatistics;

/// Everything a generator needs to write prose about one analysis.
pub struct NarrativeRequest<'a> {
    pub project_name: &'a str,
    /// Pre-rendered text table of the variance rows.
    pub variance_table: &'a str,
    pub summary: &'a SummaryStatistics,
}

/// Produces the narrative section of an analysis report.
///
/// Implementations wrapping an external LLM own their own client handle,
/// timeout policy, and error mapping (`InsightError::Narrative`).
pub trait NarrativeGenerator {
    fn generate(&self, request: &NarrativeRequest<'_>) -> InsightResult<String>;
}

/// Offline generator: formats the summary statistics directly, no external
/// calls. The default for the CLI and the API server.
pub struct QuickNarrative;

impl NarrativeGenerator for QuickNarrative {
    fn generate(&self, request: &NarrativeRequest<'_>) -> InsightResult<String> {
        Ok(quick_summary(request.summary))
    }
}

/// Build the executive-summary prompt for an external model.
///
/// Returned as a plain string so callers can hand it to whatever client
/// they injected; the core receives back an opaque narrative string.
pub fn build_prompt(request: &NarrativeRequest<'_>) -> String {
    let summary = request.summary;
    let overrun = extreme_line(
        &summary.biggest_overrun.category,
        summary.biggest_overrun.amount,
    );
    let underrun = extreme_line(
        &summary.biggest_underrun.category,
        summary.biggest_underrun.amount,
    );

    format!(
        "You are a senior financial analyst preparing an executive summary for a project cost analysis.\n\
         \n\
         **PROJECT**: {project}\n\
         \n\
         **FINANCIAL SUMMARY**:\n\
         - Total Estimated Budget: {estimated}\n\
         - Total Actual Spend: {actual}\n\
         - Net Variance: {variance} ({pct:.1}%)\n\
         - Categories Over Budget: {over}\n\
         - Categories Under Budget: {under}\n\
         \n\
         **KEY VARIANCES**:\n\
         - Largest Overrun: {overrun}\n\
         - Largest Underrun: {underrun}\n\
         \n\
         **DETAILED LINE ITEMS**:\n\
         {table}\n\
         ---\n\
         \n\
         **TASK**: Write a professional executive summary (300-500 words) analyzing this budget \
         performance, structured as: an executive overview of overall performance, an analysis of \
         the 2-3 most significant cost drivers, likely root causes for the variances, and 3-4 \
         actionable recommendations for future cost control.\n\
         \n\
         **STYLE GUIDELINES**:\n\
         - Write in full sentences and well-formed paragraphs (not bullet points)\n\
         - Use professional business language suitable for executives\n\
         - Use specific dollar amounts when discussing significant variances\n\
         - Focus on insights and \"why\", not just repeating numbers\n\
         \n\
         Write your analysis now:\n",
        project = request.project_name,
        estimated = format_money(summary.total_estimated),
        actual = format_money(summary.total_actual),
        variance = format_money(summary.total_variance),
        pct = summary.total_variance_pct,
        over = summary.over_budget_categories,
        under = summary.under_budget_categories,
        overrun = overrun,
        underrun = underrun,
        table = request.variance_table,
    )
}

fn extreme_line(category: &Option<String>, amount: f64) -> String {
    match category {
        Some(name) => format!("{} ({})", name, format_money(amount)),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtremeVariance;

    fn summary() -> SummaryStatistics {
        SummaryStatistics {
            total_estimated: 75000.0,
            total_actual: 80500.0,
            total_variance: 5500.0,
            total_variance_pct: 7.3,
            over_budget_categories: 2,
            under_budget_categories: 1,
            biggest_overrun: ExtremeVariance {
                category: Some("Labor".to_string()),
                amount: 5000.0,
            },
            biggest_underrun: ExtremeVariance {
                category: Some("Materials".to_string()),
                amount: -3000.0,
            },
        }
    }

    #[test]
    fn test_quick_narrative_uses_summary_only() {
        let s = summary();
        let request = NarrativeRequest {
            project_name: "Warehouse",
            variance_table: "ignored",
            summary: &s,
        };

        let narrative = QuickNarrative.generate(&request).unwrap();
        assert!(narrative.contains("Status: OVER BUDGET"));
        assert!(!narrative.contains("ignored"));
    }

    #[test]
    fn test_build_prompt_embeds_project_and_line_items() {
        let s = summary();
        let request = NarrativeRequest {
            project_name: "Warehouse Retrofit",
            variance_table: "Labor  50000  55000  5000  10.0%",
            summary: &s,
        };

        let prompt = build_prompt(&request);
        assert!(prompt.contains("**PROJECT**: Warehouse Retrofit"));
        assert!(prompt.contains("Total Estimated Budget: $75,000.00"));
        assert!(prompt.contains("Largest Overrun: Labor ($5,000.00)"));
        assert!(prompt.contains("Labor  50000  55000  5000  10.0%"));
    }

    #[test]
    fn test_build_prompt_handles_absent_extremes() {
        let mut s = summary();
        s.biggest_overrun = ExtremeVariance::absent();

        let request = NarrativeRequest {
            project_name: "P",
            variance_table: "",
            summary: &s,
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Largest Overrun: none"));
    }
}
