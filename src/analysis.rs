//! End-to-end analysis pipeline: workbooks in, serializable report out.
//!
//! Shared by the CLI and the HTTP API so both surfaces produce identical
//! results for identical input.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::InsightResult;
use crate::excel::ExcelLoader;
use crate::report::text::render_variance_table;
use crate::report::{NarrativeGenerator, NarrativeRequest};
use crate::types::{CategoryMatchReport, RawTable, SummaryStatistics, VarianceRow};
use crate::{normalize, reconcile};

/// Options for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub project_name: String,
    /// Worksheet to read from both workbooks; first sheet when `None`.
    pub sheet: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            project_name: "Unnamed Project".to_string(),
            sheet: None,
        }
    }
}

/// Complete result of one analysis: plain nested data, ready for JSON
/// serialization toward API clients or a persistence collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub project_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub variance: Vec<VarianceRow>,
    pub match_report: CategoryMatchReport,
    pub summary: SummaryStatistics,
    pub narrative: String,
}

/// Analyze two already-loaded raw tables.
pub fn analyze_tables(
    estimate: &RawTable,
    actual: &RawTable,
    options: &AnalysisOptions,
    generator: &dyn NarrativeGenerator,
) -> InsightResult<AnalysisReport> {
    let estimate_canonical = normalize::normalize(estimate)?;
    let actual_canonical = normalize::normalize(actual)?;

    let (variance, match_report) = reconcile::reconcile(&estimate_canonical, &actual_canonical)?;
    let summary = reconcile::summarize(&variance);

    let variance_table = render_variance_table(&variance);
    let narrative = generator.generate(&NarrativeRequest {
        project_name: &options.project_name,
        variance_table: &variance_table,
        summary: &summary,
    })?;

    Ok(AnalysisReport {
        project_name: options.project_name.clone(),
        analyzed_at: Utc::now(),
        variance,
        match_report,
        summary,
        narrative,
    })
}

/// Load both workbooks and analyze them.
pub fn analyze_files(
    estimate_path: &Path,
    actual_path: &Path,
    options: &AnalysisOptions,
    generator: &dyn NarrativeGenerator,
) -> InsightResult<AnalysisReport> {
    let estimate = load_workbook(estimate_path, options)?;
    let actual = load_workbook(actual_path, options)?;
    analyze_tables(&estimate, &actual, options, generator)
}

fn load_workbook(path: &Path, options: &AnalysisOptions) -> InsightResult<RawTable> {
    let mut loader = ExcelLoader::new(path);
    if let Some(sheet) = &options.sheet {
        loader = loader.with_sheet(sheet.clone());
    }
    loader.load()
}
