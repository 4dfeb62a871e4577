//! Estimate Insight - estimate vs actual spending analysis
//!
//! This library compares budgeted ("estimate") spending against actual
//! spending supplied as spreadsheets, reconciles heterogeneous category
//! labels across the two sides, and derives per-category variance plus
//! aggregate statistics.
//!
//! # Features
//!
//! - Column normalization for arbitrary spreadsheet layouts
//! - Full outer join on category with duplicate-row summation
//! - Category match report (matched / estimate-only / actual-only)
//! - Summary statistics with quick narrative and LLM prompt rendering
//! - Excel import (.xlsx/.xls) and Excel/JSON report export
//!
//! # Example
//!
//! ```no_run
//! use estimate_insight::analysis::{analyze_files, AnalysisOptions};
//! use estimate_insight::report::QuickNarrative;
//! use std::path::Path;
//!
//! let report = analyze_files(
//!     Path::new("estimate.xlsx"),
//!     Path::new("actual.xlsx"),
//!     &AnalysisOptions::default(),
//!     &QuickNarrative,
//! )?;
//!
//! println!("Categories: {}", report.variance.len());
//! println!("{}", report.narrative);
//! # Ok::<(), estimate_insight::error::InsightError>(())
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{InsightError, InsightResult};
pub use types::{
    CanonicalRow, CanonicalTable, CategoryMatchReport, Cell, RawTable, SummaryStatistics,
    VarianceRow,
};
