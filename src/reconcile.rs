//! Variance reconciler: outer-joins two canonical tables on exact category
//! equality, computes per-category variance, classifies category overlap,
//! and derives aggregate statistics.
//!
//! Matching is exact string equality. No case-folding beyond what the
//! normalizer already applied, no trimming, no fuzzy matching: two
//! differently-spelled labels for the same real-world item are distinct
//! categories. Known limitation, not a bug.

use std::collections::HashMap;

use crate::error::{InsightError, InsightResult};
use crate::types::{
    CanonicalTable, CategoryAmount, CategoryMatchReport, ExtremeVariance, MatchSummary,
    MatchedCategory, SummaryStatistics, VarianceRow,
};

/// Reconcile an estimate table against an actual table.
///
/// Duplicate categories within one side are summed before the join
/// (additive contributions to that side's total), so repeated keys can
/// never drop or multiply rows. The join emits estimate-side categories in
/// first-occurrence order, then actual-only categories in first-occurrence
/// order; the output is deterministic for identical input.
///
/// # Errors
///
/// `InvalidInput` if either table is empty or contains rows violating the
/// canonical invariants (empty category, non-finite amount).
pub fn reconcile(
    estimate: &CanonicalTable,
    actual: &CanonicalTable,
) -> InsightResult<(Vec<VarianceRow>, CategoryMatchReport)> {
    validate_table(estimate, "estimate")?;
    validate_table(actual, "actual")?;

    let estimate_totals = aggregate_by_category(estimate);
    let actual_totals = aggregate_by_category(actual);

    let estimate_index: HashMap<&str, f64> = estimate_totals
        .iter()
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();
    let actual_index: HashMap<&str, f64> = actual_totals
        .iter()
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();

    let mut rows = Vec::with_capacity(estimate_totals.len() + actual_totals.len());
    for (category, estimated) in &estimate_totals {
        let actual_amount = actual_index.get(category.as_str()).copied().unwrap_or(0.0);
        rows.push(variance_row(category.clone(), *estimated, actual_amount));
    }
    for (category, actual_amount) in &actual_totals {
        if !estimate_index.contains_key(category.as_str()) {
            rows.push(variance_row(category.clone(), 0.0, *actual_amount));
        }
    }

    let report = classify(&rows, &estimate_index);
    Ok((rows, report))
}

/// Aggregate over a variance-row sequence. Pure and total: an empty input
/// yields zero totals, zero counts, and absent extremes.
pub fn summarize(rows: &[VarianceRow]) -> SummaryStatistics {
    let total_estimated: f64 = rows.iter().map(|r| r.estimated).sum();
    let total_actual: f64 = rows.iter().map(|r| r.actual).sum();
    let total_variance: f64 = rows.iter().map(|r| r.variance).sum();

    let over_budget_categories = rows.iter().filter(|r| r.variance > 0.0).count();
    let under_budget_categories = rows.iter().filter(|r| r.variance < 0.0).count();

    // Strict comparisons keep the first occurrence on ties.
    let mut biggest_overrun = ExtremeVariance::absent();
    let mut biggest_underrun = ExtremeVariance::absent();
    for row in rows {
        if row.variance > 0.0
            && (biggest_overrun.category.is_none() || row.variance > biggest_overrun.amount)
        {
            biggest_overrun = ExtremeVariance {
                category: Some(row.category.clone()),
                amount: row.variance,
            };
        }
        if row.variance < 0.0
            && (biggest_underrun.category.is_none() || row.variance < biggest_underrun.amount)
        {
            biggest_underrun = ExtremeVariance {
                category: Some(row.category.clone()),
                amount: row.variance,
            };
        }
    }

    SummaryStatistics {
        total_estimated,
        total_actual,
        total_variance,
        total_variance_pct: variance_pct(total_variance, total_estimated),
        over_budget_categories,
        under_budget_categories,
        biggest_overrun,
        biggest_underrun,
    }
}

/// Sum amounts per category, preserving first-occurrence order.
fn aggregate_by_category(table: &CanonicalTable) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in &table.rows {
        if let Some(&position) = index.get(row.category.as_str()) {
            totals[position].1 += row.amount;
        } else {
            index.insert(row.category.as_str(), totals.len());
            totals.push((row.category.clone(), row.amount));
        }
    }
    totals
}

fn variance_row(category: String, estimated: f64, actual: f64) -> VarianceRow {
    let variance = actual - estimated;
    VarianceRow {
        category,
        estimated,
        actual,
        variance,
        variance_pct: variance_pct(variance, estimated),
    }
}

/// Variance percentage with the zero guard: an undefined percentage against
/// a zero base is "no percentage", never an infinity.
fn variance_pct(variance: f64, estimated: f64) -> f64 {
    if estimated == 0.0 {
        return 0.0;
    }
    let pct = (variance / estimated) * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Partition the joined categories into matched / estimate-only /
/// actual-only using the non-zero-presence rule: an explicit zero on a side
/// reads as "no real spend recorded" there. A category that aggregated to
/// zero on both sides is bucketed by the side it physically appeared on
/// (estimate wins), so the partition always covers the whole union.
fn classify(rows: &[VarianceRow], estimate_index: &HashMap<&str, f64>) -> CategoryMatchReport {
    let mut matched = Vec::new();
    let mut estimate_only = Vec::new();
    let mut actual_only = Vec::new();

    for row in rows {
        let on_estimate_side = estimate_index.contains_key(row.category.as_str());
        match (row.estimated != 0.0, row.actual != 0.0) {
            (true, true) => matched.push(MatchedCategory {
                category: row.category.clone(),
                estimated: row.estimated,
                actual: row.actual,
            }),
            (true, false) => estimate_only.push(CategoryAmount {
                category: row.category.clone(),
                amount: row.estimated,
            }),
            (false, true) => actual_only.push(CategoryAmount {
                category: row.category.clone(),
                amount: row.actual,
            }),
            (false, false) => {
                if on_estimate_side {
                    estimate_only.push(CategoryAmount {
                        category: row.category.clone(),
                        amount: 0.0,
                    });
                } else {
                    actual_only.push(CategoryAmount {
                        category: row.category.clone(),
                        amount: 0.0,
                    });
                }
            }
        }
    }

    let estimate_category_count = matched.len() + estimate_only.len();
    let match_rate_pct = matched.len() as f64 / estimate_category_count.max(1) as f64 * 100.0;

    CategoryMatchReport {
        match_summary: MatchSummary {
            total_matched: matched.len(),
            total_estimate_only: estimate_only.len(),
            total_actual_only: actual_only.len(),
            match_rate_pct,
        },
        matched,
        estimate_only,
        actual_only,
    }
}

fn validate_table(table: &CanonicalTable, side: &str) -> InsightResult<()> {
    if table.is_empty() {
        return Err(InsightError::InvalidInput(format!(
            "{side} table has no rows"
        )));
    }
    for (i, row) in table.rows.iter().enumerate() {
        if row.category.is_empty() {
            return Err(InsightError::InvalidInput(format!(
                "{side} table row {i} has an empty category"
            )));
        }
        if !row.amount.is_finite() {
            return Err(InsightError::InvalidInput(format!(
                "{side} table row {i} has a non-finite amount"
            )));
        }
    }
    Ok(())
}
