//! Column normalizer: maps an arbitrary `RawTable` to a canonical
//! (category, amount) table.
//!
//! Column identification is an ordered-candidate-list lookup with a
//! deterministic fallback, never fuzzy matching. Two differently-spelled
//! headers for the same concept are distinct on purpose.

use crate::error::{InsightError, InsightResult};
use crate::types::{CanonicalRow, CanonicalTable, Cell, RawTable};

/// Category header candidates, scanned in priority order against
/// lower-cased, trimmed column names.
const CATEGORY_CANDIDATES: [&str; 5] = ["category", "name", "item", "description", "line_item"];

/// Amount header candidates, scanned in priority order.
const AMOUNT_CANDIDATES: [&str; 5] = ["amount", "cost", "value", "price", "total"];

/// Placeholder label for cells with no usable category text. Categories are
/// never the empty string.
const MISSING_CATEGORY: &str = "nan";

/// Normalize an arbitrary table to canonical (category, amount) rows.
///
/// Pure function: row order is preserved, no row is dropped, duplicate
/// categories are left intact (the reconciler's join sums them).
///
/// # Errors
///
/// - `InvalidInput` if the table has no columns.
/// - `NoNumericColumn` if no amount column can be identified.
pub fn normalize(table: &RawTable) -> InsightResult<CanonicalTable> {
    if table.column_count() == 0 {
        return Err(InsightError::InvalidInput(
            "table has no columns".to_string(),
        ));
    }

    let lowered: Vec<String> = table
        .columns()
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();

    let category_idx = select_category_column(&lowered);
    let amount_idx = select_amount_column(table, &lowered)?;

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            CanonicalRow::new(
                category_text(row.get(category_idx).unwrap_or(&Cell::Empty)),
                amount_value(row.get(amount_idx).unwrap_or(&Cell::Empty)),
            )
        })
        .collect();

    Ok(CanonicalTable::new(rows))
}

/// First priority-list hit, else the first column in original order.
fn select_category_column(lowered: &[String]) -> usize {
    CATEGORY_CANDIDATES
        .iter()
        .find_map(|candidate| lowered.iter().position(|name| name == candidate))
        .unwrap_or(0)
}

/// First priority-list hit, else the first column whose values are numeric.
fn select_amount_column(table: &RawTable, lowered: &[String]) -> InsightResult<usize> {
    if let Some(idx) = AMOUNT_CANDIDATES
        .iter()
        .find_map(|candidate| lowered.iter().position(|name| name == candidate))
    {
        return Ok(idx);
    }

    (0..table.column_count())
        .find(|&idx| is_numeric_column(table, idx))
        .ok_or_else(|| {
            InsightError::NoNumericColumn(format!(
                "no amount candidate among columns {:?} and no numeric column to fall back on",
                table.columns()
            ))
        })
}

/// A column is numeric when it holds at least one number and nothing but
/// numbers in its non-empty cells.
fn is_numeric_column(table: &RawTable, index: usize) -> bool {
    let mut saw_number = false;
    for cell in table.column_cells(index) {
        match cell {
            Cell::Number(_) => saw_number = true,
            Cell::Empty => {}
            _ => return false,
        }
    }
    saw_number
}

/// Deterministic string coercion for category cells.
fn category_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                MISSING_CATEGORY.to_string()
            } else {
                s.clone()
            }
        }
        Cell::Number(n) => format_label(*n),
        Cell::Bool(b) => b.to_string(),
        Cell::Empty => MISSING_CATEGORY.to_string(),
    }
}

/// Amount coercion: unparsable or non-finite values become 0 so no row is
/// ever dropped and nothing non-finite enters the reconciler.
fn amount_value(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) if n.is_finite() => *n,
        Cell::Number(_) => 0.0,
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        Cell::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Cell::Empty => 0.0,
    }
}

/// Render a numeric label without trailing zeros ("2024.0" → "2024").
fn format_label(n: f64) -> String {
    if !n.is_finite() {
        return MISSING_CATEGORY.to_string();
    }
    format!("{:.6}", n)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
