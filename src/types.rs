use serde::Serialize;

//==============================================================================
// Raw Input Tables
//==============================================================================

/// A single spreadsheet cell as loaded from a workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Numeric cell (integers are widened to f64 on load)
    Number(f64),
    /// Text cell
    Text(String),
    /// Boolean cell
    Bool(bool),
    /// Empty or missing cell
    Empty,
}

impl Cell {
    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// An arbitrary tabular input: ordered column names plus rows of cells.
///
/// Column names are author-supplied and may be arbitrarily cased, padded
/// with whitespace, and in any order. The normalizer absorbs that
/// variability; `RawTable` itself just preserves what the file said.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the cells of a single column, top to bottom.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

//==============================================================================
// Canonical Tables
//==============================================================================

/// One normalized row: a category label and a finite amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRow {
    pub category: String,
    pub amount: f64,
}

impl CanonicalRow {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// The canonical two-column (category, amount) representation produced by
/// the normalizer and consumed by the reconciler.
///
/// Category values are not guaranteed unique; duplicates are left intact
/// here and summed by the reconciler's join.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalTable {
    pub rows: Vec<CanonicalRow>,
}

impl CanonicalTable {
    pub fn new(rows: Vec<CanonicalRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//==============================================================================
// Variance Output
//==============================================================================

/// Per-category variance between the estimate and actual sides.
///
/// Invariants: `variance = actual - estimated`; `variance_pct` is 0 when
/// `estimated` is 0 (an undefined percentage against a zero base is "no
/// percentage", not an error).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceRow {
    pub category: String,
    pub estimated: f64,
    pub actual: f64,
    pub variance: f64,
    pub variance_pct: f64,
}

//==============================================================================
// Category Match Report
//==============================================================================

/// A category present with spend on both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedCategory {
    pub category: String,
    pub estimated: f64,
    pub actual: f64,
}

/// A category present with spend on one side only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// Counts over the three match buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub total_matched: usize,
    pub total_estimate_only: usize,
    pub total_actual_only: usize,
    pub match_rate_pct: f64,
}

/// Classifies every category from the union of both tables into exactly one
/// of three disjoint buckets. Computed once per reconciliation, immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatchReport {
    pub matched: Vec<MatchedCategory>,
    pub estimate_only: Vec<CategoryAmount>,
    pub actual_only: Vec<CategoryAmount>,
    pub match_summary: MatchSummary,
}

//==============================================================================
// Summary Statistics
//==============================================================================

/// The single largest overrun or underrun. `category` is `None` (with a
/// zero amount) when no qualifying row exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeVariance {
    pub category: Option<String>,
    pub amount: f64,
}

impl ExtremeVariance {
    pub fn absent() -> Self {
        Self {
            category: None,
            amount: 0.0,
        }
    }
}

/// Aggregate statistics over a variance-row sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_estimated: f64,
    pub total_actual: f64,
    pub total_variance: f64,
    pub total_variance_pct: f64,
    pub over_budget_categories: usize,
    pub under_budget_categories: usize,
    pub biggest_overrun: ExtremeVariance,
    pub biggest_underrun: ExtremeVariance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut table = RawTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![Cell::Number(1.0)]);

        assert_eq!(table.rows()[0].len(), 2);
        assert_eq!(table.rows()[0][1], Cell::Empty);
    }

    #[test]
    fn test_push_row_truncates_long_rows() {
        let mut table = RawTable::new(vec!["a".to_string()]);
        table.push_row(vec![Cell::Number(1.0), Cell::Number(2.0)]);

        assert_eq!(table.rows()[0].len(), 1);
    }

    #[test]
    fn test_column_cells_iterates_in_row_order() {
        let mut table = RawTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![Cell::Number(1.0), Cell::Text("x".to_string())]);
        table.push_row(vec![Cell::Number(2.0), Cell::Text("y".to_string())]);

        let cells: Vec<&Cell> = table.column_cells(0).collect();
        assert_eq!(cells, vec![&Cell::Number(1.0), &Cell::Number(2.0)]);
    }

    #[test]
    fn test_extreme_variance_absent() {
        let extreme = ExtremeVariance::absent();
        assert!(extreme.category.is_none());
        assert_eq!(extreme.amount, 0.0);
    }

    #[test]
    fn test_variance_row_serialization_field_names() {
        let row = VarianceRow {
            category: "Labor".to_string(),
            estimated: 100.0,
            actual: 110.0,
            variance: 10.0,
            variance_pct: 10.0,
        };
        let json = serde_json::to_string(&row).unwrap();

        assert!(json.contains("\"category\":\"Labor\""));
        assert!(json.contains("\"variance_pct\":10.0"));
    }
}
