//! Excel loader implementation - workbook (.xlsx/.xls) → RawTable

use crate::error::{InsightError, InsightResult};
use crate::types::{Cell, RawTable};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};

/// Loads one worksheet of a workbook into a `RawTable`.
///
/// The first row is the header; every following row becomes cells. By
/// default the first worksheet is read; `with_sheet` selects another.
pub struct ExcelLoader {
    path: PathBuf,
    sheet: Option<String>,
}

impl ExcelLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// Read a named worksheet instead of the first one.
    pub fn with_sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet = Some(name.into());
        self
    }

    /// Load the worksheet into a `RawTable`.
    ///
    /// # Errors
    ///
    /// `Import` if the workbook cannot be opened, the sheet is missing, or
    /// there is no header row followed by at least one data row.
    pub fn load(&self) -> InsightResult<RawTable> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            InsightError::Import(format!(
                "failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| InsightError::Import("workbook has no sheets".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            InsightError::Import(format!("failed to read sheet '{}': {}", sheet_name, e))
        })?;

        self.convert_range(&sheet_name, &range)
    }

    fn convert_range(&self, sheet_name: &str, range: &Range<Data>) -> InsightResult<RawTable> {
        let (height, width) = range.get_size();

        // Need at least header + 1 data row
        if height < 2 || width == 0 {
            return Err(InsightError::Import(format!(
                "sheet '{}' has no data rows",
                sheet_name
            )));
        }

        // Read header row (row 0)
        let mut column_names: Vec<String> = Vec::with_capacity(width);
        for col in 0..width {
            let name = match range.get((0, col)) {
                Some(Data::String(s)) => s.clone(),
                Some(Data::Int(i)) => i.to_string(),
                Some(Data::Float(f)) => f.to_string(),
                _ => format!("col_{}", col),
            };
            column_names.push(name);
        }

        let mut table = RawTable::new(column_names);
        for row in 1..height {
            let mut cells = Vec::with_capacity(width);
            for col in 0..width {
                cells.push(match range.get((row, col)) {
                    Some(data) => convert_cell(data),
                    None => Cell::Empty,
                });
            }
            table.push_row(cells);
        }

        Ok(table)
    }
}

/// Map a calamine cell onto our cell model. Date/error/duration cells fall
/// back to their text rendering so the normalizer can decide what to do.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
