//! Excel input module
//!
//! Loads `.xlsx`/`.xls` workbooks into the row-of-cells `RawTable`
//! abstraction the normalizer consumes. Spreadsheet layout is absorbed
//! downstream; this module only cares about headers and cells.

mod loader;

pub use loader::ExcelLoader;
