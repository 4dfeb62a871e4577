use thiserror::Error;

pub type InsightResult<T> = Result<T, InsightError>;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("No numeric amount column found: {0}")]
    NoNumericColumn(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Narrative error: {0}")]
    Narrative(String),
}
