use thiserror::Error;

#[derive(Error, Debug)]
pub enum KasboekError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Statement file is missing required column: {0}")]
    MissingColumn(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KasboekError>;
