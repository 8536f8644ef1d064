use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported catalog {0}: expected a .json file or a directory with carriers.parquet and plans.parquet")]
    UnsupportedCatalog(PathBuf),

    #[error("missing column '{column}' in {table}")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("invalid value in {table}.{column} at row {row}")]
    InvalidValue {
        table: &'static str,
        column: &'static str,
        row: usize,
    },

    #[error("refusing to overwrite existing record: {0}")]
    AlreadyExists(PathBuf),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
