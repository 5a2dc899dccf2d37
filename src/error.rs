use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    #[error("Column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { sheet: String, column: String },

    #[error("Invalid date in sheet '{sheet}' row {row}: {value}")]
    InvalidDate {
        sheet: String,
        row: usize,
        value: String,
    },

    #[error("Unreadable image asset {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
