use crate::domain::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Camera unavailable. Please ask an attendant for assistance.")]
    CameraUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Upload error: {0}")]
    UploadError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Command error: {0}")]
    CommandError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, KioskError>;
