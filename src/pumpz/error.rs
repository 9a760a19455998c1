use crate::model::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PumpzError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("No edit in progress")]
    NoActiveEdit,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Page size {0} is not one of the allowed sizes")]
    InvalidPageSize(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PumpzError>;
