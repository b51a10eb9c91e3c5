// crates/funnelscope-core/src/error.rs

use thiserror::Error;

use funnelscope_parser::{ParserError, SchemaError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Workbook serialization failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Data processing error: {0}")]
    Processing(String),
}

// Schema failures keep their own variant so callers can tell "table
// rejected" apart from transport-level CSV breakage.
impl From<ParserError> for PipelineError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::Schema(schema) => PipelineError::Schema(schema),
            ParserError::Csv(csv) => PipelineError::Csv(csv),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
