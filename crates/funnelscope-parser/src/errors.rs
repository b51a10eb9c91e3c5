use thiserror::Error;

/// The export is missing one or more required columns. Nothing downstream
/// runs once this is raised; the table is rejected whole.
#[derive(Debug, Clone, Error)]
#[error("export is missing required columns: {}", missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
