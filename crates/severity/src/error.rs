use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeverityError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Unknown label: '{0}' (expected one of Mild, Moderate, Severe)")]
    UnknownLabel(String),

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Length mismatch: {records} records but {predictions} predictions")]
    LengthMismatch { records: usize, predictions: usize },

    #[error("Row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: Box<SeverityError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeverityError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        SeverityError::MissingField { field: field.into() }
    }

    /// Attach a row index to an error raised while processing a single record.
    pub fn at_row(self, row: usize) -> Self {
        match self {
            SeverityError::Record { .. } => self,
            other => SeverityError::Record {
                row,
                source: Box::new(other),
            },
        }
    }

    /// The underlying per-record error, looking through any row context.
    pub fn root(&self) -> &SeverityError {
        match self {
            SeverityError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeverityError>;
