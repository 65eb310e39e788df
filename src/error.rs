use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field '{field}' in row {row} of {file}")]
    MissingField {
        field: String,
        row: usize,
        file: String,
    },

    #[error("Missing column '{column}' in {file}")]
    MissingColumn { column: String, file: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
