use thiserror::Error;

/// Reasons a dataset file cannot be turned into records.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Expected top-level JSON array of page records")]
    NotAnArray,

    #[error("Row {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("Missing '{0}' column")]
    MissingColumn(&'static str),
}
