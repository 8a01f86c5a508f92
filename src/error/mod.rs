use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeqmarkError {
    /// Requested length is zero, negative or not a number
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Nothing left to count once the marker is excised
    #[error("no data to analyze: sequence is empty after removing the marker")]
    EmptySequence,

    /// Identifier or description unusable in a header line
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Marker text that would break the record layout
    #[error("invalid marker: {0}")]
    InvalidMarker(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SeqmarkError>;
