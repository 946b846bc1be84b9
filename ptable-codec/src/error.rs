#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("invalid UTF-16 encoding")]
    InvalidEncoding,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The encoded string plus its terminator does not fit the field.
    #[error("encoded string needs {needed} bytes, field holds {capacity}")]
    TooLong { needed: usize, capacity: usize },

    #[error("record size {size} is below the minimum of {minimum} bytes")]
    RecordTooSmall { size: usize, minimum: usize },

    #[error("expected {expected} entries, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}
