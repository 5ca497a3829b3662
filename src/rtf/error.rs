//! Error types for RTF parsing.
//!
//! Malformed RTF never produces an error: lexical, structural, reference,
//! payload and encoding anomalies are all recovered inside the parser. The
//! variants below cover the few conditions a caller has to act on.

use thiserror::Error;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF parsing errors.
#[derive(Error, Debug)]
pub enum RtfError {
    /// The input stream could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Brace nesting exceeded the configured limit.
    #[error("RTF group nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// The progress callback requested cancellation.
    #[error("RTF parsing cancelled at position {position}")]
    Cancelled { position: usize },

    /// A compressed RTF container header could not be read.
    #[error("Invalid compressed RTF header: {0}")]
    InvalidCompressedHeader(String),

    /// A compressed RTF container used an unknown compression signature.
    #[error("Unknown RTF compression type: {0:02x?}")]
    UnknownCompression([u8; 4]),

    /// Document data could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
