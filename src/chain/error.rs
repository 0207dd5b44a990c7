//! Error types for the chain data model and its persistence.

use std::fmt;

/// Errors raised while assembling, importing or exporting a chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainError {
    /// A call and put share a row index but not a strike.
    LadderMisaligned {
        /// Row index of the mismatch.
        index: usize,
        /// Strike of the call at that row.
        call_strike: f64,
        /// Strike of the put at that row.
        put_strike: f64,
    },

    /// Call and put sequences have different lengths.
    LadderLengthMismatch {
        /// Number of calls.
        calls: usize,
        /// Number of puts.
        puts: usize,
    },

    /// A contract does not belong in the position it was given.
    ContractMismatch {
        /// Description of the mismatch.
        message: String,
    },

    /// Chain-level values are invalid.
    InvalidChain {
        /// Description of the problem.
        message: String,
    },

    /// CSV reading or writing failed.
    Csv {
        /// Underlying error message.
        message: String,
    },

    /// An I/O operation failed.
    Io {
        /// Underlying error message.
        message: String,
    },

    /// Error while serializing chain data.
    SerializationError {
        /// Underlying error message.
        message: String,
    },

    /// Error while deserializing chain data.
    DeserializationError {
        /// Underlying error message.
        message: String,
    },

    /// Snapshot checksum did not match its payload.
    ChecksumMismatch {
        /// Checksum carried by the snapshot.
        expected: String,
        /// Checksum computed from the payload.
        actual: String,
    },

    /// Snapshot was written with an unknown format version.
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::LadderMisaligned {
                index,
                call_strike,
                put_strike,
            } => {
                write!(
                    f,
                    "ladder row {index} is misaligned: call strike {call_strike}, put strike {put_strike}"
                )
            }
            ChainError::LadderLengthMismatch { calls, puts } => {
                write!(f, "ladder has {calls} calls but {puts} puts")
            }
            ChainError::ContractMismatch { message } => {
                write!(f, "contract mismatch: {message}")
            }
            ChainError::InvalidChain { message } => {
                write!(f, "invalid chain: {message}")
            }
            ChainError::Csv { message } => write!(f, "csv error: {message}"),
            ChainError::Io { message } => write!(f, "i/o error: {message}"),
            ChainError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            ChainError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            ChainError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            ChainError::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported snapshot version: {found} (expected {expected})"
                )
            }
        }
    }
}

impl std::error::Error for ChainError {}

impl From<csv::Error> for ChainError {
    fn from(error: csv::Error) -> Self {
        ChainError::Csv {
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for ChainError {
    fn from(error: std::io::Error) -> Self {
        ChainError::Io {
            message: error.to_string(),
        }
    }
}
