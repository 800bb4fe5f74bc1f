//! Error types for Tricodec operations.
//!
//! Only conditions that leave a call with nothing sensible to return are
//! errors. Recoverable stream damage (skipped runs, malformed escapes, a
//! decoded length that disagrees with the declared one) is reported through
//! [`DecodeOutcome`](crate::outcome::DecodeOutcome) instead.

use std::io;
use thiserror::Error;

/// The main error type for Tricodec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The caller passed inconsistent parameters.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// A side-metadata field required for decoding was not supplied.
    #[error("Missing metadata: {field} is required to decode this payload")]
    MissingMetadata {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A transmitted Huffman code table cannot form a prefix tree.
    #[error("Invalid code table: {message}")]
    InvalidCodeTable {
        /// Description of the table defect.
        message: String,
    },

    /// The stream is damaged in a way that has no safe reinterpretation.
    #[error("Corrupt stream at offset {offset}: {message}")]
    CorruptStream {
        /// Byte offset where the damage was detected.
        offset: u64,
        /// Description of the damage.
        message: String,
    },

    /// CRC-32 of the decoded data does not match the recorded checksum.
    #[error("Integrity mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    IntegrityMismatch {
        /// Checksum recorded at compression time.
        expected: u32,
        /// Checksum of the decoded data.
        computed: u32,
    },
}

/// Result type alias for Tricodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a missing metadata error.
    pub fn missing_metadata(field: &'static str) -> Self {
        Self::MissingMetadata { field }
    }

    /// Create an invalid code table error.
    pub fn invalid_code_table(message: impl Into<String>) -> Self {
        Self::InvalidCodeTable {
            message: message.into(),
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            offset,
            message: message.into(),
        }
    }

    /// Create an integrity mismatch error.
    pub fn integrity_mismatch(expected: u32, computed: u32) -> Self {
        Self::IntegrityMismatch { expected, computed }
    }
}
