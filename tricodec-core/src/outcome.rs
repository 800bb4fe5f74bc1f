//! Tagged decode results.
//!
//! Every decoder in Tricodec follows a "return some output" policy for
//! damaged input. Instead of failing, a decoder skips or reinterprets the
//! offending unit and records what it did. The caller gets the bytes together
//! with a [`DecodeOutcome`] that says how much to trust them:
//!
//! - [`DecodeOutcome::Exact`]: the stream decoded cleanly.
//! - [`DecodeOutcome::Degraded`]: best-effort recovery, see the warnings.
//! - [`DecodeOutcome::Placeholder`]: decoding was abandoned and the data is a
//!   zero-filled buffer of the estimated size. It is not a domain value.

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable defect found while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// A run length outside 1..=255 was skipped.
    InvalidRunLength {
        /// Offset of the run record in the payload.
        offset: usize,
        /// The offending run length.
        run_length: u8,
    },
    /// The payload ended in the middle of a token.
    TruncatedToken {
        /// Offset of the incomplete token.
        offset: usize,
    },
    /// A back-reference pointed outside the produced output.
    InvalidMatch {
        /// Offset of the match token in the payload.
        offset: usize,
        /// Decoded distance.
        distance: usize,
        /// Decoded length.
        length: usize,
    },
    /// An escape byte that does not start a valid sequence was kept as a literal.
    MalformedEscape {
        /// Offset of the escape byte.
        offset: usize,
    },
    /// A bit path left the Huffman tree.
    InvalidCodePath {
        /// Bit position where the walk failed.
        bit_position: u64,
    },
    /// The payload format was not recorded and had to be inferred.
    ModeInferred {
        /// Format the decoder settled on.
        mode: String,
    },
    /// The reconstructed length differed from the declared length.
    SizeMismatch {
        /// Declared original length.
        expected: usize,
        /// Length actually reconstructed from the stream.
        actual: usize,
    },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRunLength { offset, run_length } => {
                write!(f, "invalid run length {run_length} at offset {offset}, pair skipped")
            }
            Self::TruncatedToken { offset } => write!(f, "truncated token at offset {offset}"),
            Self::InvalidMatch {
                offset,
                distance,
                length,
            } => write!(
                f,
                "invalid match at offset {offset} (distance {distance}, length {length}), escape kept as literal"
            ),
            Self::MalformedEscape { offset } => {
                write!(f, "malformed escape sequence at offset {offset}, kept as literal")
            }
            Self::InvalidCodePath { bit_position } => {
                write!(f, "bit path leaves the code tree at bit {bit_position}")
            }
            Self::ModeInferred { mode } => {
                write!(f, "format not recorded, decoded as {mode}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected} bytes, reconstructed {actual}")
            }
        }
    }
}

/// How far a decoded buffer can be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeOutcome {
    /// The stream decoded without any recovery.
    #[default]
    Exact,
    /// The stream was decoded with local recovery.
    Degraded {
        /// What was skipped or reinterpreted.
        warnings: Vec<DecodeWarning>,
    },
    /// Decoding was abandoned and a zero-filled placeholder returned.
    Placeholder {
        /// Why the decoder gave up.
        reason: String,
    },
}

impl DecodeOutcome {
    /// True for a clean decode.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }

    /// True when the data is a placeholder rather than decoded content.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Warnings recorded during a degraded decode.
    pub fn warnings(&self) -> &[DecodeWarning] {
        match self {
            Self::Degraded { warnings } => warnings,
            _ => &[],
        }
    }
}

/// Output of a decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Decoded bytes.
    pub data: Vec<u8>,
    /// Trust level of `data`.
    pub outcome: DecodeOutcome,
}

impl Decoded {
    /// A clean decode.
    pub fn exact(data: Vec<u8>) -> Self {
        Self {
            data,
            outcome: DecodeOutcome::Exact,
        }
    }

    /// A zero-filled placeholder of `len` bytes.
    pub fn placeholder(len: usize, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(len, %reason, "returning zero-filled placeholder");
        Self {
            data: vec![0; len],
            outcome: DecodeOutcome::Placeholder { reason },
        }
    }

    /// Consume and return the bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Collects warnings for a single decode call.
///
/// Each recorded warning is also emitted as a `tracing` event under the
/// codec's name.
#[derive(Debug)]
pub struct Diagnostics {
    codec: &'static str,
    warnings: Vec<DecodeWarning>,
}

impl Diagnostics {
    /// Create an empty collector for the named codec.
    pub fn new(codec: &'static str) -> Self {
        Self {
            codec,
            warnings: Vec::new(),
        }
    }

    /// Record a warning.
    pub fn warn(&mut self, warning: DecodeWarning) {
        tracing::warn!(codec = self.codec, "{warning}");
        self.warnings.push(warning);
    }

    /// Number of warnings recorded so far.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Pair the collected warnings with the decoded data.
    pub fn finish(self, data: Vec<u8>) -> Decoded {
        let outcome = if self.warnings.is_empty() {
            DecodeOutcome::Exact
        } else {
            DecodeOutcome::Degraded {
                warnings: self.warnings,
            }
        };
        Decoded { data, outcome }
    }
}

/// Reject a declared length that the payload cannot possibly describe.
///
/// Declared lengths come from side-metadata or the command line and size
/// the output buffer, so they are checked against `ceiling`, the most the
/// payload could decode to, before anything is allocated.
pub fn ensure_declared_len(codec: &'static str, declared: usize, ceiling: usize) -> Result<()> {
    if declared > ceiling {
        return Err(CodecError::invalid_input(format!(
            "{codec}: declared length {declared} exceeds the {ceiling} bytes this payload can decode to"
        )));
    }
    Ok(())
}

/// Decoder output capped at the declared original length.
///
/// Writes past the limit are counted but dropped, so a corrupt stream can
/// never make a decoder allocate more than the caller declared.
#[derive(Debug)]
pub struct BoundedOutput {
    data: Vec<u8>,
    limit: usize,
    produced: usize,
}

impl BoundedOutput {
    /// Create an empty buffer that keeps at most `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(limit),
            limit,
            produced: 0,
        }
    }

    /// Like [`new`](Self::new), without reserving `limit` bytes up front.
    ///
    /// For limits that are a ceiling rather than an expected size.
    pub fn unreserved(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
            produced: 0,
        }
    }

    /// Append one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if self.data.len() < self.limit {
            self.data.push(byte);
        }
        self.produced += 1;
    }

    /// Append `count` copies of `byte`.
    pub fn push_repeated(&mut self, byte: u8, count: usize) {
        let room = self.limit - self.data.len();
        self.data.extend(std::iter::repeat_n(byte, count.min(room)));
        self.produced += count;
    }

    /// Byte at `index` of the kept output.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Number of bytes kept.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing has been kept.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True once the limit is reached.
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.limit
    }

    /// Number of bytes the stream described, including dropped ones.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Zero-pad to the limit, recording a [`DecodeWarning::SizeMismatch`]
    /// when the stream described a different length, and pair the data with
    /// the collected warnings.
    pub fn finish(mut self, mut diag: Diagnostics) -> Decoded {
        if self.produced != self.limit {
            diag.warn(DecodeWarning::SizeMismatch {
                expected: self.limit,
                actual: self.produced,
            });
            self.data.resize(self.limit, 0);
        }
        diag.finish(self.data)
    }

    /// Pair the kept bytes with the collected warnings without padding.
    ///
    /// Used when the limit is only a ceiling. A
    /// [`DecodeWarning::SizeMismatch`] is recorded only when bytes were
    /// dropped.
    pub fn finish_unpadded(self, mut diag: Diagnostics) -> Decoded {
        if self.produced > self.limit {
            diag.warn(DecodeWarning::SizeMismatch {
                expected: self.limit,
                actual: self.produced,
            });
        }
        diag.finish(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_finish_is_exact() {
        let diag = Diagnostics::new("test");
        let decoded = diag.finish(vec![1, 2, 3]);
        assert!(decoded.outcome.is_exact());
        assert!(decoded.outcome.warnings().is_empty());
    }

    #[test]
    fn test_bounded_output_pads_short_stream() {
        let mut out = BoundedOutput::new(4);
        out.push(7);
        out.push(7);
        let decoded = out.finish(Diagnostics::new("test"));
        assert_eq!(decoded.data, vec![7, 7, 0, 0]);
        assert_eq!(
            decoded.outcome.warnings(),
            &[DecodeWarning::SizeMismatch {
                expected: 4,
                actual: 2
            }]
        );
    }

    #[test]
    fn test_bounded_output_drops_overflow() {
        let mut out = BoundedOutput::new(3);
        out.push_repeated(1, 2);
        out.push_repeated(2, 5);
        assert!(out.is_full());
        assert_eq!(out.len(), 3);
        assert_eq!(out.produced(), 7);
        let decoded = out.finish(Diagnostics::new("test"));
        assert_eq!(decoded.data, vec![1, 1, 2]);
        assert!(!decoded.outcome.is_exact());
    }

    #[test]
    fn test_bounded_output_exact_length() {
        let mut out = BoundedOutput::new(3);
        out.push_repeated(9, 3);
        let decoded = out.finish(Diagnostics::new("test"));
        assert!(decoded.outcome.is_exact());
        assert_eq!(decoded.data, vec![9, 9, 9]);
    }

    #[test]
    fn test_finish_unpadded() {
        let mut out = BoundedOutput::new(8);
        out.push_repeated(4, 3);
        let decoded = out.finish_unpadded(Diagnostics::new("test"));
        assert_eq!(decoded.data, vec![4, 4, 4]);
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_ensure_declared_len() {
        assert!(ensure_declared_len("test", 10, 10).is_ok());
        let err = ensure_declared_len("test", usize::MAX / 2, 10).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput { .. }));
        assert!(err.to_string().contains("test: declared length"));
    }

    #[test]
    fn test_unreserved_output_still_capped() {
        let mut out = BoundedOutput::unreserved(2);
        out.push_repeated(5, 4);
        assert_eq!(out.len(), 2);
        assert_eq!(out.produced(), 4);
    }

    #[test]
    fn test_mode_inferred_display() {
        let warning = DecodeWarning::ModeInferred {
            mode: "enhanced".to_string(),
        };
        assert_eq!(warning.to_string(), "format not recorded, decoded as enhanced");
    }

    #[test]
    fn test_placeholder() {
        let decoded = Decoded::placeholder(5, "no usable tokens");
        assert_eq!(decoded.data, vec![0; 5]);
        assert!(decoded.outcome.is_placeholder());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let outcome = DecodeOutcome::Degraded {
            warnings: vec![DecodeWarning::TruncatedToken { offset: 9 }],
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"degraded\""));
        assert!(json.contains("\"kind\":\"truncated_token\""));
    }
}
