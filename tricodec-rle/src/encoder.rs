//! RLE encoder (compression).

use crate::config::{ENHANCED_MIN_RUN, ESCAPE, LITERAL_ESCAPE, MAX_RUN, RleMode};
use crate::metadata::RleMetadata;
use tricodec_core::traits::Encoded;

/// A run of identical bytes, at most [`MAX_RUN`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Repeated byte.
    pub value: u8,
    /// Number of repetitions (1-255).
    pub len: u8,
}

/// Iterator splitting a buffer into [`Run`]s.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Runs<'a> {
    /// Scan `data` for runs.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let value = *self.data.get(self.pos)?;
        let len = self.data[self.pos..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&b| b == value)
            .count();
        self.pos += len;
        Some(Run {
            value,
            len: len as u8,
        })
    }
}

/// Run-length encoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct RleEncoder {
    mode: RleMode,
}

impl RleEncoder {
    /// Create an encoder for the given mode.
    pub fn new(mode: RleMode) -> Self {
        Self { mode }
    }

    /// The encoder's wire format.
    pub fn mode(&self) -> RleMode {
        self.mode
    }

    /// Encode data as runs.
    ///
    /// Standard mode writes a `(run length, value)` pair per run, which may
    /// double the size of incompressible data. Enhanced mode writes short
    /// runs as literals and only spends an escape record on runs of three or
    /// more.
    pub fn encode(&self, input: &[u8]) -> Encoded<RleMetadata> {
        let payload = match self.mode {
            RleMode::Standard => encode_standard(input),
            RleMode::Enhanced => encode_enhanced(input),
        };
        tracing::debug!(
            mode = %self.mode,
            original = input.len(),
            compressed = payload.len(),
            "rle encode"
        );
        Encoded {
            payload,
            metadata: RleMetadata {
                original_len: input.len(),
                mode: self.mode,
            },
        }
    }
}

fn encode_standard(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    for run in Runs::new(input) {
        output.push(run.len);
        output.push(run.value);
    }
    output
}

fn encode_enhanced(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    for run in Runs::new(input) {
        if run.len as usize >= ENHANCED_MIN_RUN {
            output.extend_from_slice(&[ESCAPE, run.len, run.value]);
        } else if run.value == ESCAPE {
            for _ in 0..run.len {
                output.extend_from_slice(&[ESCAPE, LITERAL_ESCAPE]);
            }
        } else {
            output.extend(std::iter::repeat_n(run.value, run.len as usize));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_split_at_max() {
        let data = vec![7u8; 600];
        let runs: Vec<Run> = Runs::new(&data).collect();
        assert_eq!(
            runs,
            vec![
                Run { value: 7, len: 255 },
                Run { value: 7, len: 255 },
                Run { value: 7, len: 90 },
            ]
        );
    }

    #[test]
    fn test_standard_pairs() {
        let encoded = RleEncoder::new(RleMode::Standard).encode(b"AAABCC");
        assert_eq!(encoded.payload, vec![3, b'A', 1, b'B', 2, b'C']);
        assert_eq!(encoded.metadata.original_len, 6);
    }

    #[test]
    fn test_standard_expands_incompressible() {
        let encoded = RleEncoder::new(RleMode::Standard).encode(b"abcd");
        assert_eq!(encoded.payload.len(), 8);
    }

    #[test]
    fn test_enhanced_short_runs_are_literal() {
        let encoded = RleEncoder::new(RleMode::Enhanced).encode(b"AABCCCC");
        assert_eq!(encoded.payload, vec![b'A', b'A', b'B', ESCAPE, 4, b'C']);
    }

    #[test]
    fn test_enhanced_escapes_literal_ff() {
        let encoded = RleEncoder::new(RleMode::Enhanced).encode(&[0xFF, 0xFF, 0x41]);
        assert_eq!(encoded.payload, vec![0xFF, 0x00, 0xFF, 0x00, 0x41]);
    }

    #[test]
    fn test_enhanced_long_ff_run_is_record() {
        let encoded = RleEncoder::new(RleMode::Enhanced).encode(&[0xFF; 5]);
        assert_eq!(encoded.payload, vec![ESCAPE, 5, 0xFF]);
    }

    #[test]
    fn test_empty() {
        for mode in [RleMode::Standard, RleMode::Enhanced] {
            let encoded = RleEncoder::new(mode).encode(b"");
            assert!(encoded.payload.is_empty());
            assert_eq!(encoded.metadata.original_len, 0);
        }
    }
}
