//! RLE decoder (decompression).
//!
//! Both formats are decoded tolerantly: malformed records are skipped or
//! reinterpreted with a warning, and the output is always exactly the
//! declared original length.

use crate::config::{ESCAPE, LITERAL_ESCAPE, RleMode};
use crate::metadata::RleMetadata;
use tricodec_core::error::Result;
use tricodec_core::outcome::{
    BoundedOutput, DecodeWarning, Decoded, Diagnostics, ensure_declared_len,
};

/// Run-length decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct RleDecoder;

impl RleDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a payload in the mode recorded in `metadata`.
    ///
    /// Fails with [`CodecError::InvalidInput`](tricodec_core::CodecError::InvalidInput)
    /// when `original_len` exceeds what the payload can describe in that
    /// mode (see [`RleMode::max_decoded_len`]).
    pub fn decode(&self, payload: &[u8], metadata: &RleMetadata) -> Result<Decoded> {
        ensure_declared_len(
            "rle",
            metadata.original_len,
            metadata.mode.max_decoded_len(payload.len()),
        )?;
        Ok(decode_in_mode(payload, metadata, Diagnostics::new("rle")))
    }

    /// Decode a payload whose mode is unknown.
    ///
    /// A standard payload is chosen when it is structurally valid (even
    /// length, no zero run lengths) and its runs add up to `original_len`.
    /// Otherwise an enhanced payload whose records add up to `original_len`
    /// wins. When neither matches exactly, a structurally valid standard
    /// payload is preferred over enhanced.
    ///
    /// The result always carries a [`DecodeWarning::ModeInferred`], since a
    /// payload can be valid in both modes.
    pub fn decode_auto(&self, payload: &[u8], original_len: usize) -> Result<(RleMode, Decoded)> {
        let mode = detect_mode(payload, original_len);
        ensure_declared_len("rle", original_len, mode.max_decoded_len(payload.len()))?;
        let metadata = RleMetadata { original_len, mode };
        Ok((mode, decode_in_mode(payload, &metadata, inferred(mode))))
    }

    /// Decode a payload whose mode and original length are both unknown.
    ///
    /// A structurally valid standard payload is decoded as standard,
    /// anything else as enhanced. The length is whatever the chosen format
    /// describes. As with [`decode_auto`](Self::decode_auto), the result is
    /// never reported as exact.
    pub fn decode_unsized(&self, payload: &[u8]) -> (RleMode, Decoded) {
        let (mode, original_len) = match standard_total(payload) {
            Some(total) => (RleMode::Standard, total),
            None => (RleMode::Enhanced, enhanced_total(payload)),
        };
        let metadata = RleMetadata { original_len, mode };
        (mode, decode_in_mode(payload, &metadata, inferred(mode)))
    }
}

fn inferred(mode: RleMode) -> Diagnostics {
    let mut diag = Diagnostics::new("rle");
    diag.warn(DecodeWarning::ModeInferred {
        mode: mode.to_string(),
    });
    diag
}

fn decode_in_mode(payload: &[u8], metadata: &RleMetadata, diag: Diagnostics) -> Decoded {
    let decoded = match metadata.mode {
        RleMode::Standard => decode_standard(payload, metadata.original_len, diag),
        RleMode::Enhanced => decode_enhanced(payload, metadata.original_len, diag),
    };
    tracing::debug!(
        mode = %metadata.mode,
        compressed = payload.len(),
        decoded = decoded.data.len(),
        exact = decoded.outcome.is_exact(),
        "rle decode"
    );
    decoded
}

fn detect_mode(payload: &[u8], original_len: usize) -> RleMode {
    let standard = standard_total(payload);
    if standard == Some(original_len) {
        return RleMode::Standard;
    }
    if enhanced_total(payload) == original_len {
        return RleMode::Enhanced;
    }
    if standard.is_some() {
        RleMode::Standard
    } else {
        RleMode::Enhanced
    }
}

/// Described length of a standard payload, or `None` if it is malformed.
fn standard_total(payload: &[u8]) -> Option<usize> {
    if payload.len() % 2 != 0 {
        return None;
    }
    payload.chunks_exact(2).try_fold(0usize, |total, pair| {
        (pair[0] != 0).then(|| total + pair[0] as usize)
    })
}

/// Described length of an enhanced payload, counting recovered bytes.
fn enhanced_total(payload: &[u8]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < payload.len() {
        if payload[i] != ESCAPE {
            total += 1;
            i += 1;
            continue;
        }
        match (payload.get(i + 1), payload.get(i + 2)) {
            (Some(&LITERAL_ESCAPE), _) => {
                total += 1;
                i += 2;
            }
            (Some(&run), Some(_)) => {
                total += run as usize;
                i += 3;
            }
            _ => {
                total += 1;
                i += 1;
            }
        }
    }
    total
}

fn decode_standard(payload: &[u8], original_len: usize, mut diag: Diagnostics) -> Decoded {
    let mut output = BoundedOutput::new(original_len);

    let mut pairs = payload.chunks_exact(2);
    for (index, pair) in pairs.by_ref().enumerate() {
        let (run, value) = (pair[0], pair[1]);
        if run == 0 {
            diag.warn(DecodeWarning::InvalidRunLength {
                offset: index * 2,
                run_length: run,
            });
            continue;
        }
        output.push_repeated(value, run as usize);
    }
    if !pairs.remainder().is_empty() {
        diag.warn(DecodeWarning::TruncatedToken {
            offset: payload.len() - 1,
        });
    }

    output.finish(diag)
}

fn decode_enhanced(payload: &[u8], original_len: usize, mut diag: Diagnostics) -> Decoded {
    let mut output = BoundedOutput::new(original_len);

    let mut i = 0;
    while i < payload.len() {
        let byte = payload[i];
        if byte != ESCAPE {
            output.push(byte);
            i += 1;
            continue;
        }
        match (payload.get(i + 1), payload.get(i + 2)) {
            (Some(&LITERAL_ESCAPE), _) => {
                output.push(ESCAPE);
                i += 2;
            }
            (Some(&run), Some(&value)) => {
                output.push_repeated(value, run as usize);
                i += 3;
            }
            _ => {
                diag.warn(DecodeWarning::MalformedEscape { offset: i });
                output.push(ESCAPE);
                i += 1;
            }
        }
    }

    output.finish(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::RleEncoder;
    use tricodec_core::CodecError;

    fn meta(original_len: usize, mode: RleMode) -> RleMetadata {
        RleMetadata { original_len, mode }
    }

    #[test]
    fn test_standard_decode() {
        let decoded = RleDecoder::new()
            .decode(&[3, b'A', 1, b'B'], &meta(4, RleMode::Standard))
            .unwrap();
        assert_eq!(decoded.data, b"AAAB");
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_standard_zero_run_skipped() {
        let decoded = RleDecoder::new()
            .decode(&[2, b'A', 0, b'X', 1, b'B'], &meta(3, RleMode::Standard))
            .unwrap();
        assert_eq!(decoded.data, b"AAB");
        assert_eq!(
            decoded.outcome.warnings(),
            &[DecodeWarning::InvalidRunLength {
                offset: 2,
                run_length: 0
            }]
        );
    }

    #[test]
    fn test_standard_odd_trailing_byte() {
        let decoded = RleDecoder::new()
            .decode(&[2, b'A', 9], &meta(2, RleMode::Standard))
            .unwrap();
        assert_eq!(decoded.data, b"AA");
        assert_eq!(
            decoded.outcome.warnings(),
            &[DecodeWarning::TruncatedToken { offset: 2 }]
        );
    }

    #[test]
    fn test_enhanced_decode() {
        let decoded = RleDecoder::new()
            .decode(
                &[b'A', ESCAPE, 4, b'C', ESCAPE, LITERAL_ESCAPE],
                &meta(6, RleMode::Enhanced),
            )
            .unwrap();
        assert_eq!(decoded.data, vec![b'A', b'C', b'C', b'C', b'C', 0xFF]);
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_enhanced_truncated_escape_is_literal() {
        let decoded = RleDecoder::new()
            .decode(&[b'A', ESCAPE, 5], &meta(3, RleMode::Enhanced))
            .unwrap();
        // FF is kept as a literal and the 5 that follows is a plain byte.
        assert_eq!(decoded.data, vec![b'A', 0xFF, 5]);
        assert_eq!(
            decoded.outcome.warnings(),
            &[DecodeWarning::MalformedEscape { offset: 1 }]
        );
    }

    #[test]
    fn test_overlong_stream_is_truncated() {
        let decoded = RleDecoder::new()
            .decode(&[10, b'Z'], &meta(4, RleMode::Standard))
            .unwrap();
        assert_eq!(decoded.data, b"ZZZZ");
        assert!(matches!(
            decoded.outcome.warnings(),
            [DecodeWarning::SizeMismatch {
                expected: 4,
                actual: 10
            }]
        ));
    }

    #[test]
    fn test_auto_prefers_exact_standard() {
        let encoded = RleEncoder::new(RleMode::Standard).encode(b"aaabbbccc");
        let (mode, decoded) = RleDecoder::new().decode_auto(&encoded.payload, 9).unwrap();
        assert_eq!(mode, RleMode::Standard);
        assert_eq!(decoded.data, b"aaabbbccc");
    }

    #[test]
    fn test_auto_detects_enhanced() {
        let data = b"hello, world!!!!!!";
        let encoded = RleEncoder::new(RleMode::Enhanced).encode(data);
        let (mode, decoded) = RleDecoder::new()
            .decode_auto(&encoded.payload, data.len())
            .unwrap();
        assert_eq!(mode, RleMode::Enhanced);
        assert_eq!(decoded.data, data);
    }

    #[test]
    fn test_auto_falls_back_to_valid_standard() {
        assert_eq!(detect_mode(&[2, b'x'], 50), RleMode::Standard);
        assert_eq!(detect_mode(&[2, b'x', 7], 50), RleMode::Enhanced);
    }

    #[test]
    fn test_unsized_uses_described_length() {
        let data = b"size lost .....";
        for mode in [RleMode::Standard, RleMode::Enhanced] {
            let encoded = RleEncoder::new(mode).encode(data);
            let (detected, decoded) = RleDecoder::new().decode_unsized(&encoded.payload);
            assert_eq!(detected, mode);
            assert_eq!(decoded.data, data);
            assert_eq!(
                decoded.outcome.warnings(),
                &[DecodeWarning::ModeInferred {
                    mode: mode.to_string()
                }]
            );
        }
    }

    #[test]
    fn test_ambiguous_enhanced_payload_not_exact() {
        // Enhanced "ab" is [97, 98], which is also a valid standard pair.
        let encoded = RleEncoder::new(RleMode::Enhanced).encode(b"ab");
        assert_eq!(encoded.payload, vec![b'a', b'b']);

        let (mode, decoded) = RleDecoder::new().decode_unsized(&encoded.payload);
        assert_eq!(mode, RleMode::Standard);
        assert_eq!(decoded.data.len(), 97);
        assert!(!decoded.outcome.is_exact());
        assert!(matches!(
            decoded.outcome.warnings(),
            [DecodeWarning::ModeInferred { .. }]
        ));
    }

    #[test]
    fn test_auto_result_is_degraded() {
        let encoded = RleEncoder::new(RleMode::Enhanced).encode(b"ab");
        let (mode, decoded) = RleDecoder::new().decode_auto(&encoded.payload, 2).unwrap();
        assert_eq!(mode, RleMode::Enhanced);
        assert_eq!(decoded.data, b"ab");
        assert!(!decoded.outcome.is_exact());
    }

    #[test]
    fn test_declared_len_beyond_payload_rejected() {
        let err = RleDecoder::new()
            .decode(&[3, b'A'], &meta(usize::MAX / 2, RleMode::Standard))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput { .. }));

        // A declared length at the ceiling still decodes, padded.
        let decoded = RleDecoder::new()
            .decode(&[3, b'A'], &meta(255, RleMode::Standard))
            .unwrap();
        assert_eq!(decoded.data.len(), 255);

        assert!(matches!(
            RleDecoder::new().decode_auto(&[b'x'], 1 << 40),
            Err(CodecError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_standard_total() {
        assert_eq!(standard_total(&[3, 1, 255, 2]), Some(258));
        assert_eq!(standard_total(&[3, 1, 0, 2]), None);
        assert_eq!(standard_total(&[3]), None);
        assert_eq!(standard_total(&[]), Some(0));
    }
}
