//! LZ77 decoder (decompression).

use crate::config::{ESCAPE, MIN_MATCH};
use crate::metadata::Lz77Metadata;
use crate::token::{Lz77Token, Scanned, max_decoded_len, scan};
use tricodec_core::error::Result;
use tricodec_core::outcome::{
    BoundedOutput, DecodeWarning, Decoded, Diagnostics, ensure_declared_len,
};

/// Sliding-window LZ77 decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz77Decoder;

impl Lz77Decoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a payload with its side-metadata.
    ///
    /// Malformed tokens never abort decoding. A match whose distance is zero
    /// or reaches before the start of the output, or whose length is below
    /// the minimum, and an escape byte too close to the end to start a
    /// token, are all kept as a literal `0xFF` and scanning resumes at the
    /// next byte. The output is truncated or zero-padded to `original_len`.
    ///
    /// An `original_len` beyond [`max_decoded_len`] of the payload fails
    /// with [`CodecError::InvalidInput`](tricodec_core::CodecError::InvalidInput).
    pub fn decode(&self, payload: &[u8], metadata: &Lz77Metadata) -> Result<Decoded> {
        ensure_declared_len("lz77", metadata.original_len, max_decoded_len(payload.len()))?;
        let mut diag = Diagnostics::new("lz77");
        let output = run(
            payload,
            BoundedOutput::new(metadata.original_len),
            &mut diag,
        );
        tracing::debug!(
            compressed = payload.len(),
            produced = output.produced(),
            warnings = diag.len(),
            "lz77 decode"
        );
        Ok(output.finish(diag))
    }

    /// Decode a payload without side-metadata.
    ///
    /// The stream itself decides whether the result is usable: if any token
    /// was malformed, the payload is assumed to be something other than an
    /// LZ77 stream and a zero-filled placeholder of `estimated_len` bytes is
    /// returned instead. Callers must treat a
    /// [`DecodeOutcome::Placeholder`](tricodec_core::DecodeOutcome::Placeholder)
    /// as a failed decode, not as data.
    ///
    /// A well-formed stream yields every byte it describes; `estimated_len`
    /// only sizes the placeholder.
    pub fn decode_best_effort(&self, payload: &[u8], estimated_len: usize) -> Decoded {
        let mut diag = Diagnostics::new("lz77");
        let ceiling = BoundedOutput::unreserved(max_decoded_len(payload.len()));
        let output = run(payload, ceiling, &mut diag);
        if !diag.is_empty() {
            return Decoded::placeholder(
                estimated_len,
                format!("{} malformed tokens in stream", diag.len()),
            );
        }
        output.finish_unpadded(diag)
    }
}

fn run(payload: &[u8], mut output: BoundedOutput, diag: &mut Diagnostics) -> BoundedOutput {
    let mut i = 0;

    while i < payload.len() {
        match scan(payload, i) {
            Scanned::Token(Lz77Token::Literal(byte), consumed) => {
                output.push(byte);
                i += consumed;
            }
            Scanned::Token(
                Lz77Token::Match {
                    distance,
                    length,
                    next,
                },
                consumed,
            ) => {
                let (distance, length) = (distance as usize, length as usize);
                if distance == 0 || distance > output.produced() || length < MIN_MATCH {
                    diag.warn(DecodeWarning::InvalidMatch {
                        offset: i,
                        distance,
                        length,
                    });
                    output.push(ESCAPE);
                    i += 1;
                    continue;
                }
                // Byte-by-byte: the source may overlap the bytes being written.
                let start = output.produced() - distance;
                for k in 0..length {
                    let byte = output.get(start + k).unwrap_or(0);
                    output.push(byte);
                }
                output.push(next);
                i += consumed;
            }
            Scanned::TruncatedEscape => {
                diag.warn(DecodeWarning::MalformedEscape { offset: i });
                output.push(ESCAPE);
                i += 1;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Lz77Encoder;
    use tricodec_core::CodecError;

    fn meta(original_len: usize) -> Lz77Metadata {
        Lz77Metadata {
            original_len,
            window_size: 4096,
            lookahead_size: 255,
        }
    }

    #[test]
    fn test_overlapping_copy() {
        // 'a', then copy 8 bytes from distance 1, then 'a'.
        let payload = [b'a', 0xFF, 0x01, 0x01, 8, b'a'];
        let decoded = Lz77Decoder::new().decode(&payload, &meta(10)).unwrap();
        assert_eq!(decoded.data, b"aaaaaaaaaa");
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_overlapping_pattern() {
        // "ab" then distance 2, length 5: ababa, then 'x'.
        let payload = [b'a', b'b', 0xFF, 0x01, 0x02, 5, b'x'];
        let decoded = Lz77Decoder::new().decode(&payload, &meta(8)).unwrap();
        assert_eq!(decoded.data, b"abababax");
    }

    #[test]
    fn test_distance_beyond_output() {
        let payload = [b'a', 0xFF, 0x01, 0x09, 3, b'b'];
        let decoded = Lz77Decoder::new().decode(&payload, &meta(6)).unwrap();
        // The escape is kept, the four bytes after it are read as literals.
        assert_eq!(decoded.data, vec![b'a', 0xFF, 0x01, 0x09, 3, b'b']);
        assert_eq!(
            decoded.outcome.warnings(),
            &[DecodeWarning::InvalidMatch {
                offset: 1,
                distance: 9,
                length: 3
            }]
        );
    }

    #[test]
    fn test_zero_distance() {
        let payload = [b'a', 0xFF, 0x01, 0x00, 3, b'b'];
        let decoded = Lz77Decoder::new().decode(&payload, &meta(6)).unwrap();
        assert!(matches!(
            decoded.outcome.warnings()[0],
            DecodeWarning::InvalidMatch { distance: 0, .. }
        ));
    }

    #[test]
    fn test_truncated_trailing_token() {
        let payload = [b'a', b'b', 0xFF, 0x01];
        let decoded = Lz77Decoder::new().decode(&payload, &meta(4)).unwrap();
        assert_eq!(decoded.data, vec![b'a', b'b', 0xFF, 0x01]);
        assert_eq!(
            decoded.outcome.warnings(),
            &[DecodeWarning::MalformedEscape { offset: 2 }]
        );
    }

    #[test]
    fn test_output_fits_declared_length() {
        let encoded = Lz77Encoder::default().encode(b"abcabcabcabc");
        let decoded = Lz77Decoder::new().decode(&encoded.payload, &meta(5)).unwrap();
        assert_eq!(decoded.data, b"abcab");
        assert!(matches!(
            decoded.outcome.warnings(),
            [DecodeWarning::SizeMismatch {
                expected: 5,
                actual: 12
            }]
        ));
    }

    #[test]
    fn test_best_effort_valid_stream() {
        let encoded = Lz77Encoder::default().encode(b"hello hello hello");
        let decoded = Lz77Decoder::new().decode_best_effort(&encoded.payload, 1024);
        assert_eq!(decoded.data, b"hello hello hello");
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_best_effort_not_capped_by_estimate() {
        // 'a', then a 255-byte copy and 'a': 257 bytes from 6.
        let payload = [b'a', 0xFF, 0x01, 0x01, 255, b'a'];
        let decoded = Lz77Decoder::new().decode_best_effort(&payload, 16);
        assert_eq!(decoded.data, vec![b'a'; 257]);
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_declared_len_beyond_payload_rejected() {
        let payload = [b'a', 0xFF, 0x01, 0x01, 8, b'a'];
        let err = Lz77Decoder::new()
            .decode(&payload, &meta(usize::MAX / 2))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput { .. }));
        assert!(Lz77Decoder::new().decode(&payload, &meta(257)).is_ok());
        assert!(Lz77Decoder::new().decode(&payload, &meta(258)).is_err());
    }

    #[test]
    fn test_best_effort_placeholder() {
        let decoded = Lz77Decoder::new().decode_best_effort(&[0xFF, 0x02, 0x00, 9, 1], 64);
        assert!(decoded.outcome.is_placeholder());
        assert_eq!(decoded.data, vec![0; 64]);
    }

    #[test]
    fn test_best_effort_equal_lengths_accepted() {
        // A literal-only stream decodes to exactly its own length.
        let decoded = Lz77Decoder::new().decode_best_effort(b"plain", 1024);
        assert_eq!(decoded.data, b"plain");
        assert!(decoded.outcome.is_exact());
    }
}
