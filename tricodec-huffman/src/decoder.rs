//! Huffman decoder (decompression).

use crate::metadata::{HuffmanMetadata, MAX_SINGLE_SYMBOL_LEN};
use crate::tree::HuffmanTree;
use tricodec_core::bitstream::MsbBitReader;
use tricodec_core::error::{CodecError, Result};
use tricodec_core::outcome::{
    BoundedOutput, DecodeWarning, Decoded, Diagnostics, ensure_declared_len,
};

/// Static Huffman decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanDecoder;

impl HuffmanDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a packed Huffman payload.
    ///
    /// The code table is mandatory for multi-symbol payloads: the bit stream
    /// is not self-describing, so a missing table fails with
    /// [`CodecError::MissingMetadata`] instead of guessing.
    ///
    /// A bit path that leaves the tree stops decoding with a
    /// [`DecodeWarning::InvalidCodePath`]. The output is always truncated
    /// or zero-padded to `original_len`.
    ///
    /// Every code is at least one bit long, so an `original_len` above the
    /// payload's bit count fails with [`CodecError::InvalidInput`]. A
    /// single-symbol payload may declare at most [`MAX_SINGLE_SYMBOL_LEN`].
    pub fn decode(&self, payload: &[u8], metadata: &HuffmanMetadata) -> Result<Decoded> {
        let original_len = metadata.original_len;
        if original_len == 0 {
            return Ok(Decoded::exact(Vec::new()));
        }

        if metadata.single_symbol {
            ensure_declared_len("huffman", original_len, MAX_SINGLE_SYMBOL_LEN)?;
            let symbol = *payload
                .first()
                .ok_or_else(|| CodecError::corrupt(0, "single-symbol payload is empty"))?;
            return Ok(Decoded::exact(vec![symbol; original_len]));
        }

        if metadata.padding_bits > 7 {
            return Err(CodecError::invalid_input(format!(
                "padding bits must be 0-7, got {}",
                metadata.padding_bits
            )));
        }

        let table = metadata
            .table
            .as_ref()
            .ok_or_else(|| CodecError::missing_metadata("code table"))?;
        let bits = (payload.len() as u64 * 8).saturating_sub(u64::from(metadata.padding_bits));
        ensure_declared_len(
            "huffman",
            original_len,
            usize::try_from(bits).unwrap_or(usize::MAX),
        )?;
        let tree = HuffmanTree::from_code_table(table)?;

        let mut diag = Diagnostics::new("huffman");
        let mut reader = MsbBitReader::with_padding(payload, metadata.padding_bits);
        let mut output = BoundedOutput::new(original_len);
        let root = tree.root();
        let mut node = root;

        while !output.is_full() {
            let Some(bit) = reader.read_bit() else {
                break;
            };
            match tree.child(node, bit) {
                Some(next) => match tree.symbol(next) {
                    Some(symbol) => {
                        output.push(symbol);
                        node = root;
                    }
                    None => node = next,
                },
                None => {
                    diag.warn(DecodeWarning::InvalidCodePath {
                        bit_position: reader.bit_position() - 1,
                    });
                    break;
                }
            }
        }

        tracing::debug!(
            compressed = payload.len(),
            decoded = output.len(),
            warnings = diag.len(),
            "huffman decode"
        );
        Ok(output.finish(diag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeTable;
    use crate::encoder::HuffmanEncoder;

    fn roundtrip(data: &[u8]) -> Decoded {
        let encoded = HuffmanEncoder::new().encode(data).unwrap();
        HuffmanDecoder::new()
            .decode(&encoded.payload, &encoded.metadata)
            .unwrap()
    }

    #[test]
    fn test_roundtrip_text() {
        let data = b"Huffman coding assigns short codes to frequent bytes.";
        let decoded = roundtrip(data);
        assert!(decoded.outcome.is_exact());
        assert_eq!(decoded.data, data);
    }

    #[test]
    fn test_roundtrip_two_symbols() {
        let decoded = roundtrip(b"ab");
        assert_eq!(decoded.data, b"ab");
    }

    #[test]
    fn test_single_symbol_decode() {
        let decoded = roundtrip(&[0x41; 1000]);
        assert_eq!(decoded.data, vec![0x41; 1000]);
    }

    #[test]
    fn test_empty_decode() {
        let decoded = HuffmanDecoder::new()
            .decode(&[], &HuffmanMetadata::default())
            .unwrap();
        assert!(decoded.data.is_empty());
        assert!(decoded.outcome.is_exact());
    }

    #[test]
    fn test_missing_table_rejected() {
        let encoded = HuffmanEncoder::new().encode(b"abcabc").unwrap();
        let metadata = HuffmanMetadata {
            table: None,
            ..encoded.metadata
        };
        let err = HuffmanDecoder::new()
            .decode(&encoded.payload, &metadata)
            .unwrap_err();
        assert!(matches!(err, CodecError::MissingMetadata { .. }));
    }

    #[test]
    fn test_bad_padding_rejected() {
        let encoded = HuffmanEncoder::new().encode(b"abcabc").unwrap();
        let metadata = HuffmanMetadata {
            padding_bits: 8,
            ..encoded.metadata
        };
        assert!(matches!(
            HuffmanDecoder::new().decode(&encoded.payload, &metadata),
            Err(CodecError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_truncated_payload_is_padded() {
        let data = b"abcdefgh".repeat(8);
        let encoded = HuffmanEncoder::new().encode(&data).unwrap();
        let half = &encoded.payload[..encoded.payload.len() / 2];
        let metadata = HuffmanMetadata {
            padding_bits: 0,
            ..encoded.metadata
        };
        let decoded = HuffmanDecoder::new().decode(half, &metadata).unwrap();
        assert_eq!(decoded.data.len(), data.len());
        assert_eq!(&decoded.data[..16], &data[..16]);
        assert!(matches!(
            decoded.outcome.warnings(),
            [DecodeWarning::SizeMismatch { .. }]
        ));
    }

    #[test]
    fn test_path_off_tree_is_reported() {
        // Only code "0" exists; a 1 bit leaves the tree.
        let metadata = HuffmanMetadata {
            table: Some(CodeTable::single(b'x')),
            original_len: 4,
            padding_bits: 0,
            single_symbol: false,
        };
        let decoded = HuffmanDecoder::new()
            .decode(&[0b0010_0000], &metadata)
            .unwrap();
        assert_eq!(decoded.data, vec![b'x', b'x', 0, 0]);
        assert_eq!(
            decoded.outcome.warnings()[0],
            DecodeWarning::InvalidCodePath { bit_position: 2 }
        );
    }

    #[test]
    fn test_declared_len_beyond_bits_rejected() {
        let encoded = HuffmanEncoder::new().encode(b"abab").unwrap();
        // 4 one-bit codes, 4 padding bits: at most 4 symbols.
        assert_eq!(encoded.metadata.padding_bits, 4);
        let metadata = HuffmanMetadata {
            original_len: 5,
            ..encoded.metadata.clone()
        };
        assert!(matches!(
            HuffmanDecoder::new().decode(&encoded.payload, &metadata),
            Err(CodecError::InvalidInput { .. })
        ));
        let metadata = HuffmanMetadata {
            original_len: usize::MAX / 2,
            ..encoded.metadata
        };
        assert!(HuffmanDecoder::new().decode(&encoded.payload, &metadata).is_err());
    }

    #[test]
    fn test_single_symbol_length_limit() {
        let metadata = HuffmanMetadata {
            table: None,
            original_len: MAX_SINGLE_SYMBOL_LEN + 1,
            padding_bits: 0,
            single_symbol: true,
        };
        assert!(matches!(
            HuffmanDecoder::new().decode(&[b'z'], &metadata),
            Err(CodecError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_single_symbol_without_payload_is_corrupt() {
        let metadata = HuffmanMetadata {
            table: None,
            original_len: 3,
            padding_bits: 0,
            single_symbol: true,
        };
        assert!(matches!(
            HuffmanDecoder::new().decode(&[], &metadata),
            Err(CodecError::CorruptStream { .. })
        ));
    }
}
