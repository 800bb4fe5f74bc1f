//! Huffman encoder (compression).

use crate::code::CodeTable;
use crate::frequency::FrequencyTable;
use crate::metadata::{HuffmanMetadata, MAX_SINGLE_SYMBOL_LEN};
use crate::tree::HuffmanTree;
use tricodec_core::bitstream::MsbBitWriter;
use tricodec_core::error::{CodecError, Result};
use tricodec_core::traits::Encoded;

/// Static Huffman encoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanEncoder;

impl HuffmanEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode data with a per-payload Huffman code.
    ///
    /// # Algorithm
    ///
    /// 1. Count byte frequencies
    /// 2. With a single distinct byte, store that byte and set the
    ///    single-symbol flag (no tree)
    /// 3. Otherwise build the tree and derive the code table
    /// 4. Concatenate the code of every input byte MSB-first
    /// 5. Pad with zero bits to a byte boundary and record the padding
    pub fn encode(&self, input: &[u8]) -> Result<Encoded<HuffmanMetadata>> {
        if input.is_empty() {
            return Ok(Encoded {
                payload: Vec::new(),
                metadata: HuffmanMetadata::default(),
            });
        }

        let frequencies = FrequencyTable::from_bytes(input);

        if let Some(symbol) = frequencies.single_symbol() {
            if input.len() > MAX_SINGLE_SYMBOL_LEN {
                return Err(CodecError::invalid_input(format!(
                    "single-symbol input of {} bytes exceeds {MAX_SINGLE_SYMBOL_LEN}",
                    input.len()
                )));
            }
            tracing::debug!(symbol, len = input.len(), "huffman single-symbol payload");
            return Ok(Encoded {
                payload: vec![symbol],
                metadata: HuffmanMetadata {
                    table: Some(CodeTable::single(symbol)),
                    original_len: input.len(),
                    padding_bits: 0,
                    single_symbol: true,
                },
            });
        }

        let tree = HuffmanTree::build(&frequencies)
            .ok_or_else(|| CodecError::invalid_input("no symbols to encode"))?;
        let table = tree.code_table()?;
        let lookup = table.to_lookup();

        let total_bits: u64 = frequencies
            .iter()
            .map(|(symbol, count)| {
                count * lookup[symbol as usize].map_or(0, |c| c.len() as u64)
            })
            .sum();
        let mut writer = MsbBitWriter::with_capacity(total_bits.div_ceil(8) as usize);

        for &byte in input {
            let code = lookup[byte as usize].ok_or_else(|| {
                CodecError::invalid_input(format!("no code generated for byte {byte}"))
            })?;
            code.write_to(&mut writer)?;
        }

        let (payload, padding_bits) = writer.finish();
        tracing::debug!(
            original = input.len(),
            compressed = payload.len(),
            symbols = table.len(),
            padding_bits,
            "huffman encode"
        );

        Ok(Encoded {
            payload,
            metadata: HuffmanMetadata {
                table: Some(table),
                original_len: input.len(),
                padding_bits,
                single_symbol: false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        let encoded = HuffmanEncoder::new().encode(b"").unwrap();
        assert!(encoded.payload.is_empty());
        assert_eq!(encoded.metadata.original_len, 0);
        assert!(encoded.metadata.table.is_none());
    }

    #[test]
    fn test_encode_single_symbol() {
        let encoded = HuffmanEncoder::new().encode(&[0x41; 1000]).unwrap();
        assert_eq!(encoded.payload, vec![0x41]);
        assert!(encoded.metadata.single_symbol);
        assert_eq!(encoded.metadata.original_len, 1000);
    }

    #[test]
    fn test_encode_known_bits() {
        // b=00, c=01, a=1 -> 3 * 1 + 2 + 2 = 7 bits + 1 padding bit
        let encoded = HuffmanEncoder::new().encode(b"aaabc").unwrap();
        let table = encoded.metadata.table.as_ref().unwrap();
        assert_eq!(table.get(b'a').unwrap().len(), 1);
        assert_eq!(encoded.payload.len(), 1);
        assert_eq!(encoded.metadata.padding_bits, 1);
        assert!(!encoded.metadata.single_symbol);
    }

    #[test]
    fn test_padding_range() {
        for len in 2..40 {
            let data: Vec<u8> = (0..len).map(|i| (i % 3) as u8).collect();
            let encoded = HuffmanEncoder::new().encode(&data).unwrap();
            assert!(encoded.metadata.padding_bits < 8);
        }
    }

    #[test]
    fn test_skewed_text_compresses() {
        let data = b"the rain in spain stays mainly in the plain ".repeat(20);
        let encoded = HuffmanEncoder::new().encode(&data).unwrap();
        assert!(encoded.payload.len() < data.len() * 3 / 4);
    }
}
