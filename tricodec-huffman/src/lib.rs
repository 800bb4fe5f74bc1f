//! # Tricodec-Huffman: Static Huffman Coding
//!
//! Byte-oriented Huffman coding with a per-payload frequency table.
//!
//! ## Format
//!
//! - Codes are packed MSB-first into a byte stream padded with zero bits;
//!   the padding count (0-7) is side-metadata
//! - The code table maps byte values to bit strings and must accompany the
//!   payload, because the bit stream is not self-describing
//! - A payload with a single distinct byte stores just that byte and sets
//!   the single-symbol flag
//! - [`framing`] bundles table and bits as
//!   `[u32 BE table length][JSON table][bits]`
//!
//! ## Example
//!
//! ```rust
//! use tricodec_huffman::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let encoded = compress(original).unwrap();
//! let decoded = decompress(&encoded.payload, &encoded.metadata).unwrap();
//! assert_eq!(decoded.data, original);
//! assert!(decoded.outcome.is_exact());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
mod decoder;
mod encoder;
pub mod framing;
mod frequency;
mod metadata;
pub mod tree;

pub use code::{BitCode, CodeTable};
pub use decoder::HuffmanDecoder;
pub use encoder::HuffmanEncoder;
pub use frequency::FrequencyTable;
pub use metadata::{HuffmanMetadata, MAX_SINGLE_SYMBOL_LEN};
pub use tree::HuffmanTree;

use tricodec_core::error::Result;
use tricodec_core::outcome::Decoded;
use tricodec_core::traits::{Codec, Encoded};

/// Huffman encoding of `data`.
pub fn compress(data: &[u8]) -> Result<Encoded<HuffmanMetadata>> {
    HuffmanEncoder::new().encode(data)
}

/// Decode a Huffman payload with its side-metadata.
pub fn decompress(payload: &[u8], metadata: &HuffmanMetadata) -> Result<Decoded> {
    HuffmanDecoder::new().decode(payload, metadata)
}

/// [`Codec`] implementation for static Huffman coding.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanCodec;

impl Codec for HuffmanCodec {
    type Metadata = HuffmanMetadata;
    const NAME: &'static str = "huffman";

    fn encode(&self, input: &[u8]) -> Result<Encoded<HuffmanMetadata>> {
        compress(input)
    }

    fn decode(&self, payload: &[u8], metadata: &HuffmanMetadata) -> Result<Decoded> {
        decompress(payload, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_trait_roundtrip() {
        let codec = HuffmanCodec;
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let encoded = codec.encode(original).unwrap();
        let decoded = codec.decode(&encoded.payload, &encoded.metadata).unwrap();
        assert_eq!(decoded.data, original);
        assert_eq!(HuffmanCodec::NAME, "huffman");
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let encoded = compress(&original).unwrap();
        assert_eq!(encoded.metadata.table.as_ref().unwrap().len(), 256);
        let decoded = decompress(&encoded.payload, &encoded.metadata).unwrap();
        assert_eq!(decoded.data, original);
    }
}
