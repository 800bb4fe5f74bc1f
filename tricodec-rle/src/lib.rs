//! # Tricodec-RLE: Run-Length Encoding
//!
//! Two byte-oriented run-length formats:
//!
//! - **Standard**: every run becomes a `(length, value)` pair with a length
//!   of 1-255. Simple, but doubles the size of data without runs.
//! - **Enhanced**: bytes are copied as literals; runs of three or more are
//!   written as `[0xFF][length][value]` and a literal `0xFF` as
//!   `[0xFF][0x00]`.
//!
//! The mode is side-metadata. [`RleDecoder::decode_auto`] can recover it
//! from the payload and the original length when the metadata is lost; such
//! results are flagged as inferred, never exact.
//!
//! ## Example
//!
//! ```rust
//! use tricodec_rle::{RleMode, compress, decompress};
//!
//! let original = b"aaaaabbbbbccccc";
//! let encoded = compress(original, RleMode::Enhanced);
//! assert_eq!(encoded.payload.len(), 9);
//! let decoded = decompress(&encoded.payload, &encoded.metadata).unwrap();
//! assert_eq!(decoded.data, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
mod decoder;
mod encoder;
mod metadata;

pub use config::RleMode;
pub use decoder::RleDecoder;
pub use encoder::{RleEncoder, Run, Runs};
pub use metadata::RleMetadata;

use tricodec_core::error::Result;
use tricodec_core::outcome::Decoded;
use tricodec_core::traits::{Codec, Encoded};

/// Run-length encode `data` in the given mode.
pub fn compress(data: &[u8], mode: RleMode) -> Encoded<RleMetadata> {
    RleEncoder::new(mode).encode(data)
}

/// Decode an RLE payload with its side-metadata.
pub fn decompress(payload: &[u8], metadata: &RleMetadata) -> Result<Decoded> {
    RleDecoder::new().decode(payload, metadata)
}

/// Decode an RLE payload of unknown mode.
pub fn decompress_auto(payload: &[u8], original_len: usize) -> Result<Decoded> {
    Ok(RleDecoder::new().decode_auto(payload, original_len)?.1)
}

/// [`Codec`] implementation for run-length encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct RleCodec {
    mode: RleMode,
}

impl RleCodec {
    /// Codec writing the given mode.
    pub fn new(mode: RleMode) -> Self {
        Self { mode }
    }
}

impl Codec for RleCodec {
    type Metadata = RleMetadata;
    const NAME: &'static str = "rle";

    fn encode(&self, input: &[u8]) -> Result<Encoded<RleMetadata>> {
        Ok(compress(input, self.mode))
    }

    fn decode(&self, payload: &[u8], metadata: &RleMetadata) -> Result<Decoded> {
        decompress(payload, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_trait_roundtrip() {
        let codec = RleCodec::new(RleMode::Enhanced);
        let original = b"WWWWWWWWWWWWBWWWWWWWWWWWWBBBWWWWWWWWWWWWWWWWWWWWWWWWB";
        let encoded = codec.encode(original).unwrap();
        assert!(encoded.payload.len() < original.len());
        let decoded = codec.decode(&encoded.payload, &encoded.metadata).unwrap();
        assert_eq!(decoded.data, original);
        assert_eq!(RleCodec::NAME, "rle");
    }

    #[test]
    fn test_decompress_auto() {
        let original = vec![0u8; 700];
        let encoded = compress(&original, RleMode::Standard);
        let decoded = decompress_auto(&encoded.payload, 700).unwrap();
        assert_eq!(decoded.data, original);
        assert!(!decoded.outcome.is_exact());
    }
}
