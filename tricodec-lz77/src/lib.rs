//! # Tricodec-LZ77: Sliding-Window Dictionary Compression
//!
//! Classic LZ77 with a byte-aligned, escape-coded token stream. Literals are
//! stored as-is; a back-reference is a five-byte token
//! `[0xFF][distance:u16 BE][length][next byte]`, and a literal `0xFF` is
//! written as `[0xFF][0x00]`. See [`token`] for the exact layout.
//!
//! The encoder does a brute-force search of the window at every position
//! ([`matcher`]). The decoder copies matches byte by byte so that
//! self-overlapping references (distance < length) expand correctly.
//!
//! ## Example
//!
//! ```rust
//! use tricodec_lz77::{Lz77Config, compress, decompress};
//!
//! let original = b"to be or not to be, that is the question";
//! let encoded = compress(original, &Lz77Config::DEFAULT).unwrap();
//! let decoded = decompress(&encoded.payload, &encoded.metadata).unwrap();
//! assert_eq!(decoded.data, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
mod decoder;
mod encoder;
pub mod matcher;
mod metadata;
pub mod token;

pub use config::Lz77Config;
pub use decoder::Lz77Decoder;
pub use encoder::Lz77Encoder;
pub use metadata::Lz77Metadata;
pub use token::{Lz77Token, max_decoded_len};

use tricodec_core::error::Result;
use tricodec_core::outcome::Decoded;
use tricodec_core::traits::{Codec, Encoded};

/// LZ77 encoding of `data` with the given window parameters.
pub fn compress(data: &[u8], config: &Lz77Config) -> Result<Encoded<Lz77Metadata>> {
    Ok(Lz77Encoder::new(*config)?.encode(data))
}

/// Decode an LZ77 payload with its side-metadata.
pub fn decompress(payload: &[u8], metadata: &Lz77Metadata) -> Result<Decoded> {
    Lz77Decoder::new().decode(payload, metadata)
}

/// Decode an LZ77 payload without side-metadata, falling back to a
/// zero-filled placeholder when the stream is malformed.
pub fn decompress_best_effort(payload: &[u8], estimated_len: usize) -> Decoded {
    Lz77Decoder::new().decode_best_effort(payload, estimated_len)
}

/// [`Codec`] implementation for LZ77.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz77Codec {
    encoder: Lz77Encoder,
}

impl Lz77Codec {
    /// Codec with the given window parameters.
    pub fn new(config: Lz77Config) -> Result<Self> {
        Ok(Self {
            encoder: Lz77Encoder::new(config)?,
        })
    }
}

impl Codec for Lz77Codec {
    type Metadata = Lz77Metadata;
    const NAME: &'static str = "lz77";

    fn encode(&self, input: &[u8]) -> Result<Encoded<Lz77Metadata>> {
        Ok(self.encoder.encode(input))
    }

    fn decode(&self, payload: &[u8], metadata: &Lz77Metadata) -> Result<Decoded> {
        decompress(payload, metadata)
    }
}
