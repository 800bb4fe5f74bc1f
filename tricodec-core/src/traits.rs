//! Core traits shared by the three codecs.
//!
//! A codec is stateless: it turns a whole in-memory buffer into a payload
//! plus the side-metadata its decoder needs, and turns the pair back into
//! bytes. Calls share nothing, so independent payloads can be processed on
//! as many threads as the caller likes.

use crate::error::Result;
use crate::outcome::Decoded;

/// Out-of-band values that travel alongside a compressed payload.
pub trait SideMetadata {
    /// Length of the data before compression.
    fn original_len(&self) -> usize;
}

/// A compressed payload and the side-metadata needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<M> {
    /// Compressed bytes.
    pub payload: Vec<u8>,
    /// Side-metadata for the decoder.
    pub metadata: M,
}

impl<M: SideMetadata> Encoded<M> {
    /// Length of the data before compression.
    pub fn original_len(&self) -> usize {
        self.metadata.original_len()
    }

    /// Compressed size divided by original size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        let original = self.original_len();
        if original == 0 {
            return 0.0;
        }
        self.payload.len() as f64 / original as f64
    }
}

/// A whole-buffer codec.
pub trait Codec {
    /// Side-metadata produced by `encode` and required by `decode`.
    type Metadata: SideMetadata;

    /// Short lowercase name used in logs and on the command line.
    const NAME: &'static str;

    /// Compress `input`.
    fn encode(&self, input: &[u8]) -> Result<Encoded<Self::Metadata>>;

    /// Reverse `encode`.
    ///
    /// Damaged payloads are decoded best-effort; see
    /// [`DecodeOutcome`](crate::outcome::DecodeOutcome).
    fn decode(&self, payload: &[u8], metadata: &Self::Metadata) -> Result<Decoded>;
}
