//! LZ77 side-metadata.

use crate::config::Lz77Config;
use serde::{Deserialize, Serialize};
use tricodec_core::traits::SideMetadata;

/// Values recorded next to an LZ77 payload.
///
/// Only `original_len` is needed to decode; the window parameters describe
/// how the payload was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lz77Metadata {
    /// Number of bytes before compression.
    pub original_len: usize,
    /// Encoder window size.
    pub window_size: usize,
    /// Encoder lookahead size.
    pub lookahead_size: usize,
}

impl Lz77Metadata {
    /// Metadata for `original_len` bytes encoded with `config`.
    pub fn new(original_len: usize, config: &Lz77Config) -> Self {
        Self {
            original_len,
            window_size: config.window_size,
            lookahead_size: config.lookahead_size,
        }
    }
}

impl SideMetadata for Lz77Metadata {
    fn original_len(&self) -> usize {
        self.original_len
    }
}
