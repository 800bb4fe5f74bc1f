//! JSON sidecar stored next to a compressed payload.
//!
//! The sidecar carries every out-of-band value a decoder needs (original
//! length, Huffman padding and single-symbol flag, RLE mode) plus a CRC-32
//! of the original data and the parameters the payload was produced with.

use crate::algorithm::Algorithm;
use serde::{Deserialize, Serialize};
use tricodec_core::error::{CodecError, Result};
use tricodec_huffman::{CodeTable, HuffmanMetadata};
use tricodec_lz77::Lz77Metadata;
use tricodec_rle::{RleMetadata, RleMode};

/// Sidecar format version written by this crate.
pub const FORMAT_VERSION: &str = "1.0";

/// Side-metadata record for one compressed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidecar {
    /// Algorithm that produced the payload.
    pub algorithm: Algorithm,
    /// Name of the original file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Input size in bytes.
    pub original_size: usize,
    /// Payload size in bytes.
    pub compressed_size: usize,
    /// Huffman: code table, duplicated from the payload container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<CodeTable>,
    /// Huffman: zero bits appended to the last byte.
    #[serde(default)]
    pub padding: u8,
    /// Huffman: payload holds one repeated byte.
    #[serde(default)]
    pub single_symbol: bool,
    /// RLE: payload uses the enhanced format.
    #[serde(default)]
    pub enhanced: bool,
    /// LZ77: encoder window size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    /// LZ77: encoder lookahead size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead_size: Option<usize>,
    /// CRC-32 of the original data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<u32>,
    /// Percentage of the original size removed.
    #[serde(default)]
    pub compression_ratio: f64,
    /// Sidecar format version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

impl Sidecar {
    /// A sidecar with only the fields every algorithm needs.
    pub fn new(algorithm: Algorithm, original_size: usize, compressed_size: usize) -> Self {
        Self {
            algorithm,
            original_name: None,
            original_size,
            compressed_size,
            table: None,
            padding: 0,
            single_symbol: false,
            enhanced: false,
            window_size: None,
            lookahead_size: None,
            checksum: None,
            compression_ratio: crate::stats::compression_ratio(original_size, compressed_size),
            version: default_version(),
        }
    }

    /// Parse a sidecar from JSON.
    pub fn from_json(json: &[u8]) -> Result<Self> {
        serde_json::from_slice(json)
            .map_err(|e| CodecError::invalid_input(format!("invalid sidecar: {e}")))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CodecError::invalid_input(format!("cannot serialize sidecar: {e}")))
    }

    /// Huffman decoder metadata, using `table` when the payload carried one.
    pub fn huffman_metadata(&self, table: Option<CodeTable>) -> HuffmanMetadata {
        HuffmanMetadata {
            table: table.or_else(|| self.table.clone()),
            original_len: self.original_size,
            padding_bits: self.padding,
            single_symbol: self.single_symbol,
        }
    }

    /// RLE decoder metadata.
    pub fn rle_metadata(&self) -> RleMetadata {
        RleMetadata {
            original_len: self.original_size,
            mode: if self.enhanced {
                RleMode::Enhanced
            } else {
                RleMode::Standard
            },
        }
    }

    /// LZ77 decoder metadata.
    pub fn lz77_metadata(&self) -> Lz77Metadata {
        let defaults = tricodec_lz77::Lz77Config::DEFAULT;
        Lz77Metadata {
            original_len: self.original_size,
            window_size: self.window_size.unwrap_or(defaults.window_size),
            lookahead_size: self.lookahead_size.unwrap_or(defaults.lookahead_size),
        }
    }
}
