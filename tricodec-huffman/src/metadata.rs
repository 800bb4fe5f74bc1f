//! Huffman side-metadata.

use crate::code::CodeTable;
use serde::{Deserialize, Serialize};
use tricodec_core::traits::SideMetadata;

/// Longest single-symbol input, in bytes (1 GiB).
///
/// A single-symbol payload is one byte whatever the original length, so
/// the declared length cannot be checked against the payload. Longer inputs
/// are rejected by the encoder and the decoder alike.
pub const MAX_SINGLE_SYMBOL_LEN: usize = 1 << 30;

/// Everything a Huffman decoder needs besides the packed bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanMetadata {
    /// Code table; absent for empty input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<CodeTable>,
    /// Number of bytes before compression.
    pub original_len: usize,
    /// Zero bits appended to reach a byte boundary (0-7).
    #[serde(default)]
    pub padding_bits: u8,
    /// The payload is the single repeated byte rather than packed codes.
    #[serde(default)]
    pub single_symbol: bool,
}

impl SideMetadata for HuffmanMetadata {
    fn original_len(&self) -> usize {
        self.original_len
    }
}
