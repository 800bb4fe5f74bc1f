//! Self-contained Huffman container.
//!
//! ```text
//! +----------------------+------------------------+-----------------+
//! | table length (u32 BE)| code table (UTF-8 JSON)| packed payload  |
//! +----------------------+------------------------+-----------------+
//! ```
//!
//! The original length, padding bit count, and single-symbol flag are not
//! part of the container; they travel alongside it as side-metadata.
//! An empty encoding packs to an empty container.

use crate::code::CodeTable;
use crate::metadata::HuffmanMetadata;
use tricodec_core::error::{CodecError, Result};
use tricodec_core::traits::Encoded;

/// Size of the table length prefix.
pub const LENGTH_PREFIX: usize = 4;

/// Pack a payload and its code table into one container.
pub fn pack(encoded: &Encoded<HuffmanMetadata>) -> Result<Vec<u8>> {
    let table = match &encoded.metadata.table {
        Some(table) => table,
        None if encoded.payload.is_empty() => return Ok(Vec::new()),
        None => return Err(CodecError::missing_metadata("code table")),
    };

    let json = table.to_json()?;
    let table_len = u32::try_from(json.len())
        .map_err(|_| CodecError::invalid_input("code table too large to frame"))?;

    let mut output = Vec::with_capacity(LENGTH_PREFIX + json.len() + encoded.payload.len());
    output.extend_from_slice(&table_len.to_be_bytes());
    output.extend_from_slice(&json);
    output.extend_from_slice(&encoded.payload);
    Ok(output)
}

/// Split a container into its code table and packed payload.
///
/// An empty container yields no table and an empty payload.
pub fn unpack(container: &[u8]) -> Result<(Option<CodeTable>, &[u8])> {
    if container.is_empty() {
        return Ok((None, &[]));
    }

    let Some((prefix, rest)) = container.split_first_chunk::<LENGTH_PREFIX>() else {
        return Err(CodecError::corrupt(
            0,
            "container shorter than its table length prefix",
        ));
    };
    let table_len = u32::from_be_bytes(*prefix) as usize;
    if table_len > rest.len() {
        return Err(CodecError::corrupt(
            LENGTH_PREFIX as u64,
            format!(
                "table length {table_len} exceeds the {} bytes available",
                rest.len()
            ),
        ));
    }

    let (json, payload) = rest.split_at(table_len);
    let table = CodeTable::from_json(json)?;
    let table = if table.is_empty() { None } else { Some(table) };
    Ok((table, payload))
}

/// Unpack a container and attach its table to the out-of-band fields.
pub fn unpack_with(
    container: &[u8],
    original_len: usize,
    padding_bits: u8,
    single_symbol: bool,
) -> Result<(HuffmanMetadata, &[u8])> {
    let (table, payload) = unpack(container)?;
    Ok((
        HuffmanMetadata {
            table,
            original_len,
            padding_bits,
            single_symbol,
        },
        payload,
    ))
}
