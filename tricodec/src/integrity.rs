//! End-to-end integrity checks.

use serde::Serialize;
use tricodec_core::crc::Crc32;
use tricodec_core::error::{CodecError, Result};

/// CRC-32 of `data`.
pub fn checksum(data: &[u8]) -> u32 {
    Crc32::compute(data)
}

/// Check decoded bytes against the checksum recorded at compression time.
pub fn verify(expected: u32, decoded: &[u8]) -> Result<()> {
    let computed = checksum(decoded);
    if computed != expected {
        return Err(CodecError::integrity_mismatch(expected, computed));
    }
    Ok(())
}

/// Comparison of an original buffer with its decoded counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    /// Checksums are equal.
    pub matches: bool,
    /// CRC-32 of the original.
    pub original_checksum: u32,
    /// CRC-32 of the decoded data.
    pub decompressed_checksum: u32,
    /// Lengths are equal.
    pub sizes_match: bool,
}

impl IntegrityReport {
    /// Compare two buffers.
    pub fn compare(original: &[u8], decompressed: &[u8]) -> Self {
        let original_checksum = checksum(original);
        let decompressed_checksum = checksum(decompressed);
        Self {
            matches: original_checksum == decompressed_checksum,
            original_checksum,
            decompressed_checksum,
            sizes_match: original.len() == decompressed.len(),
        }
    }
}
