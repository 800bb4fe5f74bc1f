//! RLE modes and format constants.

use serde::{Deserialize, Serialize};

/// Longest run a single record can describe.
pub const MAX_RUN: usize = 255;

/// Escape byte introducing an enhanced-mode run record.
pub const ESCAPE: u8 = 0xFF;

/// Marker following [`ESCAPE`] for a literal escape byte.
pub const LITERAL_ESCAPE: u8 = 0x00;

/// Shortest run the enhanced mode writes as a run record.
pub const ENHANCED_MIN_RUN: usize = 3;

/// RLE wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RleMode {
    /// Every run is a `(run length, value)` pair, even runs of one.
    #[default]
    Standard,
    /// Literal bytes, with `(ESCAPE, run length, value)` records for runs of
    /// three or more and `(ESCAPE, 0x00)` for a literal escape byte.
    Enhanced,
}

impl RleMode {
    /// Mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Enhanced => "enhanced",
        }
    }

    /// Most bytes a payload of `payload_len` bytes can decode to.
    ///
    /// Standard packs at most one full run per pair. Enhanced packs at most
    /// one full run per three-byte record, with up to two leftover bytes
    /// decoding to one byte each.
    pub fn max_decoded_len(&self, payload_len: usize) -> usize {
        match self {
            Self::Standard => (payload_len / 2).saturating_mul(MAX_RUN),
            Self::Enhanced => (payload_len / 3)
                .saturating_mul(MAX_RUN)
                .saturating_add(payload_len % 3),
        }
    }
}

impl std::fmt::Display for RleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
