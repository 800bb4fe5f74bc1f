//! Per-call codec options.

use serde::{Deserialize, Serialize};
use tricodec_core::error::Result;
use tricodec_lz77::Lz77Config;
use tricodec_rle::RleMode;

/// Options accepted by [`compress`](crate::compress).
///
/// Each field applies to one algorithm and is ignored by the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecOptions {
    /// RLE: use the escaped enhanced format.
    #[serde(default)]
    pub enhanced: bool,
    /// LZ77: search window in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    /// LZ77: longest match in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead_size: Option<usize>,
}

impl CodecOptions {
    /// RLE format selected by these options.
    pub fn rle_mode(&self) -> RleMode {
        if self.enhanced {
            RleMode::Enhanced
        } else {
            RleMode::Standard
        }
    }

    /// LZ77 window parameters, falling back to [`Lz77Config::DEFAULT`].
    pub fn lz77_config(&self) -> Result<Lz77Config> {
        Lz77Config::new(
            self.window_size
                .unwrap_or(Lz77Config::DEFAULT.window_size),
            self.lookahead_size
                .unwrap_or(Lz77Config::DEFAULT.lookahead_size),
        )
    }
}
