//! RLE side-metadata.

use crate::config::RleMode;
use serde::{Deserialize, Serialize};
use tricodec_core::traits::SideMetadata;

/// Values an RLE decoder needs besides the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RleMetadata {
    /// Number of bytes before compression.
    pub original_len: usize,
    /// Wire format of the payload.
    #[serde(default)]
    pub mode: RleMode,
}

impl SideMetadata for RleMetadata {
    fn original_len(&self) -> usize {
        self.original_len
    }
}
