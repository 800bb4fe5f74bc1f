//! # Tricodec Core
//!
//! Core components shared by the Tricodec codecs.
//!
//! - [`bitstream`]: MSB-first bit I/O for Huffman code packing
//! - [`crc`]: CRC-32 checksums for end-to-end verification
//! - [`outcome`]: Tagged decode results and warning collection
//! - [`traits`]: The [`Codec`] trait and the [`Encoded`] payload/metadata pair
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Facade / CLI                                            │
//! │     Algorithm dispatch, sidecar records, statistics     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codecs                                                  │
//! │     Huffman, RLE (standard/enhanced), LZ77              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     Bit I/O, CRC-32, decode outcomes, errors            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tricodec_core::crc::Crc32;
//! use tricodec_core::outcome::{DecodeWarning, Diagnostics};
//!
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//!
//! let mut diag = Diagnostics::new("example");
//! diag.warn(DecodeWarning::TruncatedToken { offset: 3 });
//! let decoded = diag.finish(vec![1, 2, 3]);
//! assert_eq!(decoded.outcome.warnings().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod crc;
pub mod error;
pub mod outcome;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{MsbBitReader, MsbBitWriter};
pub use crc::Crc32;
pub use error::{CodecError, Result};
pub use outcome::{
    BoundedOutput, DecodeOutcome, DecodeWarning, Decoded, Diagnostics, ensure_declared_len,
};
pub use traits::{Codec, Encoded, SideMetadata};
