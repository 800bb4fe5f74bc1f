//! # Tricodec
//!
//! One entry point for the three Tricodec codecs.
//!
//! - [`compress`] runs the chosen algorithm and returns the payload, a
//!   [`Sidecar`] with everything needed to decode it, and a
//!   [`CompressionReport`].
//! - [`decompress`] decodes a payload with its sidecar.
//! - [`decompress_without_sidecar`] is the best-effort path for payloads
//!   whose sidecar was lost. RLE and LZ77 can recover; Huffman cannot,
//!   because its bit stream is not self-describing without the sidecar.
//!
//! Huffman payloads produced here are framed containers
//! (`[u32 BE table length][JSON table][bits]`, see
//! [`tricodec_huffman::framing`]).
//!
//! ## Example
//!
//! ```rust
//! use tricodec::{Algorithm, CodecOptions, compress, decompress, integrity};
//!
//! let data = b"mississippi mississippi mississippi";
//! let compressed = compress(Algorithm::Lz77, data, &CodecOptions::default()).unwrap();
//! let decoded = decompress(&compressed.payload, &compressed.sidecar).unwrap();
//! assert_eq!(decoded.data, data);
//! integrity::verify(compressed.sidecar.checksum.unwrap(), &decoded.data).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod integrity;
pub mod options;
pub mod sidecar;
pub mod stats;

pub use algorithm::{Algorithm, AlgorithmInfo};
pub use options::CodecOptions;
pub use sidecar::Sidecar;
pub use stats::{CompressionReport, DecompressionReport};
pub use tricodec_core::{CodecError, DecodeOutcome, DecodeWarning, Decoded, Result};

use std::time::Instant;
use tricodec_core::{Codec, ensure_declared_len};
use tricodec_huffman::{HuffmanCodec, framing};
use tricodec_lz77::Lz77Codec;
use tricodec_rle::RleCodec;

/// Output of [`compress`].
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Compressed bytes.
    pub payload: Vec<u8>,
    /// Side-metadata needed to decode `payload`.
    pub sidecar: Sidecar,
    /// Sizes, ratio and timing.
    pub report: CompressionReport,
}

/// Compress `data` with the given algorithm.
pub fn compress(algorithm: Algorithm, data: &[u8], options: &CodecOptions) -> Result<Compressed> {
    let start = Instant::now();

    let (payload, mut sidecar) = match algorithm {
        Algorithm::Huffman => {
            let encoded = HuffmanCodec.encode(data)?;
            let payload = framing::pack(&encoded)?;
            let mut sidecar = Sidecar::new(algorithm, data.len(), payload.len());
            sidecar.padding = encoded.metadata.padding_bits;
            sidecar.single_symbol = encoded.metadata.single_symbol;
            sidecar.table = encoded.metadata.table;
            (payload, sidecar)
        }
        Algorithm::Rle => {
            let encoded = RleCodec::new(options.rle_mode()).encode(data)?;
            let mut sidecar = Sidecar::new(algorithm, data.len(), encoded.payload.len());
            sidecar.enhanced = options.enhanced;
            (encoded.payload, sidecar)
        }
        Algorithm::Lz77 => {
            let config = options.lz77_config()?;
            let encoded = Lz77Codec::new(config)?.encode(data)?;
            let mut sidecar = Sidecar::new(algorithm, data.len(), encoded.payload.len());
            sidecar.window_size = Some(config.window_size);
            sidecar.lookahead_size = Some(config.lookahead_size);
            (encoded.payload, sidecar)
        }
    };
    sidecar.checksum = Some(integrity::checksum(data));

    let report = CompressionReport::new(algorithm, data.len(), payload.len(), start.elapsed());
    tracing::info!(
        %algorithm,
        original = report.original_size,
        compressed = report.compressed_size,
        ratio = report.compression_ratio,
        "compressed"
    );

    Ok(Compressed {
        payload,
        sidecar,
        report,
    })
}

/// Decompress a payload with its sidecar.
///
/// Corrupt payloads are decoded tolerantly; check
/// [`Decoded::outcome`] before trusting the data.
pub fn decompress(payload: &[u8], sidecar: &Sidecar) -> Result<Decoded> {
    let decoded = match sidecar.algorithm {
        Algorithm::Huffman => {
            let (table, bits) = framing::unpack(payload)?;
            HuffmanCodec.decode(bits, &sidecar.huffman_metadata(table))?
        }
        Algorithm::Rle => RleCodec::default().decode(payload, &sidecar.rle_metadata())?,
        Algorithm::Lz77 => Lz77Codec::default().decode(payload, &sidecar.lz77_metadata())?,
    };
    tracing::info!(
        algorithm = %sidecar.algorithm,
        compressed = payload.len(),
        decompressed = decoded.data.len(),
        exact = decoded.outcome.is_exact(),
        "decompressed"
    );
    Ok(decoded)
}

/// Placeholder size for an LZ77 payload whose original size is unknown.
pub fn estimated_size(payload_len: usize) -> usize {
    payload_len.saturating_mul(3).max(1024)
}

/// Decompress a payload whose sidecar is missing.
///
/// - RLE: the mode is detected from the payload. With `original_size` the
///   output is fitted to it; without, the stream's own length is used.
///   Either way the result carries a [`DecodeWarning::ModeInferred`].
/// - LZ77: a well-formed stream yields every byte it describes. A
///   malformed stream yields a [`DecodeOutcome::Placeholder`] of
///   `original_size` or [`estimated_size`] bytes.
/// - Huffman: fails with [`CodecError::MissingMetadata`].
///
/// An `original_size` larger than the payload can decode to fails with
/// [`CodecError::InvalidInput`].
pub fn decompress_without_sidecar(
    algorithm: Algorithm,
    payload: &[u8],
    original_size: Option<usize>,
) -> Result<Decoded> {
    tracing::warn!(%algorithm, "decompressing without sidecar");
    match algorithm {
        Algorithm::Huffman => Err(CodecError::missing_metadata("huffman sidecar")),
        Algorithm::Rle => {
            let decoder = tricodec_rle::RleDecoder::new();
            let (_, decoded) = match original_size {
                Some(len) => decoder.decode_auto(payload, len)?,
                None => decoder.decode_unsized(payload),
            };
            Ok(decoded)
        }
        Algorithm::Lz77 => {
            let estimated = match original_size {
                Some(len) => {
                    let ceiling = tricodec_lz77::max_decoded_len(payload.len());
                    ensure_declared_len("lz77", len, ceiling)?;
                    len
                }
                None => estimated_size(payload.len()),
            };
            Ok(tricodec_lz77::decompress_best_effort(payload, estimated))
        }
    }
}
