//! Compression and decompression reports.

use crate::algorithm::Algorithm;
use serde::Serialize;
use std::time::Duration;
use tricodec_core::outcome::Decoded;

/// Percentage of the original size removed by compression.
///
/// Negative when the payload grew; zero for empty input.
pub fn compression_ratio(original_size: usize, compressed_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0
}

/// Weighted score of compression ratio (70%) and speed (30%).
///
/// The speed term loses one point per second of processing time. An
/// instantaneous run scores 100.
pub fn efficiency(ratio: f64, processing_ms: f64) -> f64 {
    if processing_ms == 0.0 {
        return 100.0;
    }
    let time_score = (100.0 - processing_ms / 1000.0).max(0.0);
    let compression_score = ratio.min(100.0);
    round2(compression_score * 0.7 + time_score * 0.3)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bytes and percentage saved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpaceSaved {
    /// Original minus compressed size.
    pub bytes: i64,
    /// Same as the compression ratio.
    pub percentage: f64,
}

/// Statistics for one compression call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Input size in bytes.
    pub original_size: usize,
    /// Payload size in bytes.
    pub compressed_size: usize,
    /// Compression ratio rounded to two decimals.
    pub compression_ratio: f64,
    /// Space saved.
    pub space_saved: SpaceSaved,
    /// Wall-clock time in milliseconds, rounded to two decimals.
    pub processing_time_ms: f64,
    /// Efficiency score, see [`efficiency`].
    pub efficiency: f64,
}

impl CompressionReport {
    /// Build a report from sizes and elapsed time.
    pub fn new(
        algorithm: Algorithm,
        original_size: usize,
        compressed_size: usize,
        elapsed: Duration,
    ) -> Self {
        let ratio = compression_ratio(original_size, compressed_size);
        let processing_ms = elapsed.as_secs_f64() * 1000.0;
        Self {
            algorithm,
            original_size,
            compressed_size,
            compression_ratio: round2(ratio),
            space_saved: SpaceSaved {
                bytes: original_size as i64 - compressed_size as i64,
                percentage: ratio,
            },
            processing_time_ms: round2(processing_ms),
            efficiency: efficiency(ratio, processing_ms),
        }
    }
}

/// Statistics for one decompression call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompressionReport {
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Payload size in bytes.
    pub compressed_size: usize,
    /// Output size in bytes.
    pub decompressed_size: usize,
    /// Wall-clock time in milliseconds, rounded to two decimals.
    pub processing_time_ms: f64,
    /// CRC-32 of the output.
    pub checksum: u32,
    /// `exact`, `degraded` or `placeholder`.
    pub status: &'static str,
    /// Number of recovery warnings.
    pub warnings: usize,
}

impl DecompressionReport {
    /// Build a report for a finished decode.
    pub fn new(
        algorithm: Algorithm,
        compressed_size: usize,
        decoded: &Decoded,
        elapsed: Duration,
    ) -> Self {
        let status = if decoded.outcome.is_exact() {
            "exact"
        } else if decoded.outcome.is_placeholder() {
            "placeholder"
        } else {
            "degraded"
        };
        Self {
            algorithm,
            compressed_size,
            decompressed_size: decoded.data.len(),
            processing_time_ms: round2(elapsed.as_secs_f64() * 1000.0),
            checksum: crate::integrity::checksum(&decoded.data),
            status,
            warnings: decoded.outcome.warnings().len(),
        }
    }
}
