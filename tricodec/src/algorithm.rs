//! Algorithm selection by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tricodec_core::error::CodecError;

/// A supported compression algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Static Huffman coding.
    Huffman,
    /// Run-length encoding.
    Rle,
    /// Sliding-window LZ77.
    Lz77,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 3] = [Self::Huffman, Self::Rle, Self::Lz77];

    /// Lowercase name used on the command line and in sidecars.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Huffman => "huffman",
            Self::Rle => "rle",
            Self::Lz77 => "lz77",
        }
    }

    /// File extension for compressed payloads.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Huffman => "huf",
            Self::Rle => "rle",
            Self::Lz77 => "lz77",
        }
    }

    /// Descriptive information about the algorithm.
    pub fn info(&self) -> AlgorithmInfo {
        match self {
            Self::Huffman => AlgorithmInfo {
                algorithm: *self,
                name: "Huffman Coding",
                description: "Variable-length encoding based on byte frequency. Best for text \
                              with an uneven byte distribution.",
                best_for: &["Text files", "Source code", "JSON/XML files"],
                time_complexity: "O(n log n)",
                space_complexity: "O(n)",
                features: &[
                    "Lossless compression",
                    "Optimal for known frequencies",
                    "Variable-length codes",
                ],
            },
            Self::Rle => AlgorithmInfo {
                algorithm: *self,
                name: "Run-Length Encoding",
                description: "Replaces consecutive identical bytes with count-value pairs. Best \
                              for data with long runs.",
                best_for: &[
                    "Images with large solid areas",
                    "Simple graphics",
                    "Data with repetitive patterns",
                ],
                time_complexity: "O(n)",
                space_complexity: "O(1)",
                features: &[
                    "Simple and fast",
                    "Good for repetitive data",
                    "Can increase size for random data",
                ],
            },
            Self::Lz77 => AlgorithmInfo {
                algorithm: *self,
                name: "LZ77",
                description: "Dictionary compression over a sliding window. Replaces repeated \
                              strings with references to earlier occurrences.",
                best_for: &["General purpose", "Mixed content", "Binary files"],
                time_complexity: "O(n * window * lookahead)",
                space_complexity: "O(window_size)",
                features: &[
                    "Dictionary-based",
                    "Good general compression",
                    "Basis for many modern algorithms",
                ],
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CodecError::invalid_input(format!(
                    "unknown algorithm '{s}' (expected huffman, rle or lz77)"
                ))
            })
    }
}

/// Static description of an algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    /// The algorithm described.
    #[serde(skip)]
    pub algorithm: Algorithm,
    /// Display name.
    pub name: &'static str,
    /// One-paragraph description.
    pub description: &'static str,
    /// Typical inputs it does well on.
    pub best_for: &'static [&'static str],
    /// Time complexity.
    pub time_complexity: &'static str,
    /// Space complexity.
    pub space_complexity: &'static str,
    /// Notable properties.
    pub features: &'static [&'static str],
}
