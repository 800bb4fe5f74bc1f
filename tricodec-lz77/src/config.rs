//! LZ77 window configuration and wire constants.

use serde::{Deserialize, Serialize};
use tricodec_core::error::{CodecError, Result};

/// Escape byte introducing a match token.
pub const ESCAPE: u8 = 0xFF;

/// Marker following [`ESCAPE`] for a literal escape byte.
pub const LITERAL_ESCAPE: u8 = 0x00;

/// Offset added to every stored distance.
///
/// Keeps the high distance byte non-zero so a match can never be confused
/// with the `(ESCAPE, LITERAL_ESCAPE)` sequence.
pub const DISTANCE_BIAS: usize = 0x100;

/// Largest distance the 16-bit biased field can hold.
pub const MAX_WINDOW: usize = u16::MAX as usize - DISTANCE_BIAS;

/// Shortest match worth a token.
pub const MIN_MATCH: usize = 3;

/// Longest match a one-byte length field can hold.
pub const MAX_MATCH: usize = u8::MAX as usize;

/// Sliding-window parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lz77Config {
    /// How far back the encoder searches for matches.
    pub window_size: usize,
    /// Longest match the encoder will emit.
    pub lookahead_size: usize,
}

impl Lz77Config {
    /// 4 KiB window, longest match the format allows.
    pub const DEFAULT: Self = Self {
        window_size: 4096,
        lookahead_size: MAX_MATCH,
    };

    /// Largest window the distance field can address.
    pub const MAX: Self = Self {
        window_size: MAX_WINDOW,
        lookahead_size: MAX_MATCH,
    };

    /// Create a validated configuration.
    pub fn new(window_size: usize, lookahead_size: usize) -> Result<Self> {
        let config = Self {
            window_size,
            lookahead_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check both sizes against the limits of the wire format.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW).contains(&self.window_size) {
            return Err(CodecError::invalid_input(format!(
                "window size must be 1-{MAX_WINDOW}, got {}",
                self.window_size
            )));
        }
        if !(MIN_MATCH..=MAX_MATCH).contains(&self.lookahead_size) {
            return Err(CodecError::invalid_input(format!(
                "lookahead size must be {MIN_MATCH}-{MAX_MATCH}, got {}",
                self.lookahead_size
            )));
        }
        Ok(())
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Lz77Config::DEFAULT;
        assert_eq!(config.window_size, 4096);
        assert_eq!(config.lookahead_size, 255);
        assert!(config.validate().is_ok());
        assert!(Lz77Config::MAX.validate().is_ok());
    }

    #[test]
    fn test_limits() {
        assert_eq!(MAX_WINDOW, 65279);
        assert!(Lz77Config::new(0, 18).is_err());
        assert!(Lz77Config::new(MAX_WINDOW + 1, 18).is_err());
        assert!(Lz77Config::new(1024, 2).is_err());
        assert!(Lz77Config::new(1024, 256).is_err());
        assert!(Lz77Config::new(1024, 18).is_ok());
    }
}
