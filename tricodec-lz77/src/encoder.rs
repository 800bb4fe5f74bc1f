//! LZ77 encoder (compression).

use crate::config::Lz77Config;
use crate::matcher::find_longest_match;
use crate::metadata::Lz77Metadata;
use crate::token::Lz77Token;
use tricodec_core::error::Result;
use tricodec_core::traits::Encoded;

/// Sliding-window LZ77 encoder.
#[derive(Debug, Clone, Copy)]
pub struct Lz77Encoder {
    config: Lz77Config,
}

impl Lz77Encoder {
    /// Create an encoder, validating the configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The encoder's window parameters.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Split the input into literals and matches.
    ///
    /// A match never covers the last input byte, so every match token has
    /// a real byte to carry as `next` and the tokens describe exactly
    /// `input.len()` bytes.
    pub fn tokenize(&self, input: &[u8]) -> Vec<Lz77Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let remaining = input.len() - pos;
            let max_len = self.config.lookahead_size.min(remaining - 1);
            match find_longest_match(input, pos, self.config.window_size, max_len) {
                Some(m) => {
                    tokens.push(Lz77Token::Match {
                        distance: m.distance as u16,
                        length: m.length as u8,
                        next: input[pos + m.length],
                    });
                    pos += m.length + 1;
                }
                None => {
                    tokens.push(Lz77Token::Literal(input[pos]));
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Encode the input into the LZ77 wire format.
    pub fn encode(&self, input: &[u8]) -> Encoded<Lz77Metadata> {
        let tokens = self.tokenize(input);
        let mut payload = Vec::with_capacity(tokens.iter().map(Lz77Token::encoded_len).sum());
        for token in &tokens {
            token.write_to(&mut payload);
        }

        tracing::debug!(
            original = input.len(),
            compressed = payload.len(),
            tokens = tokens.len(),
            matches = tokens
                .iter()
                .filter(|t| matches!(t, Lz77Token::Match { .. }))
                .count(),
            "lz77 encode"
        );

        Encoded {
            payload,
            metadata: Lz77Metadata::new(input.len(), &self.config),
        }
    }
}

impl Default for Lz77Encoder {
    fn default() -> Self {
        Self {
            config: Lz77Config::DEFAULT,
        }
    }
}
