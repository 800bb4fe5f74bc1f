//! LZ77 token model and wire format.
//!
//! ```text
//! literal          [byte]                        byte != 0xFF
//! literal 0xFF     [0xFF][0x00]
//! match            [0xFF][dist_hi][dist_lo][length][next]
//! ```
//!
//! The stored distance is biased by [`DISTANCE_BIAS`], so `dist_hi` of a
//! match is never zero.

use crate::config::{DISTANCE_BIAS, ESCAPE, LITERAL_ESCAPE, MAX_MATCH};

/// Length of an encoded match token.
pub const MATCH_TOKEN_LEN: usize = 5;

/// Most bytes a payload of `payload_len` bytes can decode to.
///
/// Only a match token expands, to at most `MAX_MATCH + 1` bytes; every
/// other byte, valid or not, decodes to at most one byte.
pub fn max_decoded_len(payload_len: usize) -> usize {
    (payload_len / MATCH_TOKEN_LEN)
        .saturating_mul(MAX_MATCH + 1)
        .saturating_add(payload_len % MATCH_TOKEN_LEN)
}

/// One LZ77 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz77Token {
    /// A raw byte.
    Literal(u8),
    /// A back-reference followed by the byte after it.
    Match {
        /// Distance back from the current output position (1-65279).
        distance: u16,
        /// Number of bytes to copy.
        length: u8,
        /// Byte emitted after the copy.
        next: u8,
    },
}

impl Lz77Token {
    /// Number of bytes this token occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Literal(ESCAPE) => 2,
            Self::Literal(_) => 1,
            Self::Match { .. } => MATCH_TOKEN_LEN,
        }
    }

    /// Number of output bytes this token produces.
    pub fn decoded_len(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => *length as usize + 1,
        }
    }

    /// Append the wire form of this token to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match *self {
            Self::Literal(ESCAPE) => out.extend_from_slice(&[ESCAPE, LITERAL_ESCAPE]),
            Self::Literal(byte) => out.push(byte),
            Self::Match {
                distance,
                length,
                next,
            } => {
                let biased = (distance as usize + DISTANCE_BIAS) as u16;
                out.push(ESCAPE);
                out.extend_from_slice(&biased.to_be_bytes());
                out.push(length);
                out.push(next);
            }
        }
    }
}

/// Result of scanning the payload at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scanned {
    /// A syntactically complete token and its wire length.
    Token(Lz77Token, usize),
    /// An escape byte with too few bytes after it to form a token.
    TruncatedEscape,
}

/// Read the token starting at `offset`, which must be in bounds.
pub(crate) fn scan(payload: &[u8], offset: usize) -> Scanned {
    let byte = payload[offset];
    if byte != ESCAPE {
        return Scanned::Token(Lz77Token::Literal(byte), 1);
    }
    if payload.get(offset + 1) == Some(&LITERAL_ESCAPE) {
        return Scanned::Token(Lz77Token::Literal(ESCAPE), 2);
    }
    match payload.get(offset + 1..offset + MATCH_TOKEN_LEN) {
        Some(&[hi, lo, length, next]) => {
            let biased = u16::from_be_bytes([hi, lo]);
            Scanned::Token(
                Lz77Token::Match {
                    distance: biased - DISTANCE_BIAS as u16,
                    length,
                    next,
                },
                MATCH_TOKEN_LEN,
            )
        }
        _ => Scanned::TruncatedEscape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_literals() {
        let mut out = Vec::new();
        Lz77Token::Literal(b'a').write_to(&mut out);
        Lz77Token::Literal(0xFF).write_to(&mut out);
        assert_eq!(out, vec![b'a', 0xFF, 0x00]);
    }

    #[test]
    fn test_write_match_is_biased() {
        let mut out = Vec::new();
        let token = Lz77Token::Match {
            distance: 1,
            length: 8,
            next: b'a',
        };
        token.write_to(&mut out);
        assert_eq!(out, vec![0xFF, 0x01, 0x01, 8, b'a']);
        assert_eq!(token.encoded_len(), out.len());
        assert_eq!(token.decoded_len(), 9);
    }

    #[test]
    fn test_scan_match() {
        let payload = [0xFF, 0x01, 0x05, 4, b'z'];
        assert_eq!(
            scan(&payload, 0),
            Scanned::Token(
                Lz77Token::Match {
                    distance: 5,
                    length: 4,
                    next: b'z'
                },
                5
            )
        );
    }

    #[test]
    fn test_scan_escaped_literal_at_end() {
        assert_eq!(
            scan(&[0xFF, 0x00], 0),
            Scanned::Token(Lz77Token::Literal(0xFF), 2)
        );
    }

    #[test]
    fn test_max_decoded_len() {
        assert_eq!(max_decoded_len(0), 0);
        assert_eq!(max_decoded_len(4), 4);
        assert_eq!(max_decoded_len(5), 256);
        assert_eq!(max_decoded_len(78), 15 * 256 + 3);
    }

    #[test]
    fn test_scan_truncated() {
        assert_eq!(scan(&[0xFF], 0), Scanned::TruncatedEscape);
        assert_eq!(scan(&[b'x', 0xFF, 0x01, 0x01], 1), Scanned::TruncatedEscape);
    }
}
