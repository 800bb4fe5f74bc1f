//! Huffman codes and the code table.
//!
//! A [`BitCode`] is a packed, MSB-first bit string of up to 128 bits. The
//! [`CodeTable`] maps byte values to codes and is the side-metadata a
//! Huffman payload cannot be decoded without. On the wire it is a JSON object
//! keyed by the decimal byte value, with each code written as a string of
//! `0`/`1` digits:
//!
//! ```text
//! {"65":"0","66":"10","67":"11"}
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tricodec_core::bitstream::MsbBitWriter;
use tricodec_core::error::{CodecError, Result};

/// A variable-length code, stored MSB-first in the low `len` bits of `bits`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitCode {
    bits: u128,
    len: u8,
}

impl BitCode {
    /// Longest representable code.
    pub const MAX_LEN: u8 = 128;

    /// The empty code.
    pub const fn empty() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Append one bit, or `None` if the code is already [`Self::MAX_LEN`] long.
    pub fn push(self, bit: bool) -> Option<Self> {
        if self.len >= Self::MAX_LEN {
            return None;
        }
        Some(Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        })
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// True for the empty code.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `index`, counting from the first bit of the code.
    pub fn bit(&self, index: u8) -> bool {
        debug_assert!(index < self.len);
        (self.bits >> (self.len - 1 - index)) & 1 == 1
    }

    /// Bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    /// Append this code to a bit writer.
    pub fn write_to(&self, writer: &mut MsbBitWriter) -> Result<()> {
        let mut remaining = self.len;
        while remaining > 0 {
            let take = remaining.min(32);
            let chunk = (self.bits >> (remaining - take)) as u32;
            writer.write_bits(chunk, take)?;
            remaining -= take;
        }
        Ok(())
    }
}

impl fmt::Display for BitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitCode(\"{self}\")")
    }
}

impl FromStr for BitCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CodecError::invalid_code_table("empty code"));
        }
        let mut code = BitCode::empty();
        for c in s.chars() {
            let bit = match c {
                '0' => false,
                '1' => true,
                other => {
                    return Err(CodecError::invalid_code_table(format!(
                        "code {s:?} contains non-binary digit {other:?}"
                    )));
                }
            };
            code = code.push(bit).ok_or_else(|| {
                CodecError::invalid_code_table(format!(
                    "code longer than {} bits",
                    BitCode::MAX_LEN
                ))
            })?;
        }
        Ok(code)
    }
}

impl Serialize for BitCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BitCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Mapping from byte value to Huffman code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitCode>,
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for a single-symbol payload: the symbol gets code `0`.
    pub fn single(symbol: u8) -> Self {
        let mut table = Self::new();
        if let Some(code) = BitCode::empty().push(false) {
            table.insert(symbol, code);
        }
        table
    }

    /// Set the code for `symbol`.
    pub fn insert(&mut self, symbol: u8, code: BitCode) {
        self.codes.insert(symbol, code);
    }

    /// Code for `symbol`.
    pub fn get(&self, symbol: u8) -> Option<BitCode> {
        self.codes.get(&symbol).copied()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, BitCode)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Dense lookup array for encoding.
    pub fn to_lookup(&self) -> [Option<BitCode>; 256] {
        let mut lookup = [None; 256];
        for (symbol, code) in self.iter() {
            lookup[symbol as usize] = Some(code);
        }
        lookup
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CodecError::invalid_code_table(e.to_string()))
    }

    /// Parse the JSON wire form.
    pub fn from_json(json: &[u8]) -> Result<Self> {
        serde_json::from_slice(json).map_err(|e| CodecError::invalid_code_table(e.to_string()))
    }
}

impl FromIterator<(u8, BitCode)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, BitCode)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> BitCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let c = code("0110");
        assert_eq!(c.len(), 4);
        assert_eq!(c.to_string(), "0110");
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![false, true, true, false]);
    }

    #[test]
    fn test_leading_zeros_preserved() {
        assert_ne!(code("01"), code("1"));
        assert_ne!(code("00"), code("0"));
        assert_eq!(code("0001").to_string(), "0001");
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert!("".parse::<BitCode>().is_err());
        assert!("012".parse::<BitCode>().is_err());
        assert!("1".repeat(129).parse::<BitCode>().is_err());
        assert!("1".repeat(128).parse::<BitCode>().is_ok());
    }

    #[test]
    fn test_write_long_code() {
        let long = format!("1{}1", "0".repeat(38));
        let c = code(&long);
        let mut writer = MsbBitWriter::new();
        c.write_to(&mut writer).unwrap();
        let (data, padding) = writer.finish();
        assert_eq!(padding, 0);
        assert_eq!(data, vec![0x80, 0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_table_json_shape() {
        let table: CodeTable = [(65u8, code("0")), (66u8, code("10")), (67u8, code("11"))]
            .into_iter()
            .collect();
        let json = String::from_utf8(table.to_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"65":"0","66":"10","67":"11"}"#);

        let back = CodeTable::from_json(json.as_bytes()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_table_json_rejects_garbage() {
        assert!(CodeTable::from_json(br#"{"65":"0a"}"#).is_err());
        assert!(CodeTable::from_json(br#"{"300":"0"}"#).is_err());
        assert!(CodeTable::from_json(b"not json").is_err());
    }

    #[test]
    fn test_single_table() {
        let table = CodeTable::single(0x41);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0x41).unwrap().to_string(), "0");
    }
}
