//! MSB-first bit stream operations.
//!
//! Tricodec packs variable-length codes MSB-first: the first bit of the
//! stream lands in the most significant bit of the first byte. The final
//! partial byte is padded with zero bits and the number of padding bits
//! (0-7) is reported so the reader can exclude them.
//!
//! # Example
//!
//! ```
//! use tricodec_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let (data, padding) = writer.finish();
//! assert_eq!(data, vec![0b1011_1000]);
//! assert_eq!(padding, 1);
//!
//! let mut reader = MsbBitReader::with_padding(&data, padding);
//! assert_eq!(reader.read_bits(3), Some(0b101));
//! assert_eq!(reader.read_bits(4), Some(0b1100));
//! assert_eq!(reader.read_bit(), None);
//! ```

use crate::error::{CodecError, Result};

/// MSB-first bit reader over a byte slice.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of readable bits (trailing padding excluded).
    bit_len: u64,
    /// Next bit to read.
    bit_pos: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_padding(data, 0)
    }

    /// Create a reader that ignores the last `padding_bits` bits of `data`.
    pub fn with_padding(data: &'a [u8], padding_bits: u8) -> Self {
        let total = data.len() as u64 * 8;
        Self {
            data,
            bit_len: total.saturating_sub(padding_bits as u64),
            bit_pos: 0,
        }
    }

    /// Read a single bit, or `None` once the readable bits are exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_pos >= self.bit_len {
            return None;
        }
        let byte = self.data[(self.bit_pos / 8) as usize];
        let shift = 7 - (self.bit_pos % 8) as u8;
        self.bit_pos += 1;
        Some((byte >> shift) & 1 == 1)
    }

    /// Read up to 32 bits (MSB-first). Returns `None` if fewer remain.
    pub fn read_bits(&mut self, count: u8) -> Option<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");
        if self.remaining() < count as u64 {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..count {
            let bit = self.read_bit()?;
            value = (value << 1) | bit as u32;
        }
        Some(value)
    }

    /// Number of readable bits left.
    pub fn remaining(&self) -> u64 {
        self.bit_len - self.bit_pos
    }

    /// Position of the next bit to be read.
    pub fn bit_position(&self) -> u64 {
        self.bit_pos
    }
}

/// MSB-first bit writer producing a byte vector.
#[derive(Debug)]
pub struct MsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer (MSB-first).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
}

impl MsbBitWriter {
    /// Create a new MSB bit writer.
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Create a writer with room for `bytes` bytes of output.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Write up to 32 bits to the stream (MSB-first).
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count > 32 {
            return Err(CodecError::invalid_input(format!(
                "cannot write {count} bits at once (max 32)"
            )));
        }
        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;

        // Flush complete bytes (from MSB side)
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;

        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer = (self.buffer << 1) | bit as u64;
        self.bits_in_buffer += 1;
        if self.bits_in_buffer == 8 {
            self.output.push(self.buffer as u8);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }

    /// Total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.output.len() as u64 * 8 + self.bits_in_buffer as u64
    }

    /// Pad the last byte with zero bits and return the output together with
    /// the number of padding bits added (0-7).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let mut padding = 0;
        if self.bits_in_buffer > 0 {
            padding = 8 - self.bits_in_buffer;
            let byte = (self.buffer << padding) as u8;
            self.output.push(byte);
        }
        (self.output, padding)
    }
}

impl Default for MsbBitWriter {
    fn default() -> Self {
        Self::new()
    }
}
