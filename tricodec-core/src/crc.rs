//! CRC-32 checksums recorded in sidecars.
//!
//! Reflected CRC-32 (polynomial `0xEDB88320`, init and final XOR
//! `0xFFFFFFFF`), the variant used by zip and gzip, computed a byte at a
//! time through one 256-entry table.

const POLYNOMIAL: u32 = 0xEDB8_8320;

const fn table_entry(index: u8) -> u32 {
    let mut value = index as u32;
    let mut bit = 0;
    while bit < 8 {
        let mask = (value & 1).wrapping_neg();
        value = (value >> 1) ^ (POLYNOMIAL & mask);
        bit += 1;
    }
    value
}

const TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut index = 0;
    while index < table.len() {
        table[index] = table_entry(index as u8);
        index += 1;
    }
    table
};

/// Streaming CRC-32.
///
/// ```
/// use tricodec_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, ");
/// crc.update(b"World!");
/// assert_eq!(crc.finalize(), Crc32::compute(b"Hello, World!"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Start a new checksum.
    pub fn new() -> Self {
        Self { state: !0 }
    }

    /// Feed more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state = data.iter().fold(self.state, |state, &byte| {
            TABLE[usize::from(state as u8 ^ byte)] ^ (state >> 8)
        });
    }

    /// The checksum of everything fed so far.
    pub fn finalize(self) -> u32 {
        !self.state
    }

    /// Checksum of a whole buffer.
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
