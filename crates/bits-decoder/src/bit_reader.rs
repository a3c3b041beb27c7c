use crate::{bits, errors::ReadError};

/// Cursor over a fixed bit string. All bit consumption during parsing goes
/// through [BitReader::read_bits].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_len: usize,
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_bit_len(data, data.len() * 8)
    }

    /// Reader over the first `bit_len` bits of `data`.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            bit_pos: 0,
        }
    }

    /// Consumes the next `n` bits as a big-endian unsigned integer.
    /// On failure the position is left untouched.
    pub fn read_bits(&mut self, n: usize) -> Result<u64, ReadError> {
        let value = bits::read_bits_at(self.data, self.bit_len, self.bit_pos, n)?;
        self.bit_pos += n;

        Ok(value)
    }

    pub fn read_flag(&mut self) -> Result<bool, ReadError> {
        Ok(self.read_bits(1)? == 1)
    }

    pub fn position(&self) -> usize {
        self.bit_pos
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn remaining(&self) -> usize {
        self.bit_len - self.bit_pos
    }
}
