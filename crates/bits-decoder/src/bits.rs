//! Owned bit storage for a transmission and the low-level read helpers behind it.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.
//! A hex digit always contributes exactly four bits, so a transmission of `n`
//! digits holds `4 * n` readable bits even when `n` is odd.

use std::str::FromStr;

use crate::{bit_reader::BitReader, errors::ParseError, errors::ReadError};

/// The expanded bits of one hex-encoded transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Transmission {
    /// Expands a line of hex digits. Surrounding whitespace is ignored and
    /// both letter cases are accepted.
    pub fn from_hex(input: &str) -> Result<Self, ParseError> {
        let digits = input.trim();

        let decoded = if digits.len() % 2 == 0 {
            hex::decode(digits)
        } else {
            // pad to a whole byte; the extra nibble lies past `bit_len`
            hex::decode(format!("{digits}0"))
        };
        let bytes = decoded.map_err(|err| ParseError::InvalidHex(err.to_string()))?;

        Ok(Self {
            bytes,
            bit_len: digits.len() * 4,
        })
    }

    /// Wraps raw bytes; every bit of `bytes` is readable.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bit_len = bytes.len() * 8;
        Self { bytes, bit_len }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of readable bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// A fresh cursor positioned at the first bit.
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::with_bit_len(&self.bytes, self.bit_len)
    }
}

impl FromStr for Transmission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Reads a single bit at `bit_pos` (0 = MSB of first byte). Returns 0 or 1.
pub fn read_bit_at(data: &[u8], bit_pos: usize) -> Result<u8, ReadError> {
    let byte = *data.get(bit_pos / 8).ok_or(ReadError::OutOfBounds {
        position: bit_pos,
        width: 1,
        len: data.len() * 8,
    })?;

    Ok((byte >> (7 - bit_pos % 8)) & 1)
}

/// Reads `n` bits starting at `bit_pos` as an unsigned value (max 64 bits),
/// refusing to touch anything at or beyond `bit_len`. MSB-first.
pub fn read_bits_at(data: &[u8], bit_len: usize, bit_pos: usize, n: usize) -> Result<u64, ReadError> {
    if n > 64 {
        return Err(ReadError::TooManyBitsRead(n));
    }

    let limit = bit_len.min(data.len() * 8);
    if bit_pos.checked_add(n).is_none_or(|end| end > limit) {
        return Err(ReadError::OutOfBounds {
            position: bit_pos,
            width: n,
            len: limit,
        });
    }

    let mut value = 0u64;
    for pos in bit_pos..bit_pos + n {
        value = (value << 1) | read_bit_at(data, pos)? as u64;
    }

    Ok(value)
}
