//! Literal packet bodies: a run of 5-bit groups, each a continuation flag
//! followed by four value bits, most significant group first.

use crate::{bit_reader::BitReader, errors::ParseError};

const GROUP_BITS: usize = 5;
const CONTINUE_FLAG: u64 = 0b1_0000;
const NIBBLE_MASK: u64 = 0b0_1111;

/// Decodes a literal body, stopping after the first group whose flag is clear.
///
/// `max_bits` (1..=64) bounds the significant width of the value. Leading
/// zero groups never count against it.
pub fn decode_literal(reader: &mut BitReader<'_>, max_bits: u32) -> Result<u64, ParseError> {
    let max_bits = max_bits.clamp(1, 64);
    let limit = u64::MAX >> (64 - max_bits);

    let mut value = 0u64;
    loop {
        let group = reader.read_bits(GROUP_BITS)?;

        if value > limit >> 4 {
            return Err(ParseError::LiteralOverflow { max_bits });
        }
        value = (value << 4) | (group & NIBBLE_MASK);
        if value > limit {
            return Err(ParseError::LiteralOverflow { max_bits });
        }

        if group & CONTINUE_FLAG == 0 {
            return Ok(value);
        }
    }
}
