//! Recursive-descent parser turning a bit stream into a [Packet] tree.
//!
//! Every packet starts with a 3-bit version and a 3-bit type-id. Type-id 4
//! marks a literal; any other id is an operator whose sub-packets are bounded
//! either by a total bit length or by an explicit count (see [Length]).
//! Each recursive parse call consumes exactly the bits of one
//! packet, which is what makes the total-length boundary check meaningful.

use crate::{
    bit_reader::BitReader,
    bits::Transmission,
    errors::ParseError,
    literal::decode_literal,
    operator::{LITERAL_TYPE_ID, Length, OperatorKind},
    packet::Packet,
};

const VERSION_BITS: usize = 3;
const TYPE_ID_BITS: usize = 3;

/// Deep enough for any real transmission, shallow enough that parsing,
/// evaluating and dropping the tree fit in a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum significant width of a literal value, 1..=64.
    pub max_literal_bits: u32,
    /// Maximum number of nested packets, the root included.
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            max_literal_bits: 64,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values outside 1..=64 are clamped.
    pub fn set_max_literal_bits(&mut self, max_literal_bits: u32) -> &mut Self {
        self.max_literal_bits = max_literal_bits.clamp(1, 64);
        self
    }

    pub fn set_max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes transmissions under a fixed [DecodeConfig].
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Parses the outermost packet. Bits left after it are not consumed.
    pub fn decode(&self, reader: &mut BitReader<'_>) -> Result<Packet, ParseError> {
        self.parse_packet(reader, 1)
    }

    pub fn decode_transmission(&self, transmission: &Transmission) -> Result<Packet, ParseError> {
        self.decode(&mut transmission.reader())
    }

    pub fn decode_hex(&self, hex: &str) -> Result<Packet, ParseError> {
        self.decode_transmission(&Transmission::from_hex(hex)?)
    }

    fn parse_packet(&self, reader: &mut BitReader<'_>, depth: usize) -> Result<Packet, ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.config.max_depth,
            });
        }

        let version = reader.read_bits(VERSION_BITS)? as u8;
        let type_id = reader.read_bits(TYPE_ID_BITS)? as u8;

        if type_id == LITERAL_TYPE_ID {
            let value = decode_literal(reader, self.config.max_literal_bits)?;
            return Ok(Packet::literal(version, value));
        }

        let children = self.parse_children(reader, depth)?;
        let kind = OperatorKind::try_from(type_id)?;

        Ok(Packet::operator(version, kind, children))
    }

    fn parse_children(
        &self,
        reader: &mut BitReader<'_>,
        depth: usize,
    ) -> Result<Vec<Packet>, ParseError> {
        let mut children = Vec::new();

        match Length::read(reader)? {
            Length::TotalBits(total) => {
                let target = reader.position() + total;
                while reader.position() < target {
                    children.push(self.parse_packet(reader, depth + 1)?);
                }

                if reader.position() > target {
                    return Err(ParseError::LengthOverflow {
                        position: reader.position(),
                        target,
                    });
                }
            }
            Length::SubPackets(count) => {
                children.reserve(count);
                for _ in 0..count {
                    children.push(self.parse_packet(reader, depth + 1)?);
                }
            }
        }

        Ok(children)
    }
}
