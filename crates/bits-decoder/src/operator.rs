//! Operator packets: the closed set of operator kinds, their arity rules and
//! evaluation, and the length header that bounds their sub-packets.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    bit_reader::BitReader,
    errors::{EvalError, ParseError},
    packet::Packet,
};

/// Type-id reserved for literal packets.
pub const LITERAL_TYPE_ID: u8 = 4;

const TOTAL_LENGTH_BITS: usize = 15;
const SUB_PACKET_COUNT_BITS: usize = 11;

/// What an operator packet computes from its sub-packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperatorKind {
    Sum,
    Product,
    Minimum,
    Maximum,
    GreaterThan,
    LessThan,
    EqualTo,
}

/// How many sub-packets an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::AtLeast(min) => count >= min,
            Arity::Exactly(n) => count == n,
        }
    }
}

impl TryFrom<u8> for OperatorKind {
    type Error = ParseError;

    fn try_from(type_id: u8) -> Result<Self, Self::Error> {
        match type_id {
            0 => Ok(OperatorKind::Sum),
            1 => Ok(OperatorKind::Product),
            2 => Ok(OperatorKind::Minimum),
            3 => Ok(OperatorKind::Maximum),
            5 => Ok(OperatorKind::GreaterThan),
            6 => Ok(OperatorKind::LessThan),
            7 => Ok(OperatorKind::EqualTo),
            other => Err(ParseError::UnknownOperator(other)),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::Sum => "sum",
            OperatorKind::Product => "product",
            OperatorKind::Minimum => "minimum",
            OperatorKind::Maximum => "maximum",
            OperatorKind::GreaterThan => "greater-than",
            OperatorKind::LessThan => "less-than",
            OperatorKind::EqualTo => "equal-to",
        };
        f.write_str(name)
    }
}

impl OperatorKind {
    /// The type-id this kind is encoded with.
    pub fn type_id(self) -> u8 {
        match self {
            OperatorKind::Sum => 0,
            OperatorKind::Product => 1,
            OperatorKind::Minimum => 2,
            OperatorKind::Maximum => 3,
            OperatorKind::GreaterThan => 5,
            OperatorKind::LessThan => 6,
            OperatorKind::EqualTo => 7,
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            OperatorKind::Sum
            | OperatorKind::Product
            | OperatorKind::Minimum
            | OperatorKind::Maximum => Arity::AtLeast(1),
            OperatorKind::GreaterThan | OperatorKind::LessThan | OperatorKind::EqualTo => {
                Arity::Exactly(2)
            }
        }
    }

    /// Applies this operator to `children`. The arity rule is checked before
    /// any child is evaluated; comparisons treat the first child as the left
    /// operand.
    pub fn evaluate(self, children: &[Packet]) -> Result<u64, EvalError> {
        let arity = self.arity();
        if !arity.accepts(children.len()) {
            return Err(match arity {
                Arity::AtLeast(_) => EvalError::EmptyOperator(self),
                Arity::Exactly(expected) => EvalError::WrongArity {
                    kind: self,
                    expected,
                    found: children.len(),
                },
            });
        }

        // children are evaluated one at a time so each nesting level costs
        // only this frame and the child's `Packet::value` frame
        let first = children[0].value()?;
        let rest = &children[1..];

        match self {
            OperatorKind::Sum => {
                let mut acc = first;
                for child in rest {
                    acc = acc
                        .checked_add(child.value()?)
                        .ok_or(EvalError::ArithmeticOverflow(self))?;
                }
                Ok(acc)
            }
            OperatorKind::Product => {
                let mut acc = first;
                for child in rest {
                    acc = acc
                        .checked_mul(child.value()?)
                        .ok_or(EvalError::ArithmeticOverflow(self))?;
                }
                Ok(acc)
            }
            OperatorKind::Minimum => {
                let mut acc = first;
                for child in rest {
                    acc = acc.min(child.value()?);
                }
                Ok(acc)
            }
            OperatorKind::Maximum => {
                let mut acc = first;
                for child in rest {
                    acc = acc.max(child.value()?);
                }
                Ok(acc)
            }
            OperatorKind::GreaterThan => Ok(u64::from(first > rest[0].value()?)),
            OperatorKind::LessThan => Ok(u64::from(first < rest[0].value()?)),
            OperatorKind::EqualTo => Ok(u64::from(first == rest[0].value()?)),
        }
    }
}

/// The length header following an operator's type-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Length-type-id 0: sub-packets occupy exactly this many bits.
    TotalBits(usize),
    /// Length-type-id 1: exactly this many sub-packets follow.
    SubPackets(usize),
}

impl Length {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self, ParseError> {
        let length = if reader.read_flag()? {
            Length::SubPackets(reader.read_bits(SUB_PACKET_COUNT_BITS)? as usize)
        } else {
            Length::TotalBits(reader.read_bits(TOTAL_LENGTH_BITS)? as usize)
        };

        Ok(length)
    }
}
