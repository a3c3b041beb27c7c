//! Error types for bit reading, packet parsing and evaluation.

use thiserror::Error;

use crate::operator::OperatorKind;

/// Errors produced by [crate::bit_reader::BitReader] when a read cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Requested bit range is beyond the end of the transmission.
    #[error("read of {width} bits at position {position} exceeds the {len} available bits")]
    OutOfBounds {
        position: usize,
        width: usize,
        len: usize,
    },
    /// More than 64 bits were requested in a single read.
    #[error("cannot read {0} bits into a 64-bit integer")]
    TooManyBitsRead(usize),
}

/// Errors produced while turning a transmission into a [crate::packet::Packet] tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The bit stream ended early or a field could not be read.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] ReadError),
    /// The input line is not a hexadecimal string.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    /// Children of a length-type-0 operator ran past the declared boundary.
    #[error("sub-packets overran their declared length: position {position} > target {target}")]
    LengthOverflow { position: usize, target: usize },
    /// Type-id with no operator meaning.
    #[error("unknown operator type-id {0}")]
    UnknownOperator(u8),
    /// A literal needs more significant bits than the decoder allows.
    #[error("literal value exceeds {max_bits} bits")]
    LiteralOverflow { max_bits: u32 },
    /// Operators are nested deeper than the decoder allows.
    #[error("packets nested deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

/// Errors produced when evaluating a decoded tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Sum, product, minimum or maximum over zero sub-packets.
    #[error("{0} operator has no sub-packets")]
    EmptyOperator(OperatorKind),
    /// Comparison with a sub-packet count other than two.
    #[error("{kind} operator expects {expected} sub-packets, found {found}")]
    WrongArity {
        kind: OperatorKind,
        expected: usize,
        found: usize,
    },
    /// Result does not fit in a `u64`.
    #[error("{0} operator overflowed a 64-bit value")]
    ArithmeticOverflow(OperatorKind),
}

/// Any failure of a full decode-and-evaluate pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
