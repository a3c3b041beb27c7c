//! # bits-decoder
//!
//! Decoder and evaluator for BITS transmissions: hex strings that expand into
//! a bit stream of nested packets.
//!
//! A packet is either a literal number or an operator over sub-packets
//! (sum, product, minimum, maximum, greater-than, less-than, equal-to). The
//! decoded [Packet] tree offers two read-only traversals: the sum of every
//! packet's version field, and the value of the whole expression.
//!
//! ## Example
//!
//! ```
//! use bits_decoder::{decode_hex, evaluate_hex, packet::Packet};
//!
//! assert_eq!(decode_hex("D2FE28").unwrap(), Packet::literal(6, 2021));
//!
//! let summary = evaluate_hex("9C0141080250320F1802104A08").unwrap();
//! assert_eq!(summary.version_sum, 20);
//! assert_eq!(summary.value, 1);
//! ```

pub mod bit_reader;
pub mod bits;
pub mod decoder;
pub mod errors;
pub mod literal;
pub mod operator;
pub mod packet;

pub use bits::Transmission;
pub use decoder::{DEFAULT_MAX_DEPTH, DecodeConfig, Decoder};
pub use errors::{Error, EvalError, ParseError, ReadError, Result};
pub use operator::OperatorKind;
pub use packet::{Packet, Summary};

/// Decodes a hex transmission with the default [DecodeConfig].
pub fn decode_hex(hex: &str) -> Result<Packet, ParseError> {
    Decoder::default().decode_hex(hex)
}

/// Decodes and evaluates a hex transmission with the default [DecodeConfig].
pub fn evaluate_hex(hex: &str) -> Result<Summary> {
    Ok(decode_hex(hex)?.summary()?)
}
