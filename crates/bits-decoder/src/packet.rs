//! The decoded packet tree and its two read-only traversals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{errors::EvalError, operator::OperatorKind};

/// One node of a decoded transmission. Operators own their sub-packets in
/// the order they appeared in the bit stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Packet {
    Literal {
        version: u8,
        value: u64,
    },
    Operator {
        version: u8,
        kind: OperatorKind,
        children: Vec<Packet>,
    },
}

/// The two numbers reported for a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    pub version_sum: u64,
    pub value: u64,
}

impl Packet {
    pub fn literal(version: u8, value: u64) -> Self {
        Packet::Literal { version, value }
    }

    pub fn operator(version: u8, kind: OperatorKind, children: Vec<Packet>) -> Self {
        Packet::Operator {
            version,
            kind,
            children,
        }
    }

    pub fn version(&self) -> u8 {
        match self {
            Packet::Literal { version, .. } | Packet::Operator { version, .. } => *version,
        }
    }

    /// Operator kind, or `None` for literals.
    pub fn kind(&self) -> Option<OperatorKind> {
        match self {
            Packet::Literal { .. } => None,
            Packet::Operator { kind, .. } => Some(*kind),
        }
    }

    /// Sub-packets in stream order; empty for literals.
    pub fn children(&self) -> &[Packet] {
        match self {
            Packet::Literal { .. } => &[],
            Packet::Operator { children, .. } => children,
        }
    }

    /// Sum of the version field over this packet and all of its descendants.
    pub fn version_sum(&self) -> u64 {
        u64::from(self.version())
            + self
                .children()
                .iter()
                .map(Packet::version_sum)
                .sum::<u64>()
    }

    /// Evaluates the tree rooted at this packet.
    pub fn value(&self) -> Result<u64, EvalError> {
        match self {
            Packet::Literal { value, .. } => Ok(*value),
            Packet::Operator { kind, children, .. } => kind.evaluate(children),
        }
    }

    pub fn summary(&self) -> Result<Summary, EvalError> {
        Ok(Summary {
            version_sum: self.version_sum(),
            value: self.value()?,
        })
    }

    /// Number of packets in the tree, this one included.
    pub fn packet_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Packet::packet_count)
            .sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counted in packets.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Packet::depth)
            .max()
            .unwrap_or(0)
    }
}
