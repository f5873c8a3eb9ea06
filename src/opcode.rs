//! DNS operation codes.
//!
//! The OPCODE field is a four-bit slot in the header's meta word. The codec
//! is lenient: unassigned values are carried through untouched so that any
//! header round-trips bit-for-bit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS operation code.
///
/// Named variants cover the IANA-assigned values; everything else in the
/// four-bit domain is preserved as `Unassigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// Standard query (QUERY) - RFC 1035
    Query,
    /// Inverse query (IQUERY) - RFC 1035, obsoleted by RFC 3425
    IQuery,
    /// Server status request (STATUS) - RFC 1035
    Status,
    /// Zone change notification (NOTIFY) - RFC 1996
    Notify,
    /// Dynamic update (UPDATE) - RFC 2136
    Update,
    /// Any other four-bit value.
    Unassigned(u8),
}

impl Opcode {
    /// Creates an opcode from the low four bits of `value`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::Query,
            1 => Self::IQuery,
            2 => Self::Status,
            4 => Self::Notify,
            5 => Self::Update,
            other => Self::Unassigned(other),
        }
    }

    /// Returns the numeric value of the opcode.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Query => 0,
            Self::IQuery => 1,
            Self::Status => 2,
            Self::Notify => 4,
            Self::Update => 5,
            Self::Unassigned(v) => v,
        }
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self {
        value.to_u8()
    }
}

impl Default for Opcode {
    fn default() -> Self {
        Self::Query
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "QUERY"),
            Self::IQuery => write!(f, "IQUERY"),
            Self::Status => write!(f, "STATUS"),
            Self::Notify => write!(f, "NOTIFY"),
            Self::Update => write!(f, "UPDATE"),
            Self::Unassigned(v) => write!(f, "OPCODE{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_nibble_roundtrip() {
        for value in 0u8..16 {
            assert_eq!(Opcode::from_u8(value).to_u8(), value);
        }
    }

    #[test]
    fn test_masking() {
        assert_eq!(Opcode::from_u8(0xF0), Opcode::Query);
        assert_eq!(Opcode::from_u8(0x15), Opcode::Update);
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::Query.to_string(), "QUERY");
        assert_eq!(Opcode::Unassigned(9).to_string(), "OPCODE9");
    }
}
