//! DNS response codes.
//!
//! The RCODE field is the low nibble of the header's meta word. Like
//! [`Opcode`](crate::opcode::Opcode), it is a lenient carrier: unassigned
//! values round-trip untouched. EDNS(0) extended RCODEs live in OPT RDATA,
//! which this crate treats as opaque; only the header nibble is modelled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS response code (header nibble only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rcode {
    /// No error - RFC 1035
    NoError,
    /// Format error - RFC 1035
    FormErr,
    /// Server failure - RFC 1035
    ServFail,
    /// Non-existent domain - RFC 1035
    NxDomain,
    /// Not implemented - RFC 1035
    NotImp,
    /// Query refused - RFC 1035
    Refused,
    /// Name exists when it should not - RFC 2136
    YxDomain,
    /// RRset exists when it should not - RFC 2136
    YxRrset,
    /// RRset that should exist does not - RFC 2136
    NxRrset,
    /// Server not authoritative - RFC 2136
    NotAuth,
    /// Name not contained in zone - RFC 2136
    NotZone,
    /// Any other four-bit value.
    Unassigned(u8),
}

impl Rcode {
    /// Creates a response code from the low four bits of `value`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NxDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            6 => Self::YxDomain,
            7 => Self::YxRrset,
            8 => Self::NxRrset,
            9 => Self::NotAuth,
            10 => Self::NotZone,
            other => Self::Unassigned(other),
        }
    }

    /// Returns the numeric value of the response code.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::FormErr => 1,
            Self::ServFail => 2,
            Self::NxDomain => 3,
            Self::NotImp => 4,
            Self::Refused => 5,
            Self::YxDomain => 6,
            Self::YxRrset => 7,
            Self::NxRrset => 8,
            Self::NotAuth => 9,
            Self::NotZone => 10,
            Self::Unassigned(v) => v,
        }
    }

    /// Returns true for NOERROR.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns true for NXDOMAIN.
    #[inline]
    pub const fn is_nxdomain(self) -> bool {
        matches!(self, Self::NxDomain)
    }
}

impl From<u8> for Rcode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl From<Rcode> for u8 {
    fn from(value: Rcode) -> Self {
        value.to_u8()
    }
}

impl Default for Rcode {
    fn default() -> Self {
        Self::NoError
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoError => write!(f, "NOERROR"),
            Self::FormErr => write!(f, "FORMERR"),
            Self::ServFail => write!(f, "SERVFAIL"),
            Self::NxDomain => write!(f, "NXDOMAIN"),
            Self::NotImp => write!(f, "NOTIMP"),
            Self::Refused => write!(f, "REFUSED"),
            Self::YxDomain => write!(f, "YXDOMAIN"),
            Self::YxRrset => write!(f, "YXRRSET"),
            Self::NxRrset => write!(f, "NXRRSET"),
            Self::NotAuth => write!(f, "NOTAUTH"),
            Self::NotZone => write!(f, "NOTZONE"),
            Self::Unassigned(v) => write!(f, "RCODE{}", v),
        }
    }
}
