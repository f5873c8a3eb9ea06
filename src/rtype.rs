//! DNS record type codes.
//!
//! Well-known RR type codes from RFC 1035 and the extensions this crate's
//! standard registry covers. Records and questions carry raw `u16` codes on
//! the wire and in the model; this enum names the codes the standard type
//! registry defines, plus the query-only codes needed by tooling.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordType {
    /// IPv4 address - RFC 1035
    A = 1,

    /// Authoritative name server - RFC 1035
    NS = 2,

    /// Canonical name (alias) - RFC 1035
    CNAME = 5,

    /// Start of authority - RFC 1035
    SOA = 6,

    /// Null record - RFC 1035
    NULL = 10,

    /// Well-known services - RFC 1035
    WKS = 11,

    /// Domain name pointer - RFC 1035
    PTR = 12,

    /// Host information - RFC 1035
    HINFO = 13,

    /// Mail exchange - RFC 1035
    MX = 15,

    /// Text strings - RFC 1035
    TXT = 16,

    /// IPv6 address - RFC 3596
    AAAA = 28,

    /// Service location - RFC 2782
    SRV = 33,

    /// EDNS(0) OPT pseudo-RR - RFC 6891
    OPT = 41,

    /// Incremental zone transfer - RFC 1995 (query-only)
    IXFR = 251,

    /// Full zone transfer - RFC 1035 (query-only)
    AXFR = 252,

    /// Any record type - RFC 1035 (query-only)
    ANY = 255,
}

impl RecordType {
    /// Returns the numeric type code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Creates a record type from its numeric code.
    ///
    /// Returns `None` for codes outside this crate's named set; such codes
    /// still flow through the codec as raw `u16`s.
    #[inline]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Returns true for query-only pseudo-types that never appear in RDATA.
    #[inline]
    pub const fn is_query_only(self) -> bool {
        matches!(self, Self::IXFR | Self::AXFR | Self::ANY)
    }

    /// Returns the presentation name of the type.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::NULL => "NULL",
            Self::WKS => "WKS",
            Self::PTR => "PTR",
            Self::HINFO => "HINFO",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::AAAA => "AAAA",
            Self::SRV => "SRV",
            Self::OPT => "OPT",
            Self::IXFR => "IXFR",
            Self::AXFR => "AXFR",
            Self::ANY => "ANY",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Formats a raw type code: the presentation name when known, RFC 3597
/// `TYPEnnn` otherwise.
pub fn format_type_code(code: u16) -> String {
    match RecordType::from_code(code) {
        Some(rtype) => rtype.name().to_string(),
        None => format!("TYPE{}", code),
    }
}
