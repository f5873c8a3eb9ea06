//! DNS record classes.
//!
//! Questions and records carry raw `u16` class codes; this enum names the
//! registered values for construction and display.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record class.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordClass {
    /// Internet - RFC 1035
    IN = 1,

    /// CHAOS - RFC 1035
    CH = 3,

    /// Hesiod - RFC 1035
    HS = 4,

    /// Query class: NONE - RFC 2136
    NONE = 254,

    /// Query class: ANY - RFC 1035
    ANY = 255,
}

impl RecordClass {
    /// Returns the numeric class code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Creates a class from its numeric code.
    #[inline]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Returns the presentation name of the class.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IN => "IN",
            Self::CH => "CH",
            Self::HS => "HS",
            Self::NONE => "NONE",
            Self::ANY => "ANY",
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for RecordClass {
    fn default() -> Self {
        Self::IN
    }
}

/// Formats a raw class code: the presentation name when known, RFC 3597
/// `CLASSnnn` otherwise.
pub fn format_class_code(code: u16) -> String {
    match RecordClass::from_code(code) {
        Some(class) => class.name().to_string(),
        None => format!("CLASS{}", code),
    }
}
