//! Primitive DNS field values.
//!
//! Every resource-record field holds one of a small set of validated value
//! kinds. [`Value`] is the closed sum over those kinds; [`ValueKind`] is the
//! field-less tag used by field definitions. Because the sum is closed and
//! codec dispatch matches exhaustively, there is no "unknown kind" failure
//! mode at the value level.

use crate::error::{Error, Result};
use crate::name::Name;
use bytes::Bytes;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum byte length of a DNS character string.
pub const MAX_CHARACTER_STRING_LENGTH: usize = 255;

/// The kind tag of a primitive value, as used in field definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Opaque byte string (RDATA passthrough).
    Anything,
    /// Opaque byte string interpreted as a bit array.
    BitMap,
    /// Unsigned 8-bit integer.
    Char,
    /// Length-prefixed byte string, at most 255 bytes.
    CharacterString,
    /// Unsigned 32-bit integer.
    Long,
    /// Unsigned 16-bit integer.
    Short,
    /// Four octets.
    Ipv4,
    /// Eight 16-bit groups.
    Ipv6,
    /// Domain name.
    Name,
}

impl ValueKind {
    /// Returns the declaration name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Anything => "anything",
            Self::BitMap => "bitmap",
            Self::Char => "char",
            Self::CharacterString => "character-string",
            Self::Long => "long",
            Self::Short => "short",
            Self::Ipv4 => "ipv4-address",
            Self::Ipv6 => "ipv6-address",
            Self::Name => "domain-name",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A DNS character string: at most 255 bytes, length-prefixed on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterString {
    bytes: Bytes,
}

impl CharacterString {
    /// Creates a character string, rejecting inputs over 255 bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() > MAX_CHARACTER_STRING_LENGTH {
            return Err(Error::CharacterStringTooLong { length: bytes.len() });
        }
        Ok(Self { bytes })
    }

    /// Returns the raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the byte length.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl FromStr for CharacterString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl fmt::Display for CharacterString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for &byte in self.bytes.iter() {
            if byte == b'"' || byte == b'\\' {
                write!(f, "\\{}", byte as char)?;
            } else if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\{:03}", byte)?;
            }
        }
        write!(f, "\"")
    }
}

/// A primitive DNS field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Opaque byte string (RDATA passthrough).
    Anything(Bytes),
    /// Opaque byte string interpreted as a bit array.
    BitMap(Bytes),
    /// Unsigned 8-bit integer.
    Char(u8),
    /// Byte string of at most 255 bytes.
    CharacterString(CharacterString),
    /// Unsigned 32-bit integer.
    Long(u32),
    /// Unsigned 16-bit integer.
    Short(u16),
    /// IPv4 address.
    Ipv4(Ipv4Addr),
    /// IPv6 address.
    Ipv6(Ipv6Addr),
    /// Domain name.
    Name(Name),
}

impl Value {
    /// Creates an opaque value.
    #[inline]
    pub fn anything(bytes: impl Into<Bytes>) -> Self {
        Self::Anything(bytes.into())
    }

    /// Creates a bit-map value.
    #[inline]
    pub fn bitmap(bytes: impl Into<Bytes>) -> Self {
        Self::BitMap(bytes.into())
    }

    /// Creates a character-string value, rejecting inputs over 255 bytes.
    #[inline]
    pub fn character_string(bytes: impl Into<Bytes>) -> Result<Self> {
        CharacterString::new(bytes).map(Self::CharacterString)
    }

    /// Creates an IPv4 value from anything addressable as four octets
    /// (`Ipv4Addr`, `[u8; 4]`, or a packed `u32`).
    #[inline]
    pub fn ipv4(addr: impl Into<Ipv4Addr>) -> Self {
        Self::Ipv4(addr.into())
    }

    /// Creates an IPv6 value from anything addressable as eight groups
    /// (`Ipv6Addr`, `[u16; 8]`, or a packed `u128`).
    #[inline]
    pub fn ipv6(addr: impl Into<Ipv6Addr>) -> Self {
        Self::Ipv6(addr.into())
    }

    /// Parses a dotted-quad IPv4 textual form.
    pub fn parse_ipv4(s: &str) -> Result<Self> {
        s.parse::<Ipv4Addr>()
            .map(Self::Ipv4)
            .map_err(|_| Error::InvalidAddress { input: s.into() })
    }

    /// Parses an RFC 4291 IPv6 textual form (including `::` compression).
    pub fn parse_ipv6(s: &str) -> Result<Self> {
        s.parse::<Ipv6Addr>()
            .map(Self::Ipv6)
            .map_err(|_| Error::InvalidAddress { input: s.into() })
    }

    /// Returns the kind tag of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Anything(_) => ValueKind::Anything,
            Self::BitMap(_) => ValueKind::BitMap,
            Self::Char(_) => ValueKind::Char,
            Self::CharacterString(_) => ValueKind::CharacterString,
            Self::Long(_) => ValueKind::Long,
            Self::Short(_) => ValueKind::Short,
            Self::Ipv4(_) => ValueKind::Ipv4,
            Self::Ipv6(_) => ValueKind::Ipv6,
            Self::Name(_) => ValueKind::Name,
        }
    }

    /// Returns the encoded wire length of this value.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Anything(b) | Self::BitMap(b) => b.len(),
            Self::Char(_) => 1,
            Self::CharacterString(s) => 1 + s.len(),
            Self::Long(_) => 4,
            Self::Short(_) => 2,
            Self::Ipv4(_) => 4,
            Self::Ipv6(_) => 16,
            // Uncompressed form; the encoder may emit less.
            Self::Name(n) => n.wire_len(),
        }
    }

    /// Returns the byte payload for opaque kinds.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Anything(b) | Self::BitMap(b) => Some(b),
            Self::CharacterString(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Returns the value as a u8 if it is a `Char`.
    #[inline]
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a u16 if it is a `Short`.
    #[inline]
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a u32 if it is a `Long`.
    #[inline]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the IPv4 address if this is an `Ipv4` value.
    #[inline]
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Ipv4(a) => Some(*a),
            _ => None,
        }
    }

    /// Returns the IPv6 address if this is an `Ipv6` value.
    #[inline]
    pub fn as_ipv6(&self) -> Option<Ipv6Addr> {
        match self {
            Self::Ipv6(a) => Some(*a),
            _ => None,
        }
    }

    /// Returns the domain name if this is a `Name` value.
    #[inline]
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Ipv4Addr> for Value {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Ipv4(addr)
    }
}

impl From<Ipv6Addr> for Value {
    fn from(addr: Ipv6Addr) -> Self {
        Self::Ipv6(addr)
    }
}

impl From<Name> for Value {
    fn from(name: Name) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // RFC 3597 opaque form: \# <length> <hex>
            Self::Anything(b) | Self::BitMap(b) => {
                write!(f, "\\# {} {}", b.len(), HEXLOWER.encode(b))
            }
            Self::Char(v) => write!(f, "{}", v),
            Self::CharacterString(s) => write!(f, "{}", s),
            Self::Long(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::Ipv4(a) => write!(f, "{}", a),
            Self::Ipv6(a) => write!(f, "{}", a),
            Self::Name(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_string_limit() {
        assert!(CharacterString::new(Bytes::from(vec![b'x'; 255])).is_ok());
        assert!(matches!(
            CharacterString::new(Bytes::from(vec![b'x'; 256])),
            Err(Error::CharacterStringTooLong { length: 256 })
        ));
    }

    #[test]
    fn test_ipv4_forms() {
        let from_octets = Value::ipv4([192, 0, 2, 1]);
        let from_packed = Value::ipv4(0xC000_0201u32);
        let from_text = Value::parse_ipv4("192.0.2.1").unwrap();
        assert_eq!(from_octets, from_packed);
        assert_eq!(from_octets, from_text);

        assert!(matches!(
            Value::parse_ipv4("192.0.2"),
            Err(Error::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_ipv6_forms() {
        let from_groups = Value::ipv6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
        let from_text = Value::parse_ipv6("2001:db8::1").unwrap();
        assert_eq!(from_groups, from_text);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Char(7).kind(), ValueKind::Char);
        assert_eq!(Value::anything(vec![1u8, 2]).kind(), ValueKind::Anything);
        assert_eq!(
            Value::Name(Name::root()).kind(),
            ValueKind::Name
        );
    }

    #[test]
    fn test_wire_len() {
        assert_eq!(Value::Short(1).wire_len(), 2);
        assert_eq!(Value::Long(1).wire_len(), 4);
        assert_eq!(Value::character_string("abc").unwrap().wire_len(), 4);
        assert_eq!(Value::ipv6([0u16; 8]).wire_len(), 16);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::parse_ipv4("10.0.0.1").unwrap().to_string(), "10.0.0.1");
        assert_eq!(
            Value::character_string("he said \"hi\"").unwrap().to_string(),
            "\"he said \\\"hi\\\"\""
        );
        assert_eq!(
            Value::anything(vec![0xde, 0xad]).to_string(),
            "\\# 2 dead"
        );
    }
}
