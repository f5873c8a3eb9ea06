//! DNS message header.
//!
//! The header is a fixed 12-byte structure at the start of every message:
//! control bits and the counts of the four sections that follow.

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::rcode::Rcode;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

bitflags! {
    /// DNS header flag bits of the meta word.
    ///
    /// The opcode and rcode nibbles are carried separately; everything else
    /// in the meta word lives here. The reserved Z bit and the DNSSEC AD/CD
    /// bits are preserved so headers round-trip bit-for-bit, but the codec
    /// assigns them no meaning.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HeaderFlags: u16 {
        /// Query/Response flag: 0 = query, 1 = response
        const QR = 0x8000;

        /// Authoritative Answer
        const AA = 0x0400;

        /// Truncation: the message did not fit the size budget
        const TC = 0x0200;

        /// Recursion Desired
        const RD = 0x0100;

        /// Recursion Available
        const RA = 0x0080;

        /// Reserved (must be zero per RFC 1035; carried transparently)
        const Z = 0x0040;

        /// Authentic Data (DNSSEC; carried transparently)
        const AD = 0x0020;

        /// Checking Disabled (DNSSEC; carried transparently)
        const CD = 0x0010;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// DNS message header.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Message identifier for matching requests to responses.
    pub id: u16,

    /// Flag bits of the meta word.
    pub flags: HeaderFlags,

    /// Operation code.
    pub opcode: Opcode,

    /// Response code (header nibble).
    pub rcode: Rcode,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new header with the given message ID.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: Opcode::Query,
            rcode: Rcode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a query header with a random ID and recursion requested.
    pub fn query() -> Self {
        Self {
            id: rand::random(),
            flags: HeaderFlags::RD,
            opcode: Opcode::Query,
            rcode: Rcode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a response header matching a query header.
    pub fn response_from(query: &Header) -> Self {
        Self {
            id: query.id,
            flags: HeaderFlags::QR | (query.flags & HeaderFlags::RD),
            opcode: query.opcode,
            rcode: Rcode::NoError,
            qd_count: query.qd_count,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the server answered authoritatively.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(HeaderFlags::AA)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Returns true if recursion is available.
    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags.contains(HeaderFlags::RA)
    }

    /// Sets or clears the QR flag.
    #[inline]
    pub fn set_response(&mut self, response: bool) {
        self.flags.set(HeaderFlags::QR, response);
    }

    /// Sets or clears the AA flag.
    #[inline]
    pub fn set_authoritative(&mut self, aa: bool) {
        self.flags.set(HeaderFlags::AA, aa);
    }

    /// Sets or clears the TC flag.
    #[inline]
    pub fn set_truncated(&mut self, tc: bool) {
        self.flags.set(HeaderFlags::TC, tc);
    }

    /// Sets or clears the RD flag.
    #[inline]
    pub fn set_recursion_desired(&mut self, rd: bool) {
        self.flags.set(HeaderFlags::RD, rd);
    }

    /// Sets or clears the RA flag.
    #[inline]
    pub fn set_recursion_available(&mut self, ra: bool) {
        self.flags.set(HeaderFlags::RA, ra);
    }

    /// Parses a header from the first 12 bytes of wire data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::short_read(HEADER_SIZE));
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let meta = u16::from_be_bytes([data[2], data[3]]);

        // Opcode sits in bits 14..11, rcode in bits 3..0. Both nibbles are
        // lenient carriers; the remaining bits are flags.
        let opcode = Opcode::from_u8(((meta >> 11) & 0x0F) as u8);
        let rcode = Rcode::from_u8((meta & 0x0F) as u8);
        let flags = HeaderFlags::from_bits_truncate(meta);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qd_count: u16::from_be_bytes([data[4], data[5]]),
            an_count: u16::from_be_bytes([data[6], data[7]]),
            ns_count: u16::from_be_bytes([data[8], data[9]]),
            ar_count: u16::from_be_bytes([data[10], data[11]]),
        })
    }

    /// Serializes the header to wire format.
    pub fn to_wire(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        let meta = self.flags.bits()
            | (u16::from(self.opcode.to_u8()) << 11)
            | u16::from(self.rcode.to_u8());

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&meta.to_be_bytes());
        buf[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.ar_count.to_be_bytes());

        buf
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{:04X} {} {} {}",
            self.id,
            if self.is_response() { "QR" } else { "Q" },
            self.opcode,
            self.rcode
        )?;

        if self.is_authoritative() {
            write!(f, " AA")?;
        }
        if self.is_truncated() {
            write!(f, " TC")?;
        }
        if self.recursion_desired() {
            write!(f, " RD")?;
        }
        if self.recursion_available() {
            write!(f, " RA")?;
        }

        write!(
            f,
            " QD:{} AN:{} NS:{} AR:{}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let mut header = Header::new(0x1234);
        header.set_recursion_desired(true);
        header.qd_count = 1;

        let wire = header.to_wire();
        assert_eq!(wire, [0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Header::parse(&wire).unwrap(), header);
    }

    #[test]
    fn test_bit_perfect_roundtrip_over_meta_domain() {
        // Every meta word must survive parse/serialize untouched, including
        // reserved bits and unassigned opcode/rcode values.
        for meta in [0x0000u16, 0xFFFF, 0x8170, 0x7E8F, 0x0040, 0x0030] {
            let mut wire = [0u8; HEADER_SIZE];
            wire[2..4].copy_from_slice(&meta.to_be_bytes());
            let header = Header::parse(&wire).unwrap();
            assert_eq!(header.to_wire(), wire, "meta word {:#06x}", meta);
        }
    }

    #[test]
    fn test_flag_accessors() {
        let mut header = Header::new(0);

        header.set_response(true);
        assert!(header.is_response());

        header.set_authoritative(true);
        assert!(header.is_authoritative());

        header.set_truncated(true);
        assert!(header.is_truncated());

        header.set_recursion_available(true);
        assert!(header.recursion_available());
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Header::parse(&[0; 11]),
            Err(Error::ShortRead { .. })
        ));
    }

    #[test]
    fn test_response_from_query() {
        let mut query = Header::query();
        query.qd_count = 1;
        let response = Header::response_from(&query);

        assert_eq!(response.id, query.id);
        assert!(response.is_response());
        assert_eq!(response.recursion_desired(), query.recursion_desired());
        assert_eq!(response.qd_count, 1);
    }
}
