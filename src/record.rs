//! DNS resource records.
//!
//! A resource record binds an owner name, type, class, and TTL to typed
//! RDATA. The RDATA layout comes from the record's type definition.

use crate::class::{format_class_code, RecordClass};
use crate::name::Name;
use crate::rdata::RecordData;
use crate::registry::standard_def;
use crate::rtype::{format_type_code, RecordType};
use crate::value::Value;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A DNS resource record.
///
/// # Wire Format
///
/// ```text
/// NAME (labels) | TYPE (2) | CLASS (2) | TTL (4) | RDLENGTH (2) | RDATA
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The owner name this record is for.
    name: Name,
    /// The record type code.
    rtype: u16,
    /// The record class code.
    class: u16,
    /// Time to live in seconds.
    ttl: u32,
    /// The typed record data.
    data: RecordData,
}

impl Record {
    /// Creates a new resource record from raw codes and typed data.
    pub fn new(name: Name, rtype: u16, class: u16, ttl: u32, data: RecordData) -> Self {
        Self {
            name,
            rtype,
            class,
            ttl,
            data,
        }
    }

    /// Creates an A record.
    pub fn a(name: Name, ttl: u32, addr: Ipv4Addr) -> Self {
        let def = standard_def(RecordType::A).expect("standard A definition");
        let data = RecordData::from_values(def, vec![vec![Value::Ipv4(addr)]])
            .expect("A data matches its definition");
        Self::new(name, RecordType::A.code(), RecordClass::IN.code(), ttl, data)
    }

    /// Creates an AAAA record.
    pub fn aaaa(name: Name, ttl: u32, addr: Ipv6Addr) -> Self {
        let def = standard_def(RecordType::AAAA).expect("standard AAAA definition");
        let data = RecordData::from_values(def, vec![vec![Value::Ipv6(addr)]])
            .expect("AAAA data matches its definition");
        Self::new(
            name,
            RecordType::AAAA.code(),
            RecordClass::IN.code(),
            ttl,
            data,
        )
    }

    /// Creates a CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        let def = standard_def(RecordType::CNAME).expect("standard CNAME definition");
        let data = RecordData::from_values(def, vec![vec![Value::Name(target)]])
            .expect("CNAME data matches its definition");
        Self::new(
            name,
            RecordType::CNAME.code(),
            RecordClass::IN.code(),
            ttl,
            data,
        )
    }

    /// Creates an MX record.
    pub fn mx(name: Name, ttl: u32, preference: u16, exchange: Name) -> Self {
        let def = standard_def(RecordType::MX).expect("standard MX definition");
        let data = RecordData::from_values(
            def,
            vec![vec![Value::Short(preference)], vec![Value::Name(exchange)]],
        )
        .expect("MX data matches its definition");
        Self::new(name, RecordType::MX.code(), RecordClass::IN.code(), ttl, data)
    }

    /// Creates a TXT record from one or more character strings.
    ///
    /// Fails if any string exceeds 255 bytes.
    pub fn txt<I, S>(name: Name, ttl: u32, strings: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<bytes::Bytes>,
    {
        let def = standard_def(RecordType::TXT).expect("standard TXT definition");
        let values = strings
            .into_iter()
            .map(Value::character_string)
            .collect::<crate::Result<Vec<_>>>()?;
        let data = RecordData::from_values(def, vec![values])?;
        Ok(Self::new(
            name,
            RecordType::TXT.code(),
            RecordClass::IN.code(),
            ttl,
            data,
        ))
    }

    /// Returns the owner name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type code.
    #[inline]
    pub fn rtype(&self) -> u16 {
        self.rtype
    }

    /// Returns the record type if it is in the named set.
    #[inline]
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_code(self.rtype)
    }

    /// Returns the class code.
    #[inline]
    pub fn class(&self) -> u16 {
        self.class
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the typed record data.
    #[inline]
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut RecordData {
        &mut self.data
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name,
            self.ttl,
            format_class_code(self.class),
            format_type_code(self.rtype),
            self.data
        )
    }
}
