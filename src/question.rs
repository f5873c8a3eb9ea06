//! DNS question section entries.
//!
//! A question names what is being asked for: a domain name, a query type,
//! and a query class. Type and class are raw `u16` codes so that values
//! outside the named sets flow through the codec untouched.

use crate::class::{format_class_code, RecordClass};
use crate::name::Name;
use crate::rtype::{format_type_code, RecordType};
use std::fmt;

/// A DNS question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    /// The domain name being queried.
    pub qname: Name,

    /// The type of record being requested.
    pub qtype: u16,

    /// The class of the query (usually IN).
    pub qclass: u16,
}

impl Question {
    /// Creates a new question from raw codes.
    #[inline]
    pub fn new(qname: Name, qtype: u16, qclass: u16) -> Self {
        Self { qname, qtype, qclass }
    }

    /// Creates a question for a named type in the Internet class.
    #[inline]
    pub fn internet(qname: Name, qtype: RecordType) -> Self {
        Self::new(qname, qtype.code(), RecordClass::IN.code())
    }

    /// Creates a question for an A record lookup.
    #[inline]
    pub fn a(name: Name) -> Self {
        Self::internet(name, RecordType::A)
    }

    /// Creates a question for an AAAA record lookup.
    #[inline]
    pub fn aaaa(name: Name) -> Self {
        Self::internet(name, RecordType::AAAA)
    }

    /// Creates a question for an MX record lookup.
    #[inline]
    pub fn mx(name: Name) -> Self {
        Self::internet(name, RecordType::MX)
    }

    /// Creates a question for a TXT record lookup.
    #[inline]
    pub fn txt(name: Name) -> Self {
        Self::internet(name, RecordType::TXT)
    }

    /// Creates a question for a PTR (reverse DNS) lookup.
    #[inline]
    pub fn ptr(name: Name) -> Self {
        Self::internet(name, RecordType::PTR)
    }

    /// Creates a question for an ANY lookup.
    #[inline]
    pub fn any(name: Name) -> Self {
        Self::internet(name, RecordType::ANY)
    }

    /// Returns the record type if it is in the named set.
    #[inline]
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_code(self.qtype)
    }

    /// Returns true if this question matches another, case-insensitively on
    /// the name and exactly on type and class.
    pub fn matches(&self, other: &Question) -> bool {
        self.qname == other.qname && self.qtype == other.qtype && self.qclass == other.qclass
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.qname,
            format_class_code(self.qclass),
            format_type_code(self.qtype)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_question_creation() {
        let name = Name::from_str("example.com").unwrap();
        let q = Question::a(name.clone());

        assert_eq!(q.qname, name);
        assert_eq!(q.qtype, 1);
        assert_eq!(q.qclass, 1);
        assert_eq!(q.record_type(), Some(RecordType::A));
    }

    #[test]
    fn test_question_matching() {
        let q1 = Question::a(Name::from_str("example.com").unwrap());
        let q2 = Question::a(Name::from_str("EXAMPLE.COM").unwrap());
        let q3 = Question::aaaa(Name::from_str("example.com").unwrap());

        assert!(q1.matches(&q2));
        assert!(!q1.matches(&q3));
    }

    #[test]
    fn test_question_display() {
        let q = Question::mx(Name::from_str("example.com").unwrap());
        assert_eq!(q.to_string(), "example.com. IN MX");

        let odd = Question::new(Name::from_str("example.com").unwrap(), 65280, 7);
        assert_eq!(odd.to_string(), "example.com. CLASS7 TYPE65280");
    }
}
