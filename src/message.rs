//! DNS message representation.
//!
//! A message is a header plus four ordered sections: questions, answers,
//! authority, additional. Section order is fixed by the protocol; within a
//! section, records keep the order the caller supplied (duplicates allowed).

use crate::header::Header;
use crate::opcode::Opcode;
use crate::question::Question;
use crate::rcode::Rcode;
use crate::record::Record;
use std::fmt;

/// A complete DNS message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The message header.
    header: Header,
    /// The question section.
    questions: Vec<Question>,
    /// The answer section.
    answers: Vec<Record>,
    /// The authority section.
    authority: Vec<Record>,
    /// The additional section.
    additional: Vec<Record>,
}

impl Message {
    /// Creates an empty message with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Creates a query message with a random ID and recursion requested.
    pub fn query(question: Question) -> Self {
        let mut msg = Self::new(Header::query());
        msg.add_question(question);
        msg
    }

    /// Creates an empty response message mirroring a query.
    pub fn response_from(query: &Message) -> Self {
        let mut msg = Self::new(Header::response_from(&query.header));
        for q in &query.questions {
            msg.add_question(q.clone());
        }
        msg
    }

    /// Returns the message header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    #[inline]
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the message ID.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Sets the message ID.
    #[inline]
    pub fn set_id(&mut self, id: u16) {
        self.header.id = id;
    }

    /// Returns the opcode.
    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.header.opcode
    }

    /// Returns the response code.
    #[inline]
    pub fn rcode(&self) -> Rcode {
        self.header.rcode
    }

    /// Sets the response code.
    #[inline]
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.header.rcode = rcode;
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.header.is_response()
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.header.is_truncated()
    }

    /// Returns the question section.
    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question if present.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    #[inline]
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// Returns the authority section.
    #[inline]
    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    /// Returns the additional section.
    #[inline]
    pub fn additional(&self) -> &[Record] {
        &self.additional
    }

    /// Adds a question, keeping the header count in sync.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qd_count = self.questions.len() as u16;
    }

    /// Adds an answer record, keeping the header count in sync.
    pub fn add_answer(&mut self, record: Record) {
        self.answers.push(record);
        self.header.an_count = self.answers.len() as u16;
    }

    /// Adds an authority record, keeping the header count in sync.
    pub fn add_authority(&mut self, record: Record) {
        self.authority.push(record);
        self.header.ns_count = self.authority.len() as u16;
    }

    /// Adds an additional record, keeping the header count in sync.
    pub fn add_additional(&mut self, record: Record) {
        self.additional.push(record);
        self.header.ar_count = self.additional.len() as u16;
    }

    /// Assembles a decoded message; counts come from the wire header.
    pub(crate) fn from_parts(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<Record>,
        authority: Vec<Record>,
        additional: Vec<Record>,
    ) -> Self {
        Self {
            header,
            questions,
            answers,
            authority,
            additional,
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new(Header::default())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;

        writeln!(f, ";; QUESTION SECTION:")?;
        for q in &self.questions {
            writeln!(f, ";{}", q)?;
        }

        if !self.answers.is_empty() {
            writeln!(f, ";; ANSWER SECTION:")?;
            for r in &self.answers {
                writeln!(f, "{}", r)?;
            }
        }

        if !self.authority.is_empty() {
            writeln!(f, ";; AUTHORITY SECTION:")?;
            for r in &self.authority {
                writeln!(f, "{}", r)?;
            }
        }

        if !self.additional.is_empty() {
            writeln!(f, ";; ADDITIONAL SECTION:")?;
            for r in &self.additional {
                writeln!(f, "{}", r)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Name;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    #[test]
    fn test_query_creation() {
        let msg = Message::query(Question::a(Name::from_str("example.com").unwrap()));

        assert!(!msg.is_response());
        assert_eq!(msg.questions().len(), 1);
        assert_eq!(msg.header().qd_count, 1);
        assert!(msg.header().recursion_desired());
    }

    #[test]
    fn test_response_mirrors_query() {
        let query = Message::query(Question::a(Name::from_str("example.com").unwrap()));
        let mut response = Message::response_from(&query);

        response.add_answer(Record::a(
            Name::from_str("example.com").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        ));

        assert!(response.is_response());
        assert_eq!(response.id(), query.id());
        assert_eq!(response.questions(), query.questions());
        assert_eq!(response.header().an_count, 1);
    }

    #[test]
    fn test_counts_stay_in_sync() {
        let mut msg = Message::default();
        let name = Name::from_str("example.com").unwrap();

        msg.add_question(Question::a(name.clone()));
        msg.add_answer(Record::a(name.clone(), 60, Ipv4Addr::new(10, 0, 0, 1)));
        msg.add_answer(Record::a(name.clone(), 60, Ipv4Addr::new(10, 0, 0, 2)));
        msg.add_authority(Record::cname(name.clone(), 60, name.clone()));
        msg.add_additional(Record::a(name, 60, Ipv4Addr::new(10, 0, 0, 3)));

        let header = msg.header();
        assert_eq!(
            (header.qd_count, header.an_count, header.ns_count, header.ar_count),
            (1, 2, 1, 1)
        );
    }

    #[test]
    fn test_duplicates_permitted() {
        let mut msg = Message::default();
        let record = Record::a(
            Name::from_str("example.com").unwrap(),
            60,
            Ipv4Addr::new(10, 0, 0, 1),
        );
        msg.add_answer(record.clone());
        msg.add_answer(record);
        assert_eq!(msg.answers().len(), 2);
    }

    #[test]
    fn test_display_sections() {
        let query = Message::query(Question::a(Name::from_str("example.com").unwrap()));
        let mut response = Message::response_from(&query);
        response.add_answer(Record::a(
            Name::from_str("example.com").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        ));

        let rendered = response.to_string();
        assert!(rendered.contains(";; QUESTION SECTION:"));
        assert!(rendered.contains(";example.com. IN A"));
        assert!(rendered.contains(";; ANSWER SECTION:"));
        assert!(rendered.contains("192.0.2.1"));
    }
}
