//! # dnswire
//!
//! A DNS message wire codec following RFC 1035 and its descendants: an
//! in-memory message object model, a typed per-RR-type field model, and an
//! encoder/decoder pair handling name compression and UDP truncation.
//!
//! This is a library, not a resolver. It opens no sockets, caches nothing,
//! and never retries; higher-level clients, servers, and tools use it to
//! produce and consume DNS packets.
//!
//! ## Features
//!
//! - **Typed field model**: each RR type is an ordered declaration of named,
//!   typed fields, with fixed or trailing-variadic arity and per-type
//!   rendering hooks
//! - **Name compression** (RFC 1035 §4.1.4): back-pointers on encode,
//!   cycle-safe pointer chasing on decode
//! - **Truncation**: records that would push a packet past the size budget
//!   are dropped and the TC bit is set, never a partial record
//! - **Lenient headers**: unassigned opcode/rcode values and reserved flag
//!   bits round-trip bit-for-bit
//!
//! ## Example
//!
//! ```rust
//! use dnswire::{decode, encode, Message, Name, Question, TypeRegistry};
//! use std::str::FromStr;
//!
//! let query = Message::query(Question::a(Name::from_str("example.com.")?));
//!
//! let wire = encode(&query, true)?;
//! let parsed = decode(&wire, &TypeRegistry::standard())?;
//! assert_eq!(parsed.question().unwrap().qname.to_string(), "example.com.");
//! # Ok::<(), dnswire::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod error;
pub mod field;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod registry;
pub mod rtype;
pub mod typedef;
pub mod value;
pub mod wire;

// Re-exports for convenience
pub use class::RecordClass;
pub use compress::LabelRegistry;
pub use decode::decode;
pub use encode::{encode, Encoder};
pub use error::{Error, Result};
pub use field::FieldDef;
pub use header::{Header, HeaderFlags};
pub use message::Message;
pub use name::Name;
pub use opcode::Opcode;
pub use question::Question;
pub use rcode::Rcode;
pub use rdata::RecordData;
pub use record::Record;
pub use registry::TypeRegistry;
pub use rtype::RecordType;
pub use typedef::TypeDef;
pub use value::{CharacterString, Value, ValueKind};

/// Maximum length of a DNS label (63 bytes per RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum wire length of a domain name (255 bytes per RFC 1035).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS(0) (512 bytes per RFC 1035).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
