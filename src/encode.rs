//! Message encoder.
//!
//! The encoder walks a message section by section, emitting each record into
//! the packet body behind a size-budget check, then assembles the 12-byte
//! header last so the section counts reflect only the records that were
//! actually committed. Domain names are compressed against the label
//! registry unless compression is disabled.

use crate::compress::LabelRegistry;
use crate::error::Result;
use crate::header::{Header, HEADER_SIZE};
use crate::message::Message;
use crate::name::Name;
use crate::question::Question;
use crate::rdata::RecordData;
use crate::record::Record;
use crate::value::Value;
use crate::wire::Packet;
use crate::MAX_UDP_MESSAGE_SIZE;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

/// Encodes a message with the default 512-byte budget.
///
/// Records that would push the packet past the budget are dropped and the
/// TC bit is set; see [`Encoder`] for a configurable budget.
pub fn encode(message: &Message, compress: bool) -> Result<Bytes> {
    Encoder::new().with_compression(compress).encode(message)
}

/// Per-packet encoding state: the body under construction, the compression
/// registry, and the sticky truncation flag.
#[derive(Debug)]
pub struct EncodingContext {
    /// The packet body (header excluded; it is prepended at the end).
    packet: Packet,
    /// Suffix offsets for name compression.
    registry: LabelRegistry,
    /// Whether names may be compressed.
    compress: bool,
    /// Sticky once set: no further record bytes are written.
    truncated: bool,
}

impl EncodingContext {
    /// Creates a fresh context for one packet.
    pub fn new(compress: bool) -> Self {
        Self {
            packet: Packet::with_capacity(MAX_UDP_MESSAGE_SIZE),
            registry: LabelRegistry::new(),
            compress,
            truncated: false,
        }
    }

    /// Returns the header-inclusive offset where the next byte will land.
    #[inline]
    fn wire_offset(&self) -> usize {
        HEADER_SIZE + self.packet.len()
    }

    /// Returns true once truncation has occurred.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn mark_truncated(&mut self) {
        self.truncated = true;
    }
}

/// A configurable message encoder.
///
/// The default budget is the classic 512-byte UDP limit; callers that have
/// negotiated a larger payload size via EDNS(0) can raise it with
/// [`Encoder::with_max_size`].
#[derive(Debug, Clone)]
pub struct Encoder {
    /// Whether to compress domain names.
    compress: bool,
    /// Total message budget, header included.
    max_size: usize,
}

impl Encoder {
    /// Creates an encoder with compression on and the 512-byte budget.
    pub fn new() -> Self {
        Self {
            compress: true,
            max_size: MAX_UDP_MESSAGE_SIZE,
        }
    }

    /// Enables or disables name compression.
    #[must_use]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Overrides the total message budget (header included).
    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Encodes a message to wire format.
    ///
    /// Section order is fixed: questions, answers, authority, additional.
    /// Emission becomes a no-op once the budget is exceeded; the header is
    /// produced last with the committed counts and, if anything was dropped,
    /// the TC bit.
    pub fn encode(&self, message: &Message) -> Result<Bytes> {
        let mut ctx = EncodingContext::new(self.compress);

        let mut qd_count = 0u16;
        for question in message.questions() {
            if self.encode_question(&mut ctx, question) {
                qd_count += 1;
            }
        }

        let mut an_count = 0u16;
        for record in message.answers() {
            if self.encode_record(&mut ctx, record)? {
                an_count += 1;
            }
        }

        let mut ns_count = 0u16;
        for record in message.authority() {
            if self.encode_record(&mut ctx, record)? {
                ns_count += 1;
            }
        }

        let mut ar_count = 0u16;
        for record in message.additional() {
            if self.encode_record(&mut ctx, record)? {
                ar_count += 1;
            }
        }

        let mut header = message.header().clone();
        header.qd_count = qd_count;
        header.an_count = an_count;
        header.ns_count = ns_count;
        header.ar_count = ar_count;
        if ctx.is_truncated() {
            header.set_truncated(true);
            debug!(
                qd_count,
                an_count, ns_count, ar_count, "message truncated to fit size budget"
            );
        }

        Ok(assemble(&header, &ctx.packet))
    }

    /// Emits one question. Returns false if it was dropped for size.
    fn encode_question(&self, ctx: &mut EncodingContext, question: &Question) -> bool {
        if ctx.truncated {
            return false;
        }

        let base = ctx.wire_offset();
        let name = encode_name(ctx, &question.qname, base);
        if base + name.len() + 4 > self.max_size {
            trace!(qname = %question.qname, "question exceeds size budget");
            ctx.mark_truncated();
            return false;
        }

        ctx.packet.write(&name);
        ctx.packet.write_u16(question.qtype);
        ctx.packet.write_u16(question.qclass);
        true
    }

    /// Emits one resource record. Returns false if it was dropped for size.
    ///
    /// The name and RDATA are built into temporaries and the budget is
    /// checked before anything is committed, so a record never partially
    /// occupies the packet. Name encoding registers suffixes eagerly, which
    /// can leave offsets for bytes that are never written; harmless, since
    /// nothing is emitted after truncation.
    fn encode_record(&self, ctx: &mut EncodingContext, record: &Record) -> Result<bool> {
        if ctx.truncated {
            return Ok(false);
        }

        record.data().validate()?;

        let base = ctx.wire_offset();
        let owner = encode_name(ctx, record.name(), base);
        let rdata = encode_rdata(ctx, record.data(), base + owner.len() + 10);

        if base + owner.len() + 10 + rdata.len() > self.max_size {
            trace!(
                owner = %record.name(),
                rtype = record.rtype(),
                "record exceeds size budget"
            );
            ctx.mark_truncated();
            return Ok(false);
        }

        ctx.packet.write(&owner);
        ctx.packet.write_u16(record.rtype());
        ctx.packet.write_u16(record.class());
        ctx.packet.write_u32(record.ttl());
        ctx.packet.write_u16(rdata.len() as u16);
        ctx.packet.write(&rdata);
        Ok(true)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Prepends the header to the committed packet body.
fn assemble(header: &Header, packet: &Packet) -> Bytes {
    let mut out = BytesMut::with_capacity(HEADER_SIZE + packet.len());
    out.put_slice(&header.to_wire());
    out.put_slice(packet.as_slice());
    out.freeze()
}

/// Encodes a domain name into a temporary, as it would appear at
/// `wire_offset`, consulting and updating the compression registry.
///
/// For each suffix of the name, starting with the whole name and dropping
/// one label from the head at a time: a registered suffix (at a
/// pointer-expressible offset) becomes a 14-bit back-pointer and ends the
/// name; otherwise the suffix is registered at its would-be offset and the
/// head label is emitted literally. A literal name ends with the zero
/// terminator. With compression disabled the registry is not consulted.
fn encode_name(ctx: &mut EncodingContext, name: &Name, wire_offset: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.wire_len());
    let mut pos = wire_offset;

    for (skip, label) in name.labels().enumerate() {
        if ctx.compress {
            if let Some(key) = name.suffix_key(skip) {
                if let Some(target) = ctx.registry.lookup_index(&key) {
                    trace!(suffix = %key, target, "compressing name suffix");
                    out.extend_from_slice(&(0xC000 | target as u16).to_be_bytes());
                    return out;
                }
                ctx.registry.register(key, pos);
            }
        }

        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
        pos += 1 + label.len();
    }

    out.push(0);
    out
}

/// Encodes all RDATA fields of a record into a temporary that will start at
/// `base` in the packet. Values of a variadic final field are concatenated
/// in order.
fn encode_rdata(ctx: &mut EncodingContext, data: &RecordData, base: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.wire_len());
    for field in data.def().fields() {
        for value in data.values(field.index()) {
            encode_value(ctx, value, base + out.len(), &mut out);
        }
    }
    out
}

/// Appends one value's wire form, dispatching on its kind tag.
fn encode_value(ctx: &mut EncodingContext, value: &Value, wire_offset: usize, out: &mut Vec<u8>) {
    match value {
        Value::Anything(bytes) | Value::BitMap(bytes) => out.extend_from_slice(bytes),
        Value::Char(v) => out.push(*v),
        Value::CharacterString(s) => {
            out.push(s.len() as u8);
            out.extend_from_slice(s.as_bytes());
        }
        Value::Short(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Ipv4(addr) => out.extend_from_slice(&addr.octets()),
        Value::Ipv6(addr) => out.extend_from_slice(&addr.octets()),
        Value::Name(name) => {
            let encoded = encode_name(ctx, name, wire_offset);
            out.extend_from_slice(&encoded);
        }
    }
}
