//! Message decoder.
//!
//! The decoder reads the 12-byte header, then the question and resource
//! record sections in protocol order, resolving name-compression pointers
//! against the full packet. Pointer chasing is cycle-safe: every visited
//! offset is tracked within a name decode, and any revisit fails fast
//! instead of hanging.

use crate::compress::LabelRegistry;
use crate::error::{Error, Result};
use crate::header::{Header, HEADER_SIZE};
use crate::message::Message;
use crate::name::Name;
use crate::question::Question;
use crate::rdata::RecordData;
use crate::record::Record;
use crate::registry::{opaque_def, TypeRegistry};
use crate::rtype::format_type_code;
use crate::typedef::TypeDef;
use crate::value::{CharacterString, Value, ValueKind};
use crate::wire::Packet;
use crate::MAX_NAME_LENGTH;
use bytes::Bytes;
use compact_str::CompactString;
use hashbrown::HashSet;
use std::sync::Arc;
use tracing::trace;

/// A name needs at least two wire bytes per label, so 255 bytes bound the
/// labels followed (pointers included) within one name decode.
const MAX_NAME_LABELS: usize = MAX_NAME_LENGTH / 2;

/// Decodes a wire-format message against the given RR type registry.
///
/// Type codes absent from the registry decode with their RDATA as a single
/// opaque value.
pub fn decode(data: &[u8], types: &TypeRegistry) -> Result<Message> {
    let header = Header::parse(data)?;
    let mut ctx = DecodingContext::new(data);
    ctx.packet.skip(HEADER_SIZE)?;

    let mut questions = Vec::with_capacity(header.qd_count as usize);
    for _ in 0..header.qd_count {
        questions.push(ctx.read_question()?);
    }

    let mut answers = Vec::with_capacity(header.an_count as usize);
    for _ in 0..header.an_count {
        answers.push(ctx.read_record(types)?);
    }

    let mut authority = Vec::with_capacity(header.ns_count as usize);
    for _ in 0..header.ns_count {
        authority.push(ctx.read_record(types)?);
    }

    let mut additional = Vec::with_capacity(header.ar_count as usize);
    for _ in 0..header.ar_count {
        additional.push(ctx.read_record(types)?);
    }

    Ok(Message::from_parts(
        header, questions, answers, authority, additional,
    ))
}

/// Per-packet decoding state: the input behind a read cursor, plus the label
/// registry populated as names are parsed (reverse lookups feed tracing).
#[derive(Debug)]
pub struct DecodingContext {
    /// The full packet; pointer targets are resolved against it.
    packet: Packet,
    /// Suffixes observed so far, at their first offsets.
    registry: LabelRegistry,
}

impl DecodingContext {
    /// Creates a context over one packet's bytes.
    pub fn new(data: &[u8]) -> Self {
        Self {
            packet: Packet::from_bytes(data),
            registry: LabelRegistry::new(),
        }
    }

    /// Reads one question at the cursor.
    fn read_question(&mut self) -> Result<Question> {
        let qname = self.read_name()?;
        let qtype = self.packet.read_u16()?;
        let qclass = self.packet.read_u16()?;
        Ok(Question::new(qname, qtype, qclass))
    }

    /// Reads one resource record at the cursor.
    fn read_record(&mut self, types: &TypeRegistry) -> Result<Record> {
        let name = self.read_name()?;
        let rtype = self.packet.read_u16()?;
        let class = self.packet.read_u16()?;
        let ttl = self.packet.read_u32()?;
        let rdlength = self.packet.read_u16()? as usize;

        let start = self.packet.position();
        if start + rdlength > self.packet.len() {
            return Err(Error::short_read(start + rdlength));
        }

        let def = types.get(rtype).cloned().unwrap_or_else(opaque_def);
        let data = self.read_rdata(&def, rtype, start, rdlength)?;

        Ok(Record::new(name, rtype, class, ttl, data))
    }

    /// Interprets `rdlength` bytes of RDATA per the type definition.
    ///
    /// Fields decode in declared order; a trailing variadic field consumes
    /// values until the RDATA is exhausted, then its minimum count is
    /// enforced. The bytes consumed must equal RDLENGTH exactly.
    fn read_rdata(
        &mut self,
        def: &Arc<TypeDef>,
        rtype: u16,
        start: usize,
        rdlength: usize,
    ) -> Result<RecordData> {
        let end = start + rdlength;
        let mut data = RecordData::new(def.clone());

        for field in def.fields() {
            if field.is_multiple() {
                let mut count = 0usize;
                while self.packet.position() < end {
                    let value = self.read_value(field.kind(), rtype, start, end)?;
                    data.push(field.index(), value)?;
                    count += 1;
                }
                if count < field.minimum() as usize {
                    return Err(Error::rdata_length_mismatch(
                        format_type_code(rtype),
                        rdlength,
                        self.packet.position() - start,
                    ));
                }
            } else {
                let value = self.read_value(field.kind(), rtype, start, end)?;
                data.push(field.index(), value)?;
            }
        }

        let consumed = self.packet.position() - start;
        if consumed != rdlength {
            return Err(Error::rdata_length_mismatch(
                format_type_code(rtype),
                rdlength,
                consumed,
            ));
        }

        Ok(data)
    }

    /// Reads one value of the given kind from within the RDATA window.
    fn read_value(
        &mut self,
        kind: ValueKind,
        rtype: u16,
        start: usize,
        end: usize,
    ) -> Result<Value> {
        match kind {
            ValueKind::Char => {
                self.ensure_within(1, rtype, start, end)?;
                Ok(Value::Char(self.packet.read_u8()?))
            }
            ValueKind::Short => {
                self.ensure_within(2, rtype, start, end)?;
                Ok(Value::Short(self.packet.read_u16()?))
            }
            ValueKind::Long => {
                self.ensure_within(4, rtype, start, end)?;
                Ok(Value::Long(self.packet.read_u32()?))
            }
            ValueKind::CharacterString => {
                self.ensure_within(1, rtype, start, end)?;
                let len = self.packet.read_u8()? as usize;
                self.ensure_within(len, rtype, start, end)?;
                let bytes = Bytes::copy_from_slice(self.packet.read(len)?);
                Ok(Value::CharacterString(CharacterString::new(bytes)?))
            }
            ValueKind::Ipv4 => {
                self.ensure_within(4, rtype, start, end)?;
                let octets: [u8; 4] = self
                    .packet
                    .read(4)?
                    .try_into()
                    .expect("slice length checked");
                Ok(Value::ipv4(octets))
            }
            ValueKind::Ipv6 => {
                self.ensure_within(16, rtype, start, end)?;
                let octets: [u8; 16] = self
                    .packet
                    .read(16)?
                    .try_into()
                    .expect("slice length checked");
                Ok(Value::Ipv6(octets.into()))
            }
            // Opaque kinds absorb the rest of the RDATA.
            ValueKind::Anything => {
                let rest = end - self.packet.position();
                Ok(Value::anything(Bytes::copy_from_slice(
                    self.packet.read(rest)?,
                )))
            }
            ValueKind::BitMap => {
                let rest = end - self.packet.position();
                Ok(Value::bitmap(Bytes::copy_from_slice(
                    self.packet.read(rest)?,
                )))
            }
            // Names inside RDATA resolve against the full packet, but the
            // bytes consumed at the cursor must stay inside the window.
            ValueKind::Name => {
                let name = self.read_name()?;
                if self.packet.position() > end {
                    return Err(Error::rdata_length_mismatch(
                        format_type_code(rtype),
                        end - start,
                        self.packet.position() - start,
                    ));
                }
                Ok(Value::Name(name))
            }
        }
    }

    /// Fails with a length mismatch if `need` bytes would cross the RDATA end.
    fn ensure_within(&self, need: usize, rtype: u16, start: usize, end: usize) -> Result<()> {
        let pos = self.packet.position();
        if pos + need > end {
            return Err(Error::rdata_length_mismatch(
                format_type_code(rtype),
                end - start,
                pos + need - start,
            ));
        }
        Ok(())
    }

    /// Reads a domain name at the cursor, following compression pointers.
    ///
    /// The cursor ends just past the name's bytes at its original position:
    /// past the terminator, or past the first pointer pair. A shadow
    /// position walks pointer targets and never moves the cursor again.
    fn read_name(&mut self) -> Result<Name> {
        let packet_len = self.packet.len();
        let mut pos = self.packet.position();
        // Cursor position after this name, fixed by the first pointer.
        let mut next_cursor: Option<usize> = None;
        // Offsets visited within this name decode; a revisit is a loop.
        let mut seen: HashSet<usize> = HashSet::new();
        // (offset, bytes) per label, in wire order.
        let mut labels: Vec<(usize, Vec<u8>)> = Vec::new();
        // Wire length of the assembled name, terminator included.
        let mut wire_len = 1usize;

        loop {
            if pos >= packet_len {
                return Err(Error::short_read(pos));
            }
            seen.insert(pos);

            let len_byte = self.packet.as_slice()[pos];
            match len_byte & 0xC0 {
                // 14-bit back-pointer into the same packet.
                0xC0 => {
                    if pos + 2 > packet_len {
                        return Err(Error::short_read(pos + 2));
                    }
                    let target = (usize::from(len_byte & 0x3F) << 8)
                        | usize::from(self.packet.as_slice()[pos + 1]);
                    if next_cursor.is_none() {
                        next_cursor = Some(pos + 2);
                    }
                    if target >= packet_len {
                        return Err(Error::PointerOutOfBounds {
                            offset: pos,
                            target,
                        });
                    }
                    if seen.contains(&target) {
                        return Err(Error::CompressionLoop { offset: target });
                    }
                    trace!(
                        offset = pos,
                        target,
                        suffix = ?self.registry.lookup_suffix(target),
                        "following compression pointer"
                    );
                    pos = target;
                }
                // Literal label of up to 63 bytes; zero terminates.
                0x00 => {
                    let len = usize::from(len_byte);
                    if len == 0 {
                        break;
                    }
                    if labels.len() >= MAX_NAME_LABELS {
                        return Err(Error::name_too_long(wire_len + 1 + len));
                    }
                    if pos + 1 + len > packet_len {
                        return Err(Error::short_read(pos + 1 + len));
                    }
                    wire_len += 1 + len;
                    if wire_len > MAX_NAME_LENGTH {
                        return Err(Error::name_too_long(wire_len));
                    }
                    labels.push((pos, self.packet.as_slice()[pos + 1..pos + 1 + len].to_vec()));
                    pos += 1 + len;
                }
                // 0b10 / 0b01 label types are reserved.
                _ => {
                    return Err(Error::ReservedLabelType {
                        offset: pos,
                        byte: len_byte,
                    });
                }
            }
        }

        // Record each label's suffix at its first offset; reverse lookups
        // feed the pointer trace above.
        for (i, &(offset, _)) in labels.iter().enumerate() {
            let mut key = CompactString::default();
            for (_, bytes) in &labels[i..] {
                if !key.is_empty() {
                    key.push('.');
                }
                for &byte in bytes {
                    key.push(byte.to_ascii_lowercase() as char);
                }
            }
            self.registry.register(key, offset);
        }

        let name = Name::from_wire_labels(
            &labels.iter().map(|(_, bytes)| bytes.as_slice()).collect::<Vec<_>>(),
        )?;
        self.packet.seek(next_cursor.unwrap_or(pos + 1))?;
        Ok(name)
    }
}
