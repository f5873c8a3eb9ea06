//! End-to-end codec tests: literal wire scenarios and round-trip properties.

use dnswire::registry::standard_def;
use dnswire::{
    decode, encode, Encoder, Header, Message, Name, Question, Record, RecordClass, RecordData,
    RecordType, TypeDef, TypeRegistry, Value, ValueKind,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

/// Single A-record query: exact wire layout, 29 bytes.
#[test]
fn single_a_query_layout() {
    let mut msg = Message::query(Question::a(name("example.com")));
    msg.set_id(0x1234);

    let wire = encode(&msg, true).unwrap();

    assert_eq!(wire.len(), 29);
    assert_eq!(
        &wire[..12],
        &[0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        &wire[12..25],
        &[0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00]
    );
    assert_eq!(&wire[25..29], &[0x00, 0x01, 0x00, 0x01]);
}

/// Compression reuse: the second answer's name is `03 "www" C0 0C`, pointing
/// at the first byte of `example` in the question's QNAME.
#[test]
fn compression_reuses_question_name() {
    let mut msg = Message::query(Question::a(name("example.com")));
    msg.add_answer(Record::a(name("example.com"), 300, Ipv4Addr::new(192, 0, 2, 1)));
    msg.add_answer(Record::a(
        name("www.example.com"),
        300,
        Ipv4Addr::new(192, 0, 2, 2),
    ));

    let wire = encode(&msg, true).unwrap();

    // First answer: owner collapses to a pointer at the QNAME (offset 0x0C).
    assert_eq!(&wire[29..31], &[0xC0, 0x0C]);
    // Second answer: one literal label then the shared pointer.
    let offset = 29 + 2 + 10 + 4;
    assert_eq!(
        &wire[offset..offset + 6],
        &[0x03, b'w', b'w', b'w', 0xC0, 0x0C]
    );

    // Both encodings decode to the same message.
    let registry = TypeRegistry::standard();
    let compressed = decode(&wire, &registry).unwrap();
    let literal = decode(&encode(&msg, false).unwrap(), &registry).unwrap();
    assert_eq!(compressed, literal);
}

/// Truncation: 40 answers cannot fit 512 bytes; TC is set, the counts
/// reflect only committed records, and every committed record is whole.
#[test]
fn truncation_drops_overflowing_records() {
    let mut msg = Message::query(Question::a(name("a.example.com")));
    for i in 0..40u8 {
        msg.add_answer(Record::a(
            name("a.example.com"),
            300,
            Ipv4Addr::new(192, 0, 2, i),
        ));
    }

    let wire = encode(&msg, true).unwrap();
    assert!(wire.len() <= 512);

    let header = Header::parse(&wire).unwrap();
    assert!(header.is_truncated());
    assert_eq!(header.qd_count, 1);
    assert!(header.an_count > 0 && header.an_count < 40);

    // The output still parses, with exactly the committed record count.
    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    assert_eq!(parsed.answers().len(), header.an_count as usize);
}

/// Pointer cycle: a name that points at itself must fail, not hang.
#[test]
fn self_referential_pointer_rejected() {
    let mut wire = Vec::new();
    let mut header = Header::new(0);
    header.qd_count = 1;
    wire.extend_from_slice(&header.to_wire());
    wire.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);

    let err = decode(&wire, &TypeRegistry::standard()).unwrap_err();
    assert!(matches!(err, dnswire::Error::CompressionLoop { offset: 12 }));
}

/// Reserved label types: a length byte with top bits `10` must fail.
#[test]
fn reserved_label_type_rejected() {
    let mut wire = Vec::new();
    let mut header = Header::new(0);
    header.qd_count = 1;
    wire.extend_from_slice(&header.to_wire());
    wire.extend_from_slice(&[0x80, 0x00, 0x00, 0x01, 0x00, 0x01]);

    let err = decode(&wire, &TypeRegistry::standard()).unwrap_err();
    assert!(matches!(
        err,
        dnswire::Error::ReservedLabelType { offset: 12, byte: 0x80 }
    ));
}

/// Variadic TXT: three character-strings, exact RDATA bytes both ways.
#[test]
fn txt_variadic_field_roundtrip() {
    let mut msg = Message::new(Header::new(7));
    msg.add_answer(Record::txt(name("example.com"), 60, ["a", "bb", "ccc"]).unwrap());

    let wire = encode(&msg, true).unwrap();
    let rdata_start = wire.len() - 9;
    assert_eq!(
        &wire[rdata_start..],
        &[0x01, 0x61, 0x02, 0x62, 0x62, 0x03, 0x63, 0x63, 0x63]
    );

    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    let strings = parsed.answers()[0].data().get("txtdata").unwrap();
    assert_eq!(strings.len(), 3);
    assert_eq!(strings[0].as_bytes(), Some(&b"a"[..]));
    assert_eq!(strings[1].as_bytes(), Some(&b"bb"[..]));
    assert_eq!(strings[2].as_bytes(), Some(&b"ccc"[..]));
}

fn soa_record(owner: &str) -> Record {
    let def = standard_def(RecordType::SOA).unwrap();
    let data = RecordData::from_values(
        def,
        vec![
            vec![Value::Name(name("ns1.example.com"))],
            vec![Value::Name(name("hostmaster.example.com"))],
            vec![Value::Long(2024_07_01)],
            vec![Value::Long(7200)],
            vec![Value::Long(3600)],
            vec![Value::Long(1_209_600)],
            vec![Value::Long(300)],
        ],
    )
    .unwrap();
    Record::new(
        name(owner),
        RecordType::SOA.code(),
        RecordClass::IN.code(),
        86_400,
        data,
    )
}

fn wks_record(owner: &str) -> Record {
    let def = standard_def(RecordType::WKS).unwrap();
    let data = RecordData::from_values(
        def,
        vec![
            vec![Value::ipv4([192, 0, 2, 8])],
            vec![Value::Char(6)],
            vec![Value::bitmap(vec![0x40u8, 0x01, 0x00, 0x08])],
        ],
    )
    .unwrap();
    Record::new(
        name(owner),
        RecordType::WKS.code(),
        RecordClass::IN.code(),
        3600,
        data,
    )
}

fn srv_record(owner: &str) -> Record {
    let def = standard_def(RecordType::SRV).unwrap();
    let data = RecordData::from_values(
        def,
        vec![
            vec![Value::Short(10)],
            vec![Value::Short(60)],
            vec![Value::Short(5060)],
            vec![Value::Name(name("sip.example.com"))],
        ],
    )
    .unwrap();
    Record::new(
        name(owner),
        RecordType::SRV.code(),
        RecordClass::IN.code(),
        120,
        data,
    )
}

fn hinfo_record(owner: &str) -> Record {
    let def = standard_def(RecordType::HINFO).unwrap();
    let data = RecordData::from_values(
        def,
        vec![
            vec![Value::CharacterString("AMD64".parse().unwrap())],
            vec![Value::CharacterString("Linux".parse().unwrap())],
        ],
    )
    .unwrap();
    Record::new(
        name(owner),
        RecordType::HINFO.code(),
        RecordClass::IN.code(),
        3600,
        data,
    )
}

/// A response exercising every standard value kind.
fn kitchen_sink() -> Message {
    let query = Message::query(Question::any(name("example.com")));
    let mut msg = Message::response_from(&query);
    msg.header_mut().set_authoritative(true);

    msg.add_answer(Record::a(name("example.com"), 300, Ipv4Addr::new(192, 0, 2, 1)));
    msg.add_answer(Record::aaaa(
        name("example.com"),
        300,
        Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1),
    ));
    msg.add_answer(Record::mx(name("example.com"), 3600, 10, name("mail.example.com")));
    msg.add_answer(Record::txt(name("example.com"), 60, ["v=spf1 -all"]).unwrap());
    msg.add_answer(Record::cname(name("www.example.com"), 300, name("example.com")));
    msg.add_answer(wks_record("example.com"));
    msg.add_answer(srv_record("_sip._udp.example.com"));
    msg.add_answer(hinfo_record("example.com"));
    msg.add_authority(soa_record("example.com"));
    msg.add_additional(Record::a(
        name("mail.example.com"),
        300,
        Ipv4Addr::new(192, 0, 2, 25),
    ));
    msg
}

/// Round-trip without compression: decode(encode(m, false)) == m.
#[test]
fn roundtrip_without_compression() {
    let msg = kitchen_sink();
    let wire = encode(&msg, false).unwrap();
    assert!(!Header::parse(&wire).unwrap().is_truncated());

    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    assert_eq!(parsed, msg);
}

/// Compression invariance: both encodings decode identically, and the
/// compressed form is strictly smaller.
#[test]
fn compression_is_invisible_after_decode() {
    let msg = kitchen_sink();
    let registry = TypeRegistry::standard();

    let compressed = encode(&msg, true).unwrap();
    let literal = encode(&msg, false).unwrap();
    assert!(compressed.len() < literal.len());

    assert_eq!(
        decode(&compressed, &registry).unwrap(),
        decode(&literal, &registry).unwrap()
    );
}

/// Round-trip with compression against the original model.
#[test]
fn roundtrip_with_compression() {
    let msg = kitchen_sink();
    let wire = encode(&msg, true).unwrap();
    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    assert_eq!(parsed, msg);
}

/// Caller-registered custom types flow through both directions.
#[test]
fn custom_type_registration_roundtrip() {
    const BEACON: u16 = 0xFF31;

    let mut registry = TypeRegistry::standard();
    registry.insert(
        BEACON,
        TypeDef::new(
            "BEACON",
            &[("generation", ValueKind::Long), ("tags*", ValueKind::CharacterString)],
        )
        .unwrap(),
    );

    let def = registry.get(BEACON).unwrap().clone();
    let data = RecordData::from_values(
        def,
        vec![
            vec![Value::Long(42)],
            vec![
                Value::character_string("alpha").unwrap(),
                Value::character_string("beta").unwrap(),
            ],
        ],
    )
    .unwrap();

    let mut msg = Message::new(Header::new(9));
    msg.add_answer(Record::new(
        name("beacon.example.com"),
        BEACON,
        RecordClass::IN.code(),
        30,
        data,
    ));

    let wire = encode(&msg, true).unwrap();
    let parsed = decode(&wire, &registry).unwrap();
    assert_eq!(parsed, msg);

    let record = &parsed.answers()[0];
    assert_eq!(record.data().get_one("generation").unwrap().as_u32(), Some(42));
    assert_eq!(record.data().get("tags").unwrap().len(), 2);

    // Without the registration, the same bytes decode opaquely.
    let plain = decode(&wire, &TypeRegistry::standard()).unwrap();
    let opaque = plain.answers()[0].data().get_one("data").unwrap();
    assert_eq!(opaque.kind(), ValueKind::Anything);
    // 4 bytes of generation plus two length-prefixed tags.
    assert_eq!(opaque.wire_len(), 15);
}

/// An OPT pseudo-RR in the additional section passes through untouched.
#[test]
fn opt_record_is_carried_opaque() {
    let def = standard_def(RecordType::OPT).unwrap();
    let data = RecordData::from_values(
        def,
        vec![vec![Value::anything(vec![0x00u8, 0x0A, 0x00, 0x02, 0xBE, 0xEF])]],
    )
    .unwrap();

    let mut msg = Message::query(Question::a(name("example.com")));
    // OPT owner is the root, class carries the payload size.
    msg.add_additional(Record::new(name("."), RecordType::OPT.code(), 4096, 0, data));

    let wire = encode(&msg, true).unwrap();
    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    assert_eq!(parsed, msg);
    assert_eq!(
        parsed.additional()[0]
            .data()
            .get_one("data")
            .unwrap()
            .as_bytes(),
        Some(&[0x00, 0x0A, 0x00, 0x02, 0xBE, 0xEF][..])
    );
}

/// Case survives encoding while comparison stays case-insensitive.
#[test]
fn names_compare_case_insensitively_after_roundtrip() {
    let mut msg = Message::query(Question::a(name("WWW.Example.COM")));
    msg.add_answer(Record::a(
        name("www.example.com"),
        60,
        Ipv4Addr::new(10, 0, 0, 1),
    ));

    // The answer owner compresses against the differently-cased QNAME.
    let wire = encode(&msg, true).unwrap();
    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();

    assert_eq!(parsed.question().unwrap().qname, name("www.example.com"));
    assert_eq!(parsed.answers()[0].name(), &name("WWW.EXAMPLE.COM"));
}

/// A raised budget keeps records the default budget would drop.
#[test]
fn configurable_budget_avoids_truncation() {
    let mut msg = Message::query(Question::a(name("a.example.com")));
    for i in 0..40u8 {
        msg.add_answer(Record::a(
            name("a.example.com"),
            300,
            Ipv4Addr::new(192, 0, 2, i),
        ));
    }

    let wire = Encoder::new().with_max_size(4096).encode(&msg).unwrap();
    let header = Header::parse(&wire).unwrap();
    assert!(!header.is_truncated());
    assert_eq!(header.an_count, 40);

    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    assert_eq!(parsed, msg);
}

/// Every compression pointer in compressed output is legal: its target is
/// below 16384 and inside the packet, and it resolves to the right name.
#[test]
fn emitted_pointers_stay_legal_at_scale() {
    let mut msg = Message::new(Header::new(1));
    // Repeat owners so later occurrences hit the registry after the packet
    // has grown past the 14-bit pointer limit.
    for i in 0..300u32 {
        let owner = name(&format!("h{}.zone{}.example.com", i % 20, i % 7));
        msg.add_answer(Record::txt(owner, 60, [vec![b'x'; 120]]).unwrap());
    }

    let wire = Encoder::new().with_max_size(80_000).encode(&msg).unwrap();
    assert!(wire.len() > dnswire::compress::COMPRESSION_POINTER_LIMIT);
    assert!(!Header::parse(&wire).unwrap().is_truncated());

    // If any pointer were emitted against an offset >= 16384, the 14-bit
    // truncation would corrupt some owner name and this comparison fails.
    let parsed = decode(&wire, &TypeRegistry::standard()).unwrap();
    assert_eq!(parsed, msg);
}
