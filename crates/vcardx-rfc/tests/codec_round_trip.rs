//! Round-trip parsing and serialization tests for the vCard codec.
//!
//! These tests verify that cards serialized under one version parse back
//! into the same canonical property/value records.

use vcardx_rfc::rfc::vcard::{
    Card, Charset, CodecContext, Record, VCardVersion, canonicalise, parse, parse_bytes,
    serialize, serialize_line,
};

fn sample_cards(version: VCardVersion) -> Vec<Card> {
    let mut first = Card::new();
    first.push("FN", "Jane Doe");
    first.push("N", "Doe;Jane;Q.;Dr.;");
    first.push(canonicalise("ADR;HOME", version), ";;1 Main St, Apt 5;Springfield;;12345;");
    first.push(canonicalise("EMAIL;HOME;PREF", version), "jane@example.com");
    first.push(canonicalise("TEL;CELL", version), "+1 555 0100");
    first.push(canonicalise("TEL", version), "+1 555 0101");
    first.push("NOTE", "Met at conference; likes tea, coffee");

    let mut second = Card::new();
    second.push("FN", "John Smith");
    second.push("NOTE", "first line\nsecond line");

    vec![first, second, Card::new()]
}

fn round_trip(ctx: &CodecContext, cards: &[Card]) -> Vec<Card> {
    let bytes = serialize(cards, ctx).expect("serialize");
    parse_bytes(&bytes, ctx.version).expect("parse")
}

#[test_log::test]
fn round_trip_v40() {
    let ctx = CodecContext::new(VCardVersion::V40);
    let mut cards = sample_cards(ctx.version);
    cards[1].push("NOTE", r"C:\path\to\file");

    assert_eq!(round_trip(&ctx, &cards), cards);
}

#[test_log::test]
fn round_trip_v30() {
    let ctx = CodecContext::new(VCardVersion::V30);
    let mut cards = sample_cards(ctx.version);
    cards[1].push("NOTE", r"C:\new\dir");
    cards[1].push("NOTE", r"trailing\");

    assert_eq!(round_trip(&ctx, &cards), cards);
}

#[test]
fn round_trip_v21_latin1() {
    let ctx = CodecContext::new(VCardVersion::V21).with_v21_charset(Charset::Iso8859_1);
    let mut cards = sample_cards(ctx.version);
    cards[0].push("FN", "Zoë Müller");
    cards[1].push("NOTE", "hello\nTEL:999");

    let bytes = serialize(&cards, &ctx).unwrap();
    assert!(
        bytes
            .windows(b"FN;CHARSET=ISO-8859-1:".len())
            .any(|w| w == b"FN;CHARSET=ISO-8859-1:")
    );
    assert!(
        !bytes
            .split(|&b| b == b'\n')
            .any(|line| line.starts_with(b"TEL:999"))
    );
    assert_eq!(parse_bytes(&bytes, ctx.version).unwrap(), cards);
}

#[test]
fn round_trip_with_folding() {
    let ctx = CodecContext::new(VCardVersion::V40).with_folding(true);
    let mut card = Card::new();
    card.push("NOTE", "word ".repeat(40).trim_end());
    card.push("FN", "日本語の名前".repeat(8));
    let cards = vec![card];

    let bytes = serialize(&cards, &ctx).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.split("\r\n").all(|line| line.len() <= 75));
    assert_eq!(parse_bytes(&bytes, ctx.version).unwrap(), cards);
}

#[test]
fn compound_segments_preserved_on_the_wire() {
    let value = ";ext;street;;region;;";
    for version in VCardVersion::ALL {
        let ctx = CodecContext::new(version);
        let line = serialize_line("ADR", value, &ctx, false).unwrap();
        let text = String::from_utf8(line).unwrap();
        let wire_value = text
            .trim_end_matches("\r\n")
            .split_once(':')
            .map(|(_, v)| v)
            .unwrap();
        assert_eq!(wire_value.split(';').collect::<Vec<_>>(), value.split(';').collect::<Vec<_>>());
    }
}

#[test]
fn reparse_across_versions_translates_qualifiers() {
    let v21 = "BEGIN:VCARD\r\nVERSION:2.1\r\nTEL;WORK;FAX:555-0199\r\nEMAIL;PREF;INTERNET:a@b.c\r\nEND:VCARD\r\n";
    let cards = parse(v21, VCardVersion::V21).unwrap();
    assert_eq!(cards[0].get("TEL;FAX;WORK"), Some("555-0199"));
    assert_eq!(cards[0].get("EMAIL;PREF"), Some("a@b.c"));

    let translated: Vec<Card> = cards
        .iter()
        .map(|card| {
            card.iter()
                .map(|r| {
                    Record::new(
                        canonicalise(&r.property, VCardVersion::V40),
                        r.value.clone(),
                    )
                })
                .collect::<Card>()
        })
        .collect();

    let ctx = CodecContext::new(VCardVersion::V40);
    let text = String::from_utf8(serialize(&translated, &ctx).unwrap()).unwrap();
    assert!(text.contains("TEL;TYPE=\"fax,work\":555-0199\r\n"));
    assert!(text.contains("EMAIL;PREF=1:a@b.c\r\n"));
}
