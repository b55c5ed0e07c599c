//! vCard card parser.
//!
//! Scans for `BEGIN:VCARD`/`END:VCARD` boundaries and turns each contained
//! content line into a canonical property/value record.

use std::borrow::Cow;

use super::lexer::{
    LogicalLine, is_marker, logical_lines, split_content_line, take_charset_param,
    take_quoted_printable,
};
use crate::rfc::vcard::core::property::{BEGIN_MARKER, END_MARKER};
use crate::rfc::vcard::core::{
    Card, Charset, VCardVersion, base_name, canonicalise, is_compound, names,
};
use crate::rfc::vcard::error::{CodecError, CodecResult};
use crate::rfc::vcard::escape::unescape_value;
use crate::rfc::vcard::quoted_printable;

/// Parses vCard text into cards.
///
/// ## Errors
/// See [`parse_bytes`].
pub fn parse(input: &str, version: VCardVersion) -> CodecResult<Vec<Card>> {
    parse_bytes(input.as_bytes(), version)
}

/// Parses raw vCard bytes into cards, in source order.
///
/// Text outside cards is ignored. Under 2.1 each value is decoded through
/// its `CHARSET` parameter (UTF-8 when absent), after undoing any
/// `ENCODING=QUOTED-PRINTABLE`; under 3.0 and 4.0 the `CHARSET` parameter
/// is stripped and values are UTF-8. The `VERSION` line is consumed, not
/// returned as a record.
///
/// ## Errors
/// - `MalformedCard` for an unterminated or nested card, or a content line
///   without a value separator.
/// - `UnknownCharset` for a 2.1 `CHARSET` absent from the charset table.
#[tracing::instrument(skip(input), fields(input_len = input.len(), version = %version))]
pub fn parse_bytes(input: &[u8], version: VCardVersion) -> CodecResult<Vec<Card>> {
    tracing::debug!("Parsing vCard input");

    let lines = logical_lines(input);
    let mut cards = Vec::new();
    let mut current: Option<(usize, Card)> = None;

    for line in &lines {
        if current.is_none() {
            if is_marker(&line.bytes, BEGIN_MARKER) {
                current = Some((line.number, Card::new()));
            } else {
                tracing::trace!(line = line.number, "Ignoring line outside card");
            }
            continue;
        }

        if is_marker(&line.bytes, END_MARKER) {
            if let Some((_, card)) = current.take() {
                cards.push(card);
            }
            continue;
        }

        if is_marker(&line.bytes, BEGIN_MARKER) {
            return Err(CodecError::malformed(
                line.number,
                "BEGIN:VCARD inside an open card",
            ));
        }

        if let Some((_, card)) = current.as_mut() {
            parse_line(line, version, card)?;
        }
    }

    if let Some((start, _)) = current {
        tracing::warn!(start, "Card is missing END:VCARD");
        return Err(CodecError::malformed(
            start,
            "card opened here has no END:VCARD",
        ));
    }

    tracing::debug!(count = cards.len(), "vCard input parsed");
    Ok(cards)
}

/// Parses one content line and appends its record to the card.
fn parse_line(line: &LogicalLine, version: VCardVersion, card: &mut Card) -> CodecResult<()> {
    let (raw_property, raw_value) = split_content_line(&line.bytes)
        .ok_or_else(|| CodecError::malformed(line.number, "missing colon separator"))?;

    let raw_property = String::from_utf8_lossy(raw_property);
    let (property, charset_name) = take_charset_param(raw_property.trim());

    if base_name(&property).eq_ignore_ascii_case(names::VERSION) {
        let declared = String::from_utf8_lossy(raw_value);
        if declared.trim() != version.as_str() {
            tracing::warn!(
                line = line.number,
                declared = %declared.trim(),
                active = %version,
                "Card VERSION differs from active version"
            );
        }
        return Ok(());
    }

    let (property, quoted) = if version == VCardVersion::V21 {
        take_quoted_printable(&property)
    } else {
        (property, false)
    };
    let raw_value: Cow<'_, [u8]> = if quoted {
        Cow::Owned(quoted_printable::decode(raw_value))
    } else {
        Cow::Borrowed(raw_value)
    };

    let charset = match (version, charset_name) {
        (VCardVersion::V21, Some(name)) => Charset::lookup(&name)
            .ok_or_else(|| CodecError::unknown_charset(line.number, &name))?,
        (VCardVersion::V21, None) => Charset::Utf8,
        (VCardVersion::V30 | VCardVersion::V40, charset_name) => {
            if let Some(name) = charset_name {
                tracing::trace!(line = line.number, charset = %name, "Ignoring CHARSET parameter");
            }
            Charset::Utf8
        }
    };

    let decoded = charset.decode(&raw_value);
    if decoded.had_errors {
        tracing::warn!(
            line = line.number,
            charset = charset.name(),
            "Replaced undecodable bytes in value"
        );
    }

    let value = unescape_value(&decoded.text, version, is_compound(&property));
    let property = canonicalise(&property, version);

    tracing::trace!(line = line.number, property = %property, "Parsed record");
    card.push(property, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::error::CodecErrorKind;

    fn records(card: &Card) -> Vec<(&str, &str)> {
        card.iter()
            .map(|r| (r.property.as_str(), r.value.as_str()))
            .collect()
    }

    #[test_log::test]
    fn parses_simple_card() {
        let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:John Doe\r\nEMAIL:john@example.com\r\nEND:VCARD\r\n";
        let cards = parse(input, VCardVersion::V40).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(
            records(&cards[0]),
            vec![("FN", "John Doe"), ("EMAIL", "john@example.com")]
        );
    }

    #[test_log::test]
    fn v21_quoted_printable_value_is_decoded() {
        let input = b"BEGIN:VCARD\r\nNOTE;CHARSET=ISO-8859-1;ENCODING=QUOTED-PRINTABLE:Zo=EB=0A=\r\nsecond line\r\nFN;QUOTED-PRINTABLE:a=3Db\r\nEND:VCARD\r\n";
        let cards = parse_bytes(input, VCardVersion::V21).unwrap();
        assert_eq!(
            records(&cards[0]),
            vec![("NOTE", "Zoë\nsecond line"), ("FN", "a=b")]
        );
    }

    #[test]
    fn v21_line_break_does_not_forge_a_property() {
        let mut card = Card::new();
        card.push("NOTE", "hello\nTEL:999");
        let ctx = crate::rfc::vcard::CodecContext::new(VCardVersion::V21);
        let bytes = crate::rfc::vcard::serialize(&[card], &ctx).unwrap();

        let cards = parse_bytes(&bytes, VCardVersion::V21).unwrap();
        assert_eq!(records(&cards[0]), vec![("NOTE", "hello\nTEL:999")]);
    }

    #[test]
    fn empty_card_has_no_records() {
        let cards = parse("BEGIN:VCARD\nEND:VCARD\n", VCardVersion::V30).unwrap();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].is_empty());
    }

    #[test]
    fn no_card_markers_yields_nothing() {
        let cards = parse("just some text\nFN:not a card\n", VCardVersion::V40).unwrap();
        assert!(cards.is_empty());
        assert!(parse("", VCardVersion::V21).unwrap().is_empty());
    }

    #[test]
    fn markers_are_case_insensitive() {
        let cards = parse("begin:vcard\nFN:x\nend:VCard\n", VCardVersion::V40).unwrap();
        assert_eq!(records(&cards[0]), vec![("FN", "x")]);
    }

    #[test]
    fn multiple_cards_in_order() {
        let input = "preamble\nBEGIN:VCARD\nFN:A\nEND:VCARD\nbetween\nBEGIN:VCARD\nFN:B\nEND:VCARD\n";
        let cards = parse(input, VCardVersion::V40).unwrap();
        let names: Vec<Option<&str>> = cards.iter().map(|c| c.get("FN")).collect();
        assert_eq!(names, vec![Some("A"), Some("B")]);
    }

    #[test]
    fn unterminated_card_is_malformed() {
        let err = parse("BEGIN:VCARD\nFN:x\n", VCardVersion::V40).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::MalformedCard);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn nested_begin_is_malformed() {
        let err = parse("BEGIN:VCARD\nBEGIN:VCARD\nEND:VCARD\n", VCardVersion::V40).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::MalformedCard);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn line_without_colon_is_malformed() {
        let err = parse("BEGIN:VCARD\nFN:x\nGARBAGE\nEND:VCARD\n", VCardVersion::V40).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::MalformedCard);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn bare_tel_canonicalised_v21() {
        let cards = parse("BEGIN:VCARD\r\nTEL:555-1234\r\nEND:VCARD\r\n", VCardVersion::V21).unwrap();
        assert_eq!(records(&cards[0]), vec![("TEL;VOICE", "555-1234")]);
    }

    #[test]
    fn tel_qualifiers_canonicalised_v40() {
        let cards = parse(
            "BEGIN:VCARD\r\nTEL;CELL;PREF:555-1234\r\nEND:VCARD\r\n",
            VCardVersion::V40,
        )
        .unwrap();
        assert_eq!(
            records(&cards[0]),
            vec![("TEL;TYPE=\"cell\";PREF=1", "555-1234")]
        );
    }

    #[test]
    fn values_are_unescaped() {
        let input = concat!(
            "BEGIN:VCARD\n",
            r"NOTE:a\;b\,c\\d",
            "\nN:Doe;John;;;\nEND:VCARD\n"
        );
        let cards = parse(input, VCardVersion::V40).unwrap();
        assert_eq!(
            records(&cards[0]),
            vec![("NOTE", "a;b,c\\d"), ("N", "Doe;John;;;")]
        );
    }

    #[test]
    fn v21_charset_redecodes_value() {
        let input = b"BEGIN:VCARD\r\nVERSION:2.1\r\nEMAIL;CHARSET=ISO-8859-1;HOME:zo\xeb@example.com\r\nEND:VCARD\r\n";
        let cards = parse_bytes(input, VCardVersion::V21).unwrap();
        assert_eq!(records(&cards[0]), vec![("EMAIL;HOME", "zoë@example.com")]);
    }

    #[test]
    fn v21_unknown_charset() {
        let input = "BEGIN:VCARD\nFN;CHARSET=X-KLINGON:Worf\nEND:VCARD\n";
        let err = parse(input, VCardVersion::V21).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::UnknownCharset);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn v40_charset_param_stripped() {
        let input = "BEGIN:VCARD\nFN;CHARSET=X-KLINGON:Worf\nEND:VCARD\n";
        let cards = parse(input, VCardVersion::V40).unwrap();
        assert_eq!(records(&cards[0]), vec![("FN", "Worf")]);
    }

    #[test]
    fn version_line_is_consumed() {
        let input = "BEGIN:VCARD\nVERSION:3.0\nFN:x\nEND:VCARD\n";
        let cards = parse(input, VCardVersion::V40).unwrap();
        assert_eq!(records(&cards[0]), vec![("FN", "x")]);
    }

    #[test]
    fn folded_lines_are_joined() {
        let input = "BEGIN:VCARD\r\nNOTE:long\r\n  note\r\nEND:VCARD\r\n";
        let cards = parse(input, VCardVersion::V40).unwrap();
        assert_eq!(cards[0].get("NOTE"), Some("long note"));
    }
}
