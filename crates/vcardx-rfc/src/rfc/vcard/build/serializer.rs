//! vCard line and card serialization.

use super::fold::fold_line;
use crate::rfc::vcard::core::property::{
    BEGIN_MARKER, END_MARKER, QUALIFIER_SEPARATOR, VALUE_SEPARATOR,
};
use crate::rfc::vcard::core::{
    Card, Charset, CodecContext, VCardVersion, base_name, is_compound, is_structural, names,
};
use crate::rfc::vcard::error::{CodecError, CodecErrorKind, CodecResult};
use crate::rfc::vcard::escape::escape_value;
use crate::rfc::vcard::quoted_printable;

const CRLF: &str = "\r\n";

/// Serializes one property/value pair into a terminated, encoded line.
///
/// - 4.0: escapes `,` `;` `\` (no `;` for compound values), UTF-8.
/// - 3.0: escapes `,` `;` (no `;` for compound values), UTF-8.
/// - 2.1: escapes `;` (nothing for compound values), tags every
///   non-structural line with `;CHARSET=<name>` right after the property
///   name, encodes the value in the context's 2.1 charset. A value holding
///   a line break is also tagged `;ENCODING=QUOTED-PRINTABLE` and written
///   in that transfer encoding, so it stays on one physical line.
///
/// `suppress_value_separator` omits the colon; it is meant for marker lines
/// such as `BEGIN:VCARD` passed whole as the property.
///
/// ## Errors
/// Returns `InvalidInput` for an empty property name and
/// `UnmappableCharacter` when a 2.1 value (or any property name) cannot be
/// represented in its output charset.
pub fn serialize_line(
    property: &str,
    value: &str,
    ctx: &CodecContext,
    suppress_value_separator: bool,
) -> CodecResult<Vec<u8>> {
    if base_name(property).trim().is_empty() {
        return Err(CodecError::invalid_input("property name is empty"));
    }

    let escaped = escape_value(value, ctx.version, is_compound(property));

    match ctx.version {
        VCardVersion::V40 | VCardVersion::V30 => {
            let mut line = String::with_capacity(property.len() + escaped.len() + 3);
            line.push_str(property);
            if !suppress_value_separator {
                line.push(VALUE_SEPARATOR);
            }
            line.push_str(&escaped);
            if ctx.fold_lines {
                line = fold_line(&line);
            }
            line.push_str(CRLF);
            Ok(line.into_bytes())
        }
        VCardVersion::V21 => {
            let quoted = quoted_printable::needs_encoding(&escaped);
            let head = if is_structural(property) {
                property.to_string()
            } else {
                with_v21_params(property, ctx.v21_charset, quoted)
            };

            let mut bytes = encode(Charset::UsAscii, property, &head)?;
            if !suppress_value_separator {
                bytes.push(b':');
            }
            let value = encode(ctx.v21_charset, property, &escaped)?;
            if quoted {
                bytes.extend_from_slice(quoted_printable::encode(&value).as_bytes());
            } else {
                bytes.extend_from_slice(&value);
            }
            bytes.extend_from_slice(CRLF.as_bytes());
            Ok(bytes)
        }
    }
}

/// Inserts `;CHARSET=<name>`, and `;ENCODING=QUOTED-PRINTABLE` when
/// `quoted`, directly after the bare property name.
fn with_v21_params(property: &str, charset: Charset, quoted: bool) -> String {
    let name = base_name(property);
    let rest = &property[name.len()..];
    let mut head = format!("{name}{QUALIFIER_SEPARATOR}CHARSET={}", charset.name());
    if quoted {
        head.push(QUALIFIER_SEPARATOR);
        head.push_str("ENCODING=");
        head.push_str(quoted_printable::QUOTED_PRINTABLE);
    }
    head.push_str(rest);
    head
}

fn encode(charset: Charset, property: &str, text: &str) -> CodecResult<Vec<u8>> {
    charset.encode(text).map(|bytes| bytes.into_owned()).map_err(|c| {
        CodecError::new(
            CodecErrorKind::UnmappableCharacter,
            0,
            format!(
                "{property}: character {c:?} cannot be encoded as {}",
                charset.name()
            ),
        )
    })
}

/// Serializes one card: `BEGIN:VCARD`, `VERSION`, the records, `END:VCARD`.
///
/// Structural records carried by the card itself are skipped; the markers
/// are always generated from the context.
///
/// ## Errors
/// Propagates the first [`serialize_line`] error.
pub fn serialize_card(card: &Card, ctx: &CodecContext) -> CodecResult<Vec<u8>> {
    let mut out = serialize_line(BEGIN_MARKER, "", ctx, true)?;
    out.extend(serialize_line(
        names::VERSION,
        ctx.version.as_str(),
        ctx,
        false,
    )?);

    for record in card {
        if is_structural(&record.property) {
            tracing::warn!(property = %record.property, "Skipping structural record inside card");
            continue;
        }
        tracing::trace!(property = %record.property, "Serializing record");
        out.extend(serialize_line(&record.property, &record.value, ctx, false)?);
    }

    out.extend(serialize_line(END_MARKER, "", ctx, true)?);
    Ok(out)
}

/// Serializes a batch of cards in order.
///
/// ## Errors
/// Aborts on the first card that fails to serialize.
#[tracing::instrument(skip(cards, ctx), fields(count = cards.len(), version = %ctx.version))]
pub fn serialize(cards: &[Card], ctx: &CodecContext) -> CodecResult<Vec<u8>> {
    tracing::debug!("Serializing vCard batch");

    let mut out = Vec::new();
    for card in cards {
        out.extend(serialize_card(card, ctx)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(property: &str, value: &str, ctx: &CodecContext) -> String {
        String::from_utf8(serialize_line(property, value, ctx, false).unwrap()).unwrap()
    }

    #[test]
    fn compound_n_v40_keeps_semicolons() {
        let ctx = CodecContext::new(VCardVersion::V40);
        assert_eq!(line("N", "Doe;John;;;", &ctx), "N:Doe;John;;;\r\n");
    }

    #[test]
    fn note_v40_escapes_all() {
        let ctx = CodecContext::new(VCardVersion::V40);
        assert_eq!(
            line("NOTE", r"a;b,c\d", &ctx),
            concat!(r"NOTE:a\;b\,c\\d", "\r\n")
        );
    }

    #[test]
    fn note_v30_keeps_backslash() {
        let ctx = CodecContext::new(VCardVersion::V30);
        assert_eq!(
            line("NOTE", r"a;b,c\d", &ctx),
            concat!(r"NOTE:a\;b\,c\d", "\r\n")
        );
    }

    #[test]
    fn v21_inserts_charset_after_name() {
        let ctx = CodecContext::new(VCardVersion::V21);
        assert_eq!(
            line("EMAIL;HOME;PREF", "jane@example.com", &ctx),
            "EMAIL;CHARSET=US-ASCII;HOME;PREF:jane@example.com\r\n"
        );
        assert_eq!(
            line("NOTE", "a;b,c", &ctx),
            concat!(r"NOTE;CHARSET=US-ASCII:a\;b,c", "\r\n")
        );
    }

    #[test]
    fn v21_structural_lines_have_no_charset() {
        let ctx = CodecContext::new(VCardVersion::V21);
        assert_eq!(line("VERSION", "2.1", &ctx), "VERSION:2.1\r\n");
        let begin = serialize_line(BEGIN_MARKER, "", &ctx, true).unwrap();
        assert_eq!(begin, b"BEGIN:VCARD\r\n");
    }

    #[test]
    fn v21_encodes_value_in_configured_charset() {
        let ctx = CodecContext::new(VCardVersion::V21).with_v21_charset(Charset::Iso8859_1);
        let bytes = serialize_line("FN", "Zoë", &ctx, false).unwrap();
        assert_eq!(bytes, b"FN;CHARSET=ISO-8859-1:Zo\xeb\r\n");
    }

    #[test]
    fn v21_line_break_stays_on_one_line() {
        let ctx = CodecContext::new(VCardVersion::V21);
        assert_eq!(
            line("NOTE", "hello\nTEL:999", &ctx),
            "NOTE;CHARSET=US-ASCII;ENCODING=QUOTED-PRINTABLE:hello=0ATEL:999\r\n"
        );
        assert_eq!(
            line("ADR;HOME", "a\r\nb", &ctx),
            "ADR;CHARSET=US-ASCII;ENCODING=QUOTED-PRINTABLE;HOME:a=0D=0Ab\r\n"
        );
    }

    #[test]
    fn v21_line_break_encoded_after_charset() {
        let ctx = CodecContext::new(VCardVersion::V21).with_v21_charset(Charset::Iso8859_1);
        let bytes = serialize_line("NOTE", "Zoë\nx=1", &ctx, false).unwrap();
        assert_eq!(
            bytes,
            b"NOTE;CHARSET=ISO-8859-1;ENCODING=QUOTED-PRINTABLE:Zo=EB=0Ax=3D1\r\n"
        );
    }

    #[test]
    fn v21_unmappable_value() {
        let ctx = CodecContext::new(VCardVersion::V21);
        let err = serialize_line("FN", "Zoë", &ctx, false).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::UnmappableCharacter);
    }

    #[test]
    fn empty_property_is_invalid() {
        let ctx = CodecContext::new(VCardVersion::V40);
        let err = serialize_line("", "value", &ctx, false).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::InvalidInput);
    }

    #[test]
    fn empty_value_is_valid() {
        let ctx = CodecContext::new(VCardVersion::V40);
        assert_eq!(line("NOTE", "", &ctx), "NOTE:\r\n");
    }

    #[test]
    fn folding_is_opt_in() {
        let value = "x".repeat(100);
        let plain = CodecContext::new(VCardVersion::V40);
        assert!(!line("NOTE", &value, &plain).contains("\r\n "));

        let folded = plain.with_folding(true);
        assert!(line("NOTE", &value, &folded).contains("\r\n "));
    }

    #[test]
    fn card_layout() {
        let mut card = Card::new();
        card.push("FN", "Jane Doe");
        card.push("TEL;TYPE=\"cell\"", "555-1234");

        let ctx = CodecContext::new(VCardVersion::V40);
        let out = String::from_utf8(serialize_card(&card, &ctx).unwrap()).unwrap();
        assert_eq!(
            out,
            "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:Jane Doe\r\nTEL;TYPE=\"cell\":555-1234\r\nEND:VCARD\r\n"
        );
    }

    #[test]
    fn card_skips_structural_records() {
        let mut card = Card::new();
        card.push("VERSION", "3.0");
        card.push("FN", "Jane");

        let ctx = CodecContext::new(VCardVersion::V40);
        let out = String::from_utf8(serialize_card(&card, &ctx).unwrap()).unwrap();
        assert_eq!(out.matches("VERSION").count(), 1);
        assert!(out.contains("VERSION:4.0"));
    }
}
