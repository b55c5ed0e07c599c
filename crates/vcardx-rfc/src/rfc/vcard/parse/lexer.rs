//! vCard lexer: line unfolding and content line splitting.
//!
//! Works on raw bytes so that 2.1 values can be decoded per line through
//! their own `CHARSET` parameter. Every delimiter the lexer looks for is
//! ASCII, and the value part of a line is never scanned.

use crate::rfc::vcard::core::property::QUALIFIER_SEPARATOR;
use crate::rfc::vcard::quoted_printable::QUOTED_PRINTABLE;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An unfolded logical line and the 1-based number of its first physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub number: usize,
    pub bytes: Vec<u8>,
}

impl LogicalLine {
    /// Whether the line is a quoted-printable value ending in a soft break.
    fn has_soft_break(&self) -> bool {
        self.bytes.last() == Some(&b'=')
            && split_content_line(&self.bytes).is_some_and(|(property, _)| {
                property
                    .windows(QUOTED_PRINTABLE.len())
                    .any(|w| w.eq_ignore_ascii_case(QUOTED_PRINTABLE.as_bytes()))
            })
    }
}

/// Splits input into logical lines.
///
/// Accepts CRLF and bare LF terminators. A physical line starting with a
/// space or tab continues the previous logical line (the whitespace
/// character is removed). A quoted-printable line ending in `=` continues
/// on the next physical line (the `=` is removed). Empty lines are dropped.
#[must_use]
pub fn logical_lines(input: &[u8]) -> Vec<LogicalLine> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let mut lines: Vec<LogicalLine> = Vec::new();

    for (idx, physical) in input.split(|&b| b == b'\n').enumerate() {
        let physical = physical.strip_suffix(b"\r").unwrap_or(physical);
        if physical.is_empty() {
            continue;
        }

        if let Some(prev) = lines.last_mut()
            && prev.has_soft_break()
        {
            prev.bytes.pop();
            prev.bytes.extend_from_slice(physical);
            continue;
        }

        if let Some((&(b' ' | b'\t'), continuation)) = physical.split_first()
            && let Some(prev) = lines.last_mut()
        {
            prev.bytes.extend_from_slice(continuation);
            continue;
        }

        lines.push(LogicalLine {
            number: idx + 1,
            bytes: physical.to_vec(),
        });
    }

    lines
}

/// Splits a content line at the first colon that is neither escaped nor
/// inside a quoted parameter value.
#[must_use]
pub fn split_content_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = find_value_separator(line)?;
    Some((&line[..pos], &line[pos + 1..]))
}

fn find_value_separator(line: &[u8]) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, &b) in line.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Returns whether a logical line is the given marker (case-insensitive,
/// surrounding whitespace ignored).
#[must_use]
pub fn is_marker(line: &[u8], marker: &str) -> bool {
    line.trim_ascii().eq_ignore_ascii_case(marker.as_bytes())
}

/// Removes a `CHARSET=<name>` parameter from a raw property name.
///
/// Returns the remaining property and the charset name, if present.
#[must_use]
pub fn take_charset_param(property: &str) -> (String, Option<String>) {
    let (kept, removed) = take_segment(property, |segment| {
        segment
            .split_once('=')
            .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("CHARSET"))
    });
    let charset = removed
        .and_then(|segment| segment.split_once('='))
        .map(|(_, value)| value.trim().trim_matches('"').to_string());
    (kept, charset)
}

/// Removes a 2.1 quoted-printable marker, either `ENCODING=QUOTED-PRINTABLE`
/// or the bare `QUOTED-PRINTABLE` token.
///
/// Returns the remaining property and whether the marker was present.
#[must_use]
pub fn take_quoted_printable(property: &str) -> (String, bool) {
    let (kept, removed) = take_segment(property, |segment| {
        let value = match segment.split_once('=') {
            Some((name, value)) if name.trim().eq_ignore_ascii_case("ENCODING") => value,
            Some(_) => return false,
            None => segment,
        };
        value.trim().eq_ignore_ascii_case(QUOTED_PRINTABLE)
    });
    (kept, removed.is_some())
}

/// Drops the first parameter segment (never the name) matching `is_target`.
fn take_segment<'a>(
    property: &'a str,
    is_target: impl Fn(&str) -> bool,
) -> (String, Option<&'a str>) {
    let mut removed = None;
    let mut kept: Vec<&str> = Vec::new();

    for (idx, segment) in property.split(QUALIFIER_SEPARATOR).enumerate() {
        if idx > 0 && removed.is_none() && is_target(segment) {
            removed = Some(segment);
            continue;
        }
        kept.push(segment);
    }

    let separator = QUALIFIER_SEPARATOR.to_string();
    (kept.join(&separator), removed)
}
