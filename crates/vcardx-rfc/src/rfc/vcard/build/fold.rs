//! Content line folding for 3.0 and 4.0 output.

/// Longest physical line, in octets, before the CRLF.
const MAX_LINE_OCTETS: usize = 75;

/// Folding break: CRLF followed by the single space a reader strips.
const FOLD: &str = "\r\n ";

/// Breaks a content line into physical lines of at most 75 octets.
///
/// Continuation lines start with one space, which counts toward their
/// length. A break never lands inside a multi-byte character, so a
/// segment may be a few octets short of the limit.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / (MAX_LINE_OCTETS - 1) * FOLD.len());
    let mut rest = line;
    let mut budget = MAX_LINE_OCTETS;

    while rest.len() > budget {
        let cut = floor_char_boundary(rest, budget);
        out.push_str(&rest[..cut]);
        out.push_str(FOLD);
        rest = &rest[cut..];
        budget = MAX_LINE_OCTETS - 1;
    }
    out.push_str(rest);
    out
}

/// Largest char boundary in `text` that is at most `max`, and above zero.
fn floor_char_boundary(text: &str, max: usize) -> usize {
    text.char_indices()
        .map(|(idx, c)| idx + c.len_utf8())
        .take_while(|&end| end <= max)
        .last()
        .unwrap_or_else(|| text.chars().next().map_or(0, char::len_utf8))
}
