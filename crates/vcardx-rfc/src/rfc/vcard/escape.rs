//! Value escaping and unescaping.
//!
//! | Version | Simple value  | Compound value (`ADR`, `N`) |
//! |---------|---------------|-----------------------------|
//! | 2.1     | `;`           | none                        |
//! | 3.0     | `,` `;`       | `,`                         |
//! | 4.0     | `,` `;` `\`   | `,` `\`                     |
//!
//! Semicolons in compound values separate positional sub-fields and are
//! never escaped or stripped.

use super::core::VCardVersion;

const BACKSLASH: char = '\\';

/// Returns the characters escaped in a value for the given version.
#[must_use]
pub const fn reserved_chars(version: VCardVersion, compound: bool) -> &'static [char] {
    match (version, compound) {
        (VCardVersion::V40, false) => &['\\', ',', ';'],
        (VCardVersion::V40, true) => &['\\', ','],
        (VCardVersion::V30, false) => &[',', ';'],
        (VCardVersion::V30, true) => &[','],
        (VCardVersion::V21, false) => &[';'],
        (VCardVersion::V21, true) => &[],
    }
}

/// Prefixes every character of `value` found in `reserved` with a backslash.
///
/// Each source character is visited once, so a backslash introduced by
/// escaping is never escaped again.
#[must_use]
pub fn escape(value: &str, reserved: &[char]) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        if reserved.contains(&c) {
            result.push(BACKSLASH);
        }
        result.push(c);
    }
    result
}

/// Inverse of [`escape`] for the same reserved set.
///
/// A backslash not followed by a reserved character is kept literally.
#[must_use]
pub fn unescape(value: &str, reserved: &[char]) -> String {
    unescape_inner(value, reserved, false)
}

/// Escapes a property value for the given version.
///
/// 3.0 and 4.0 additionally write embedded line breaks as `\n`. A 3.0
/// backslash stays bare unless the character after it would turn it into
/// an escape sequence, in which case it is written as `\\`.
#[must_use]
pub fn escape_value(value: &str, version: VCardVersion, compound: bool) -> String {
    let reserved = reserved_chars(version, compound);
    if version == VCardVersion::V21 {
        return escape(value, reserved);
    }

    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            BACKSLASH if !reserved.contains(&BACKSLASH) => {
                if chars
                    .peek()
                    .is_some_and(|&next| starts_escape(next, reserved))
                {
                    result.push(BACKSLASH);
                }
                result.push(BACKSLASH);
            }
            c if reserved.contains(&c) => {
                result.push(BACKSLASH);
                result.push(c);
            }
            c => result.push(c),
        }
    }
    result
}

/// Whether a bare backslash followed by `next` would read back as an escape.
fn starts_escape(next: char, reserved: &[char]) -> bool {
    matches!(next, BACKSLASH | 'n' | 'N' | '\r' | '\n') || reserved.contains(&next)
}

/// Unescapes a property value for the given version.
#[must_use]
pub fn unescape_value(value: &str, version: VCardVersion, compound: bool) -> String {
    unescape_inner(
        value,
        reserved_chars(version, compound),
        version != VCardVersion::V21,
    )
}

fn unescape_inner(value: &str, reserved: &[char], newlines: bool) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != BACKSLASH {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if reserved.contains(&next) => {
                chars.next();
                result.push(next);
            }
            Some('n' | 'N') if newlines => {
                chars.next();
                result.push('\n');
            }
            Some(&BACKSLASH) if newlines => {
                chars.next();
                result.push(BACKSLASH);
            }
            _ => result.push(c),
        }
    }

    result
}
