//! Quoted-printable value encoding (RFC 2045) as used by vCard 2.1.
//!
//! 2.1 has no `\n` escape, so a value with embedded line breaks is written
//! with `ENCODING=QUOTED-PRINTABLE`. Output never contains soft line breaks;
//! the lexer joins them on input.

use std::fmt::Write as _;

/// Parameter value naming this encoding.
pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";

const HEX_DECODE: [i8; 256] = {
    let mut t = [-1i8; 256];
    let mut i = 0u8;
    while i < 10 {
        t[(b'0' + i) as usize] = i as i8;
        i += 1;
    }
    let mut i = 0u8;
    while i < 6 {
        t[(b'A' + i) as usize] = (10 + i) as i8;
        t[(b'a' + i) as usize] = (10 + i) as i8;
        i += 1;
    }
    t
};

/// Whether a value must be quoted-printable encoded to stay on one line.
#[must_use]
pub fn needs_encoding(value: &str) -> bool {
    value.contains(['\r', '\n'])
}

/// Encodes bytes, leaving printable ASCII other than `=` literal.
///
/// A trailing space or tab is encoded so transports cannot strip it.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (idx, &b) in bytes.iter().enumerate() {
        let last = idx + 1 == bytes.len();
        let literal = match b {
            b'=' => false,
            b' ' | b'\t' => !last,
            0x21..=0x7E => true,
            _ => false,
        };
        if literal {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "={b:02X}");
        }
    }
    out
}

/// Decodes `=XX` sequences. Soft line breaks are dropped; a malformed `=`
/// is kept literally.
#[must_use]
pub fn decode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;

    while pos < src.len() {
        let b = src[pos];
        if b != b'=' {
            out.push(b);
            pos += 1;
            continue;
        }

        match src.get(pos + 1..pos + 3) {
            Some(&[hi, lo]) if HEX_DECODE[usize::from(hi)] >= 0 && HEX_DECODE[usize::from(lo)] >= 0 => {
                let hi = HEX_DECODE[usize::from(hi)].unsigned_abs();
                let lo = HEX_DECODE[usize::from(lo)].unsigned_abs();
                out.push((hi << 4) | lo);
                pos += 3;
            }
            Some(&[b'\r', b'\n']) => pos += 3,
            _ if src.get(pos + 1) == Some(&b'\n') => pos += 2,
            _ => {
                out.push(b);
                pos += 1;
            }
        }
    }

    out
}
