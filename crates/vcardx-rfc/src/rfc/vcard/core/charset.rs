//! Charset table for vCard 2.1 `CHARSET` parameters.
//!
//! vCard 3.0 and 4.0 fix the text encoding (UTF-8), so the table is only
//! consulted when the active version is 2.1. Names are matched
//! case-insensitively but written back in their registered spelling.

use std::borrow::Cow;

use encoding_rs::Encoding;

/// Internal text-encoding identifier for a registered charset name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    UsAscii,
    Utf8,
    Iso8859_1,
    Iso8859_2,
    Iso8859_5,
    Iso8859_7,
    Iso8859_15,
    Windows1252,
    Koi8R,
    Big5,
    EucJp,
    EucKr,
    Gb2312,
    Iso2022Jp,
    ShiftJis,
}

/// Registered charset names and their internal identifiers.
pub const CHARSET_TABLE: [(&str, Charset); 15] = [
    ("US-ASCII", Charset::UsAscii),
    ("UTF-8", Charset::Utf8),
    ("ISO-8859-1", Charset::Iso8859_1),
    ("ISO-8859-2", Charset::Iso8859_2),
    ("ISO-8859-5", Charset::Iso8859_5),
    ("ISO-8859-7", Charset::Iso8859_7),
    ("ISO-8859-15", Charset::Iso8859_15),
    ("windows-1252", Charset::Windows1252),
    ("KOI8-R", Charset::Koi8R),
    ("Big5", Charset::Big5),
    ("EUC-JP", Charset::EucJp),
    ("EUC-KR", Charset::EucKr),
    ("GB2312", Charset::Gb2312),
    ("ISO-2022-JP", Charset::Iso2022Jp),
    ("Shift_JIS", Charset::ShiftJis),
];

/// Result of decoding bytes through a charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub text: Cow<'a, str>,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

impl Charset {
    /// Looks up a registered charset by name (case-insensitive).
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        CHARSET_TABLE
            .iter()
            .find(|(registered, _)| registered.eq_ignore_ascii_case(name))
            .map(|&(_, charset)| charset)
    }

    /// Returns the registered name written into `CHARSET=` parameters.
    #[must_use]
    pub fn name(self) -> &'static str {
        CHARSET_TABLE
            .iter()
            .find(|&&(_, charset)| charset == self)
            .map_or("US-ASCII", |&(name, _)| name)
    }

    /// Backing `encoding_rs` encoding; `None` for US-ASCII and ISO-8859-1.
    ///
    /// encoding_rs follows WHATWG, where the Latin-1 label resolves to
    /// windows-1252, so both single-byte identity charsets are handled here.
    fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Self::UsAscii | Self::Iso8859_1 => None,
            Self::Utf8 => Some(encoding_rs::UTF_8),
            Self::Windows1252 => Some(encoding_rs::WINDOWS_1252),
            Self::Iso8859_2 => Some(encoding_rs::ISO_8859_2),
            Self::Iso8859_5 => Some(encoding_rs::ISO_8859_5),
            Self::Iso8859_7 => Some(encoding_rs::ISO_8859_7),
            Self::Iso8859_15 => Some(encoding_rs::ISO_8859_15),
            Self::Koi8R => Some(encoding_rs::KOI8_R),
            Self::Big5 => Some(encoding_rs::BIG5),
            Self::EucJp => Some(encoding_rs::EUC_JP),
            Self::EucKr => Some(encoding_rs::EUC_KR),
            Self::Gb2312 => Some(encoding_rs::GBK),
            Self::Iso2022Jp => Some(encoding_rs::ISO_2022_JP),
            Self::ShiftJis => Some(encoding_rs::SHIFT_JIS),
        }
    }

    /// Highest code point of an identity-mapped charset, if this is one.
    const fn identity_limit(self) -> Option<u32> {
        match self {
            Self::UsAscii => Some(0x7F),
            Self::Iso8859_1 => Some(0xFF),
            _ => None,
        }
    }

    /// Encodes text into this charset.
    ///
    /// ## Errors
    /// Returns the first character that the charset cannot represent.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, char> {
        if let Some(limit) = self.identity_limit() {
            if let Some(c) = text.chars().find(|&c| u32::from(c) > limit) {
                return Err(c);
            }
            if text.is_ascii() {
                return Ok(Cow::Borrowed(text.as_bytes()));
            }
            // Every char is at most U+00FF here.
            return Ok(Cow::Owned(
                text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect(),
            ));
        }

        let encoding = self.encoding().unwrap_or(encoding_rs::UTF_8);
        let (bytes, _, had_unmappable) = encoding.encode(text);
        if had_unmappable {
            let mut buf = [0u8; 4];
            let offending = text
                .chars()
                .find(|c| encoding.encode(c.encode_utf8(&mut buf)).2)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(offending);
        }
        Ok(bytes)
    }

    /// Decodes bytes from this charset, replacing malformed sequences.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Decoded<'_> {
        if bytes.is_ascii() && self.identity_limit().is_some() {
            // ASCII bytes are valid UTF-8.
            let text = std::str::from_utf8(bytes)
                .map_or_else(|_| String::from_utf8_lossy(bytes), Cow::Borrowed);
            return Decoded {
                text,
                had_errors: false,
            };
        }

        match self {
            Self::Iso8859_1 => Decoded {
                text: Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
                had_errors: false,
            },
            Self::UsAscii => {
                let text: String = bytes
                    .iter()
                    .map(|&b| {
                        if b.is_ascii() {
                            char::from(b)
                        } else {
                            char::REPLACEMENT_CHARACTER
                        }
                    })
                    .collect();
                Decoded {
                    text: Cow::Owned(text),
                    had_errors: true,
                }
            }
            _ => {
                let encoding = self.encoding().unwrap_or(encoding_rs::UTF_8);
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                Decoded { text, had_errors }
            }
        }
    }
}
