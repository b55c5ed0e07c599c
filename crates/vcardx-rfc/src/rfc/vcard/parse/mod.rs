//! vCard parsing.
//!
//! ## Usage
//!
//! ```rust
//! use vcardx_rfc::rfc::vcard::{VCardVersion, parse};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! TEL;CELL:555-1234\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse(input, VCardVersion::V40).unwrap();
//! assert_eq!(cards[0].get("FN"), Some("John Doe"));
//! assert_eq!(cards[0].get("TEL;TYPE=\"cell\""), Some("555-1234"));
//! ```
//!
//! ## Features
//!
//! - Supports vCard 2.1, 3.0 and 4.0
//! - Handles line folding/unfolding and CRLF or bare LF endings
//! - Decodes 2.1 values through their `CHARSET` parameter and
//!   quoted-printable transfer encoding
//! - Canonicalizes `EMAIL`/`TEL` qualifiers per version

mod lexer;
mod parser;

pub use lexer::{
    LogicalLine, is_marker, logical_lines, split_content_line, take_charset_param,
    take_quoted_printable,
};
pub use parser::{parse, parse_bytes};
