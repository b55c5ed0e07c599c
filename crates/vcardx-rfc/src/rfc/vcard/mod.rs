//! vCard codec (vCard 2.1, RFC 2426, RFC 6350).
//!
//! ## Overview
//!
//! Cards are ordered sequences of property/value [`Record`]s. The codec
//! converts them to and from text under one of three [`VCardVersion`]s,
//! each with its own escaping, line-ending, charset and qualifier rules.
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use vcardx_rfc::rfc::vcard::{VCardVersion, parse};
//!
//! let input = "BEGIN:VCARD\r\nVERSION:2.1\r\nTEL:555-1234\r\nEND:VCARD\r\n";
//!
//! let cards = parse(input, VCardVersion::V21).unwrap();
//! assert_eq!(cards[0].get("TEL;VOICE"), Some("555-1234"));
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use vcardx_rfc::rfc::vcard::{Card, CodecContext, VCardVersion, serialize};
//!
//! let mut card = Card::new();
//! card.push("FN", "Jane Doe");
//! card.push("N", "Doe;Jane;;;");
//!
//! let ctx = CodecContext::new(VCardVersion::V40);
//! let output = String::from_utf8(serialize(&[card], &ctx).unwrap()).unwrap();
//! assert!(output.contains("N:Doe;Jane;;;\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`Card`, `Record`, `VCardVersion`, `Charset`, ...)
//!   and the qualifier canonicalizer
//! - [`escape`] - Value escaping rules
//! - [`parse`] - Parsing functions
//! - [`build`] - Serialization functions
//! - [`quoted_printable`] - 2.1 value transfer encoding

pub mod build;
pub mod core;
pub mod error;
pub mod escape;
pub mod parse;
pub mod quoted_printable;

// Re-export commonly used types
pub use build::{serialize, serialize_card, serialize_line};
pub use self::core::{Card, Charset, CodecContext, Record, VCardVersion, canonicalise};
pub use error::{CodecError, CodecErrorKind, CodecResult};
pub use parse::{parse, parse_bytes};
