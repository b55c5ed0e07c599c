//! Core vCard codec types.

mod card;
mod charset;
mod context;
pub mod property;
mod qualifier;
mod version;

pub use card::{Card, Record};
pub use charset::{CHARSET_TABLE, Charset, Decoded};
pub use context::CodecContext;
pub use property::{base_name, is_compound, is_structural, names};
pub use qualifier::{Qualifier, canonicalise, qualified_name};
pub use version::VCardVersion;
