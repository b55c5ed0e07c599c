//! Transcoding orchestration: session state, field mappings and styles.
//!
//! A [`transcoder::Transcoder`] validates one (style, language, version)
//! session against a [`mapping::MappingTable`] and drives contacts through
//! a [`style::Style`] and the vCard codec.

pub mod contact;
pub mod error;
pub mod mapping;
pub mod session;
pub mod style;
pub mod transcoder;
