//! vCard serialization.
//!
//! - Fold: content line folding at 75 octets
//! - Serializer: per-line, per-card and batch serialization

mod fold;
mod serializer;

pub use fold::fold_line;
pub use serializer::{serialize, serialize_card, serialize_line};
