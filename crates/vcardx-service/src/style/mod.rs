//! Styles translate between contacts and cards through a field mapping.

mod flat;
mod registry;

pub use flat::FlatStyle;
pub use registry::StyleRegistry;

use std::fmt::Debug;

use vcardx_rfc::rfc::vcard::Card;

use crate::contact::Contact;
use crate::mapping::FieldMapping;

/// A named export/import pair.
pub trait Style: Send + Sync + Debug {
    /// Registry key for this style.
    fn name(&self) -> &str;

    /// Folds contacts into cards of canonical records.
    fn export(&self, contacts: &[Contact], mapping: &FieldMapping) -> Vec<Card>;

    /// Maps parsed cards back into contacts.
    fn import(&self, cards: &[Card], mapping: &FieldMapping) -> Vec<Contact>;
}
