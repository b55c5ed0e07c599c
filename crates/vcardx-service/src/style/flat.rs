use vcardx_rfc::rfc::vcard::core::names;
use vcardx_rfc::rfc::vcard::Card;

use super::Style;
use crate::contact::Contact;
use crate::mapping::{FLAT_STYLE, FieldMapping};

/// One contact per card: `FN` carries the display name, every other field
/// maps one-to-one onto a property.
#[derive(Debug, Clone, Copy)]
pub struct FlatStyle {
    include_unmapped: bool,
}

impl FlatStyle {
    #[must_use]
    pub const fn new(include_unmapped: bool) -> Self {
        Self { include_unmapped }
    }

    fn export_contact(contact: &Contact, mapping: &FieldMapping) -> Card {
        let mut card = Card::new();
        card.push(names::FN, contact.name.clone());

        for field in &contact.fields {
            match mapping.property_for(&field.name) {
                Some(property) => card.push(property, field.value.clone()),
                None => tracing::trace!(field = %field.name, "Skipping unmapped field"),
            }
        }
        card
    }

    fn import_card(&self, card: &Card, mapping: &FieldMapping) -> Contact {
        let mut contact = Contact::default();
        let mut named = false;

        for record in card {
            if !named && record.property.eq_ignore_ascii_case(names::FN) {
                contact.name.clone_from(&record.value);
                named = true;
                continue;
            }

            if let Some(field) = mapping.field_for(&record.property) {
                contact.push(field, record.value.clone());
            } else if self.include_unmapped {
                contact.push(record.property.clone(), record.value.clone());
            } else {
                tracing::trace!(property = %record.property, "Dropping unmapped property");
            }
        }
        contact
    }
}

impl Default for FlatStyle {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Style for FlatStyle {
    fn name(&self) -> &str {
        FLAT_STYLE
    }

    fn export(&self, contacts: &[Contact], mapping: &FieldMapping) -> Vec<Card> {
        contacts
            .iter()
            .map(|contact| Self::export_contact(contact, mapping))
            .collect()
    }

    fn import(&self, cards: &[Card], mapping: &FieldMapping) -> Vec<Contact> {
        cards
            .iter()
            .map(|card| self.import_card(card, mapping))
            .collect()
    }
}
