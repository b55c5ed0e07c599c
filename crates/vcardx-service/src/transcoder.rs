//! Drives contacts through a style and the card codec.

use vcardx_rfc::rfc::vcard::{Card, CodecContext, parse_bytes, serialize};

use crate::contact::Contact;
use crate::error::ServiceResult;
use crate::mapping::{FieldMapping, MappingTable};
use crate::session::Session;
use crate::style::{Style, StyleRegistry};

/// A validated session bound to its style, field mapping and codec context.
///
/// Construct one per operation. It borrows the registry and table and holds
/// no mutable state, so independent transcoders may run concurrently.
#[derive(Debug)]
pub struct Transcoder<'a> {
    style: &'a dyn Style,
    mapping: &'a FieldMapping,
    session: Session,
    ctx: CodecContext,
}

impl<'a> Transcoder<'a> {
    /// ## Summary
    /// Validates `session` against the registry and table.
    ///
    /// The codec context's version is overridden by the session's version.
    ///
    /// ## Errors
    /// Returns `UnknownStyle`, `UnknownLanguage` or `UnknownVersion`.
    #[tracing::instrument(skip(registry, table, ctx), fields(style = %session.style, language = %session.language, version = %session.version))]
    pub fn new(
        registry: &'a StyleRegistry,
        table: &'a MappingTable,
        session: Session,
        ctx: CodecContext,
    ) -> ServiceResult<Self> {
        let style = registry.get(&session.style)?;
        let mapping = session.resolve(table)?;
        let ctx = CodecContext {
            version: session.version,
            ..ctx
        };

        tracing::debug!("Session validated");
        Ok(Self {
            style,
            mapping,
            session,
            ctx,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn context(&self) -> &CodecContext {
        &self.ctx
    }

    /// Folds contacts into cards without serializing them.
    #[must_use]
    pub fn export_cards(&self, contacts: &[Contact]) -> Vec<Card> {
        self.style.export(contacts, self.mapping)
    }

    /// Maps already-parsed cards into contacts.
    #[must_use]
    pub fn import_cards(&self, cards: &[Card]) -> Vec<Contact> {
        self.style.import(cards, self.mapping)
    }

    /// ## Summary
    /// Serializes contacts into vCard bytes.
    ///
    /// ## Errors
    /// Returns the first codec error; no partial output is produced.
    #[tracing::instrument(skip_all, fields(contacts = contacts.len()))]
    pub fn export(&self, contacts: &[Contact]) -> ServiceResult<Vec<u8>> {
        let cards = self.export_cards(contacts);
        let bytes = serialize(&cards, &self.ctx)?;
        tracing::debug!(cards = cards.len(), bytes = bytes.len(), "Exported contacts");
        Ok(bytes)
    }

    /// ## Summary
    /// Parses vCard bytes into contacts.
    ///
    /// ## Errors
    /// Returns the first codec error; no partial output is produced.
    #[tracing::instrument(skip_all, fields(input_len = input.len()))]
    pub fn import(&self, input: &[u8]) -> ServiceResult<Vec<Contact>> {
        let cards = parse_bytes(input, self.session.version)?;
        let contacts = self.import_cards(&cards);
        tracing::debug!(contacts = contacts.len(), "Imported contacts");
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use vcardx_rfc::rfc::vcard::{CodecErrorKind, VCardVersion};

    use super::*;
    use crate::error::ServiceError;
    use crate::mapping::{DEFAULT_LANGUAGE, FLAT_STYLE};

    fn session(version: VCardVersion) -> Session {
        Session::new(FLAT_STYLE, DEFAULT_LANGUAGE, version)
    }

    #[test_log::test]
    fn session_version_overrides_context() {
        let registry = StyleRegistry::with_builtin(true);
        let table = MappingTable::builtin();
        let transcoder = Transcoder::new(
            &registry,
            &table,
            session(VCardVersion::V30),
            CodecContext::new(VCardVersion::V40).with_folding(true),
        )
        .unwrap();

        assert_eq!(transcoder.context().version, VCardVersion::V30);
        assert!(transcoder.context().fold_lines);
    }

    #[test]
    fn unknown_style_is_rejected() {
        let registry = StyleRegistry::with_builtin(true);
        let table = MappingTable::builtin();
        let err = Transcoder::new(
            &registry,
            &table,
            Session::new("tree", DEFAULT_LANGUAGE, VCardVersion::V40),
            CodecContext::new(VCardVersion::V40),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownStyle(_)));
    }

    #[test_log::test]
    fn export_writes_card_markers() {
        let registry = StyleRegistry::with_builtin(true);
        let table = MappingTable::builtin();
        let transcoder = Transcoder::new(
            &registry,
            &table,
            session(VCardVersion::V40),
            CodecContext::new(VCardVersion::V40),
        )
        .unwrap();

        let contacts = [Contact::new("Jane").with_field("CELL_PREF", "555-1234")];
        let bytes = transcoder.export(&contacts).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            concat!(
                "BEGIN:VCARD\r\n",
                "VERSION:4.0\r\n",
                "FN:Jane\r\n",
                "TEL;TYPE=\"cell\";PREF=1:555-1234\r\n",
                "END:VCARD\r\n",
            )
        );
    }

    #[test_log::test]
    fn import_aborts_on_first_error() {
        let registry = StyleRegistry::with_builtin(true);
        let table = MappingTable::builtin();
        let transcoder = Transcoder::new(
            &registry,
            &table,
            session(VCardVersion::V21),
            CodecContext::new(VCardVersion::V21),
        )
        .unwrap();

        let input = b"BEGIN:VCARD\r\nFN:Ok\r\nEND:VCARD\r\nBEGIN:VCARD\r\nNOTE;CHARSET=X-KLINGON:x\r\nEND:VCARD\r\n";
        let err = transcoder.import(input).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::CodecError(ref e) if e.kind == CodecErrorKind::UnknownCharset
        ));
    }
}
