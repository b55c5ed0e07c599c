//! Field mappings keyed by style, language and version.
//!
//! The table is data: hosts may deserialize their own from any serde
//! format. [`MappingTable::builtin`] supplies the `flat` style in English.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vcardx_rfc::rfc::vcard::core::{Qualifier, base_name, names, qualified_name};
use vcardx_rfc::rfc::vcard::{VCardVersion, canonicalise};

use crate::error::{ServiceError, ServiceResult};

/// Name of the built-in flat style.
pub const FLAT_STYLE: &str = "flat";

/// Language of the built-in mapping.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Ordered (field name, canonical property) pairs for one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: Vec<(String, String)>,
}

impl FieldMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field-to-property entry.
    pub fn insert(&mut self, field: impl Into<String>, property: impl Into<String>) {
        self.entries.push((field.into(), property.into()));
    }

    /// Returns the canonical property for a field name.
    #[must_use]
    pub fn property_for(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f.eq_ignore_ascii_case(field))
            .map(|(_, p)| p.as_str())
    }

    /// Returns the field name for a canonical property.
    ///
    /// An exact (case-insensitive) match wins. Failing that, parameter
    /// quoting is ignored, so 4.0 `ADR;TYPE=home` finds `ADR;TYPE="home"`.
    #[must_use]
    pub fn field_for(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| p.eq_ignore_ascii_case(property))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(_, p)| eq_unquoted(p, property))
            })
            .map(|(f, _)| f.as_str())
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, p)| (f.as_str(), p.as_str()))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Three-level lookup: style → language → version → field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    styles: BTreeMap<String, BTreeMap<String, BTreeMap<VCardVersion, FieldMapping>>>,
}

impl MappingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mapping for a style/language/version triple.
    pub fn insert(
        &mut self,
        style: impl Into<String>,
        language: impl Into<String>,
        version: VCardVersion,
        mapping: FieldMapping,
    ) {
        self.styles
            .entry(style.into())
            .or_default()
            .entry(language.into())
            .or_default()
            .insert(version, mapping);
    }

    /// Resolves the mapping for a session triple.
    ///
    /// ## Errors
    /// Returns `UnknownStyle`, `UnknownLanguage` or `UnknownVersion` for the
    /// first level that is missing.
    pub fn lookup(
        &self,
        style: &str,
        language: &str,
        version: VCardVersion,
    ) -> ServiceResult<&FieldMapping> {
        let languages = self
            .styles
            .get(style)
            .ok_or_else(|| ServiceError::UnknownStyle(style.to_string()))?;
        let versions = languages
            .get(language)
            .ok_or_else(|| ServiceError::UnknownLanguage {
                style: style.to_string(),
                language: language.to_string(),
            })?;
        versions
            .get(&version)
            .ok_or_else(|| ServiceError::UnknownVersion {
                style: style.to_string(),
                language: language.to_string(),
                version: version.to_string(),
            })
    }

    /// Returns the style names present in the table.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Returns the built-in table: the flat style in English, all versions.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for version in VCardVersion::ALL {
            let mut mapping = FieldMapping::new();
            for (field, raw) in FLAT_EN_FIELDS {
                mapping.insert(field, version_form(raw, version));
            }
            table.insert(FLAT_STYLE, DEFAULT_LANGUAGE, version, mapping);
        }
        table
    }
}

/// Flat style fields, written once in informal qualifier form.
const FLAT_EN_FIELDS: [(&str, &str); 28] = [
    ("NAME", "N"),
    ("NICKNAME", "NICKNAME"),
    ("BIRTHDAY", "BDAY"),
    ("ADDRESS", "ADR"),
    ("ADDRESS_HOME", "ADR;HOME"),
    ("ADDRESS_WORK", "ADR;WORK"),
    ("EMAIL", "EMAIL"),
    ("EMAIL_PREF", "EMAIL;PREF"),
    ("EMAIL_HOME", "EMAIL;HOME"),
    ("EMAIL_HOME_PREF", "EMAIL;HOME;PREF"),
    ("EMAIL_WORK", "EMAIL;WORK"),
    ("EMAIL_WORK_PREF", "EMAIL;WORK;PREF"),
    ("PHONE", "TEL"),
    ("PHONE_PREF", "TEL;PREF"),
    ("PHONE_HOME", "TEL;HOME"),
    ("PHONE_WORK", "TEL;WORK"),
    ("CELL", "TEL;CELL"),
    ("CELL_PREF", "TEL;CELL;PREF"),
    ("CELL_HOME", "TEL;CELL;HOME"),
    ("CELL_WORK", "TEL;CELL;WORK"),
    ("FAX", "TEL;FAX"),
    ("FAX_HOME", "TEL;FAX;HOME"),
    ("FAX_WORK", "TEL;FAX;WORK"),
    ("ORG", "ORG"),
    ("TITLE", "TITLE"),
    ("URL", "URL"),
    ("CATEGORIES", "CATEGORIES"),
    ("NOTE", "NOTE"),
];

/// Renders an informal property for a version.
///
/// `EMAIL`/`TEL` go through the canonicalizer; other properties get their
/// `HOME`/`WORK` tokens re-rendered in the version's `TYPE` grammar.
fn version_form(raw: &str, version: VCardVersion) -> String {
    let name = base_name(raw);
    if name.eq_ignore_ascii_case(names::EMAIL) || name.eq_ignore_ascii_case(names::TEL) {
        return canonicalise(raw, version);
    }

    let qualifiers: Vec<Qualifier> = raw
        .split(';')
        .skip(1)
        .filter_map(Qualifier::from_token)
        .collect();
    if qualifiers.is_empty() {
        return raw.to_string();
    }
    qualified_name(name, &qualifiers, false, version)
}

/// Compares two property names case-insensitively with `"` removed.
fn eq_unquoted(a: &str, b: &str) -> bool {
    let unquoted = |s: &str| {
        s.bytes()
            .filter(|&byte| byte != b'"')
            .map(|byte| byte.to_ascii_lowercase())
            .collect::<Vec<u8>>()
    };
    unquoted(a) == unquoted(b)
}
