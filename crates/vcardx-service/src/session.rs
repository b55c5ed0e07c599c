//! Per-operation session state and its construction from settings.

use vcardx_core::config::{CodecConfig, Settings};
use vcardx_core::error::{CoreError, CoreResult};
use vcardx_rfc::rfc::vcard::{Charset, CodecContext, VCardVersion};

use crate::error::ServiceResult;
use crate::mapping::{FieldMapping, MappingTable};

/// The (style, language, version) triple for one transcoding operation.
///
/// Owned by the caller and passed by value; nothing here is global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub style: String,
    pub language: String,
    pub version: VCardVersion,
}

impl Session {
    #[must_use]
    pub fn new(style: impl Into<String>, language: impl Into<String>, version: VCardVersion) -> Self {
        Self {
            style: style.into(),
            language: language.into(),
            version,
        }
    }

    /// ## Summary
    /// Builds a session from the `[session]` and `[codec]` settings.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the configured version is unknown.
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        let version = parse_version(&settings.codec.version)?;
        Ok(Self::new(
            settings.session.style.clone(),
            settings.session.language.clone(),
            version,
        ))
    }

    /// ## Summary
    /// Validates the triple against a mapping table and returns its field mapping.
    ///
    /// ## Errors
    /// Returns `UnknownStyle`, `UnknownLanguage` or `UnknownVersion`.
    pub fn resolve<'t>(&self, table: &'t MappingTable) -> ServiceResult<&'t FieldMapping> {
        table.lookup(&self.style, &self.language, self.version)
    }
}

/// ## Summary
/// Builds a codec context from the `[codec]` settings.
///
/// ## Errors
/// Returns `CoreError::ConfigError` if the version or the 2.1 charset is unknown.
pub fn codec_context(config: &CodecConfig) -> ServiceResult<CodecContext> {
    let version = parse_version(&config.version)?;
    let charset = Charset::lookup(&config.v21_charset).ok_or_else(|| {
        CoreError::ConfigError(format!("unknown 2.1 charset: {}", config.v21_charset))
    })?;

    Ok(CodecContext::new(version)
        .with_v21_charset(charset)
        .with_folding(config.fold_lines))
}

fn parse_version(raw: &str) -> CoreResult<VCardVersion> {
    raw.parse::<VCardVersion>()
        .map_err(|e| CoreError::ConfigError(e.to_string()))
}
