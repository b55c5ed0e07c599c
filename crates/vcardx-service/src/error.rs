use thiserror::Error;
use vcardx_rfc::rfc::vcard::CodecError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    #[error("Unknown language {language} for style {style}")]
    UnknownLanguage { style: String, language: String },

    #[error("Unknown version {version} for style {style}, language {language}")]
    UnknownVersion {
        style: String,
        language: String,
        version: String,
    },

    #[error("Duplicate style: {0}")]
    DuplicateStyle(String),

    #[error(transparent)]
    CodecError(#[from] CodecError),

    #[error(transparent)]
    CoreError(#[from] vcardx_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
