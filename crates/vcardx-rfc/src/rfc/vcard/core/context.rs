//! Explicit codec configuration threaded through serialization.

use super::charset::Charset;
use super::version::VCardVersion;

/// Per-operation codec settings.
///
/// Built once per transcoding call and passed by reference; the codec holds
/// no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecContext {
    /// Active vCard version.
    pub version: VCardVersion,
    /// Output charset for 2.1 values.
    pub v21_charset: Charset,
    /// Fold 3.0/4.0 output lines longer than 75 octets.
    pub fold_lines: bool,
}

impl CodecContext {
    /// Creates a context with US-ASCII 2.1 output and no folding.
    #[must_use]
    pub const fn new(version: VCardVersion) -> Self {
        Self {
            version,
            v21_charset: Charset::UsAscii,
            fold_lines: false,
        }
    }

    /// Sets the 2.1 output charset.
    #[must_use]
    pub const fn with_v21_charset(mut self, charset: Charset) -> Self {
        self.v21_charset = charset;
        self
    }

    /// Enables or disables line folding.
    #[must_use]
    pub const fn with_folding(mut self, fold_lines: bool) -> Self {
        self.fold_lines = fold_lines;
        self
    }
}

impl From<VCardVersion> for CodecContext {
    fn from(version: VCardVersion) -> Self {
        Self::new(version)
    }
}
