//! vCard codec error types.

use std::fmt;

/// Result type for vCard codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// An error raised by the parser, serializer or charset table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    /// The kind of error.
    pub kind: CodecErrorKind,
    /// Line number where the error occurred (1-based, 0 when not tied to input).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl CodecError {
    /// Creates a new codec error.
    #[must_use]
    pub fn new(kind: CodecErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(CodecErrorKind::InvalidInput, 0, message)
    }

    /// Creates an unknown charset error.
    #[must_use]
    pub fn unknown_charset(line: usize, name: &str) -> Self {
        Self::new(
            CodecErrorKind::UnknownCharset,
            line,
            format!("charset not in table: {name}"),
        )
    }

    /// Creates a malformed card error.
    #[must_use]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::new(CodecErrorKind::MalformedCard, line, message)
    }

    /// Creates an unknown version error.
    #[must_use]
    pub fn unknown_version(version: &str) -> Self {
        Self::new(
            CodecErrorKind::UnknownVersion,
            0,
            format!("unsupported vCard version: {version}"),
        )
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
        }
    }
}

impl std::error::Error for CodecError {}

/// The kind of codec error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorKind {
    /// A required argument was missing or empty.
    InvalidInput,
    /// A CHARSET parameter named a charset absent from the table.
    UnknownCharset,
    /// A value cannot be represented in the output charset.
    UnmappableCharacter,
    /// Unterminated card or unparsable content line.
    MalformedCard,
    /// Version string is not 2.1, 3.0 or 4.0.
    UnknownVersion,
}

impl fmt::Display for CodecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::UnknownCharset => write!(f, "unknown charset"),
            Self::UnmappableCharacter => write!(f, "unmappable character"),
            Self::MalformedCard => write!(f, "malformed card"),
            Self::UnknownVersion => write!(f, "unknown version"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_line() {
        let err = CodecError::malformed(7, "missing END:VCARD");
        assert_eq!(err.to_string(), "line 7: malformed card: missing END:VCARD");
    }

    #[test]
    fn display_without_line() {
        let err = CodecError::unknown_version("5.0");
        assert_eq!(
            err.to_string(),
            "unknown version: unsupported vCard version: 5.0"
        );
    }
}
