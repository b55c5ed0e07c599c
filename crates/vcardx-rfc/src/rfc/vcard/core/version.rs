//! vCard version selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rfc::vcard::error::CodecError;

/// The vCard revision a codec operation targets.
///
/// Selects the escaping rule set, line terminator, output text encoding and
/// qualifier-parameter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VCardVersion {
    /// vCard 2.1 (versit).
    #[serde(rename = "2.1")]
    V21,
    /// vCard 3.0 (RFC 2426).
    #[serde(rename = "3.0")]
    V30,
    /// vCard 4.0 (RFC 6350).
    #[serde(rename = "4.0")]
    V40,
}

impl VCardVersion {
    /// All supported versions, oldest first.
    pub const ALL: [Self; 3] = [Self::V21, Self::V30, Self::V40];

    /// Returns the value written on the `VERSION` line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V21 => "2.1",
            Self::V30 => "3.0",
            Self::V40 => "4.0",
        }
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VCardVersion {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2.1" => Ok(Self::V21),
            "3.0" => Ok(Self::V30),
            "4.0" => Ok(Self::V40),
            other => Err(CodecError::unknown_version(other)),
        }
    }
}
