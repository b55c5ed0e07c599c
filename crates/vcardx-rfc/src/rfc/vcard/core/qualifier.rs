//! Qualifier canonicalization for `EMAIL` and `TEL`.
//!
//! Informal qualifier spellings (`EMAIL;HOME;PREF`, `TEL;TYPE=cell,pref`,
//! `TEL;CELL;PREF`, ...) are folded into each version's parameter grammar:
//!
//! | Version | Qualifiers            | Preference                 |
//! |---------|-----------------------|----------------------------|
//! | 4.0     | `;TYPE="a,b"`         | `;PREF=1`                  |
//! | 3.0     | `;TYPE=a,b`           | `,pref` or `;TYPE=pref`    |
//! | 2.1     | `;A;B`                | `;PREF`                    |
//!
//! Qualifiers are emitted in a fixed detection order rather than source
//! order, which makes the transform idempotent.

use std::fmt::Write as _;

use super::property::{QUALIFIER_SEPARATOR, names};
use super::version::VCardVersion;

/// A recognized qualifier that is carried into canonical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Cell,
    Fax,
    Msg,
    Voice,
    Home,
    Work,
}

impl Qualifier {
    /// Lower-case `TYPE` value used by 3.0 and 4.0.
    #[must_use]
    pub const fn type_value(self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::Fax => "fax",
            Self::Msg => "msg",
            Self::Voice => "voice",
            Self::Home => "home",
            Self::Work => "work",
        }
    }

    /// Upper-case token used as a bare 2.1 parameter segment.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Cell => "CELL",
            Self::Fax => "FAX",
            Self::Msg => "MSG",
            Self::Voice => "VOICE",
            Self::Home => "HOME",
            Self::Work => "WORK",
        }
    }

    /// Parses a bare qualifier token or `TYPE` value (case-insensitive).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        [Self::Cell, Self::Fax, Self::Msg, Self::Voice, Self::Home, Self::Work]
            .into_iter()
            .find(|q| q.token().eq_ignore_ascii_case(token.trim()))
    }
}

const PREF_TOKEN: &str = "PREF";

/// Canonicalizes a raw property name for the given version.
///
/// Names other than `EMAIL` and `TEL`, and `EMAIL`/`TEL` names without a
/// recognized qualifier, are returned unchanged. A bare `TEL` gains the
/// implicit `VOICE` qualifier.
///
/// Once a qualifier is recognized the name is rebuilt from the detected
/// qualifiers alone. Every other parameter is dropped, so
/// `TEL;VALUE=uri;TYPE=cell` becomes `TEL;TYPE="cell"` under 4.0. Callers
/// that need such parameters must keep the raw name themselves.
#[must_use]
pub fn canonicalise(raw: &str, version: VCardVersion) -> String {
    let Some((name, qualifiers)) = raw.split_once(QUALIFIER_SEPARATOR) else {
        if raw.eq_ignore_ascii_case(names::TEL) {
            return qualified_name(names::TEL, &[Qualifier::Voice], false, version);
        }
        return raw.to_string();
    };

    let upper = qualifiers.to_ascii_uppercase();
    let has = |token: &str| upper.contains(token);

    if name.eq_ignore_ascii_case(names::EMAIL) {
        let detected = [(Qualifier::Home, has("HOME")), (Qualifier::Work, has("WORK"))];
        let pref = has(PREF_TOKEN);
        let types: Vec<Qualifier> = detected
            .into_iter()
            .filter_map(|(q, present)| present.then_some(q))
            .collect();

        if types.is_empty() && !pref {
            return raw.to_string();
        }
        return qualified_name(names::EMAIL, &types, pref, version);
    }

    if name.eq_ignore_ascii_case(names::TEL) {
        let cell = has("CELL");
        let fax = has("FAX");
        let msg = has("MSG");
        let voice = has("VOICE");
        let home = has("HOME");
        let work = has("WORK");
        let pref = has(PREF_TOKEN);

        if !(cell || fax || msg || voice || home || work || pref) {
            return raw.to_string();
        }

        let detected = [
            (Qualifier::Cell, cell),
            (Qualifier::Fax, fax),
            (Qualifier::Msg, msg),
            (Qualifier::Voice, !(cell || fax || msg)),
            (Qualifier::Home, home),
            (Qualifier::Work, work),
        ];
        let types: Vec<Qualifier> = detected
            .into_iter()
            .filter_map(|(q, present)| present.then_some(q))
            .collect();

        return qualified_name(names::TEL, &types, pref, version);
    }

    raw.to_string()
}

/// Builds `NAME` plus version-specific qualifier parameters, in the order given.
#[must_use]
pub fn qualified_name(name: &str, types: &[Qualifier], pref: bool, version: VCardVersion) -> String {
    let mut out = String::from(name);

    match version {
        VCardVersion::V40 => {
            if !types.is_empty() {
                let joined: Vec<&str> = types.iter().map(|q| q.type_value()).collect();
                let _ = write!(out, ";TYPE=\"{}\"", joined.join(","));
            }
            if pref {
                out.push_str(";PREF=1");
            }
        }
        VCardVersion::V30 => {
            let mut values: Vec<&str> = types.iter().map(|q| q.type_value()).collect();
            if pref {
                values.push("pref");
            }
            if !values.is_empty() {
                let _ = write!(out, ";TYPE={}", values.join(","));
            }
        }
        VCardVersion::V21 => {
            for q in types {
                out.push(QUALIFIER_SEPARATOR);
                out.push_str(q.token());
            }
            if pref {
                out.push(QUALIFIER_SEPARATOR);
                out.push_str(PREF_TOKEN);
            }
        }
    }

    out
}
