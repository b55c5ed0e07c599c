//! vCard property names and name-level helpers.

/// Separator between a property name and its qualifiers/parameters.
pub const QUALIFIER_SEPARATOR: char = ';';

/// Separator between a property and its value.
pub const VALUE_SEPARATOR: char = ':';

/// Properties whose value is a positional, semicolon-delimited sequence.
pub const COMPOUND_PROPERTIES: [&str; 2] = [names::ADR, names::N];

/// Structural marker properties that never carry a `CHARSET` parameter.
pub const STRUCTURAL_PROPERTIES: [&str; 3] = [names::BEGIN, names::VERSION, names::END];

/// Returns the bare property name (the portion before any qualifier or value).
#[must_use]
pub fn base_name(property: &str) -> &str {
    property
        .split([QUALIFIER_SEPARATOR, VALUE_SEPARATOR])
        .next()
        .unwrap_or(property)
}

/// Returns whether the property's value is compound (`ADR`, `N`).
#[must_use]
pub fn is_compound(property: &str) -> bool {
    let name = base_name(property);
    COMPOUND_PROPERTIES
        .iter()
        .any(|compound| compound.eq_ignore_ascii_case(name))
}

/// Returns whether the property is a `BEGIN`, `VERSION` or `END` marker.
#[must_use]
pub fn is_structural(property: &str) -> bool {
    let name = base_name(property);
    STRUCTURAL_PROPERTIES
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(name))
}

/// Common property names as constants.
pub mod names {
    // Identification properties
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const BDAY: &str = "BDAY";

    // Delivery addressing
    pub const ADR: &str = "ADR";

    // Communications
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";

    // Organizational
    pub const TITLE: &str = "TITLE";
    pub const ORG: &str = "ORG";

    // Explanatory
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const URL: &str = "URL";

    // General/structural
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
}

/// Value carried by the `BEGIN` and `END` markers.
pub const VCARD: &str = "VCARD";

/// Card opening marker line (without terminator).
pub const BEGIN_MARKER: &str = const_str::concat!(names::BEGIN, ":", VCARD);

/// Card closing marker line (without terminator).
pub const END_MARKER: &str = const_str::concat!(names::END, ":", VCARD);
