//! vCard 2.1 / 3.0 / 4.0 codec.
//!
//! Converts between the line-oriented vCard text format and ordered
//! property/value records, applying each version's escaping, charset and
//! qualifier rules. Everything here is pure: callers own all I/O.

pub mod rfc;
