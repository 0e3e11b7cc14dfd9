//! Reference decomposition.
//!
//! Splitting follows the RFC 3986 ABNF: fragment and query are detached
//! first by the grammar, then `scheme:`, then the `//authority` prefix
//! (with the bracketed IP-literal consumed greedily up to its closing
//! bracket), then the path. The resulting slices are raw; component
//! validators turn them into canonical components.

use nom::combinator::all_consuming;

pub(crate) mod char;
mod details;

pub(crate) use self::details::{ip_literal, ipv4address};

/// Raw, unvalidated components of a URI reference.
///
/// All slices borrow from the parsed input. `authority` can be present
/// with an empty host (e.g. `foo://`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawComponents<'a> {
    /// Scheme, without the trailing `:`.
    pub(crate) scheme: Option<&'a str>,
    /// Authority, without the leading `//`.
    pub(crate) authority: Option<RawAuthority<'a>>,
    /// Path. Always present, possibly empty.
    pub(crate) path: &'a str,
    /// Query, without the leading `?`.
    pub(crate) query: Option<&'a str>,
    /// Fragment, without the leading `#`.
    pub(crate) fragment: Option<&'a str>,
}

/// Raw authority parts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawAuthority<'a> {
    /// Userinfo, without the trailing `@`.
    pub(crate) userinfo: Option<&'a str>,
    /// Host. Empty string for an empty host.
    pub(crate) host: &'a str,
    /// Port digits, without the leading `:`. `Some("")` for a bare colon.
    pub(crate) port: Option<&'a str>,
}

/// Decomposes a URI reference into raw components.
///
/// Returns `None` for strings which do not match the `URI-reference` rule.
pub(crate) fn decompose(input: &str) -> Option<RawComponents<'_>> {
    all_consuming(details::uri_reference::<()>)(input)
        .ok()
        .map(|(_rest, components)| components)
}
