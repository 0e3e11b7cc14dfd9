//! Document-equivalence normalization.
//!
//! [`normalize()`] produces a canonical string for equivalence comparison:
//! dot segments are removed (by resolving the value against itself, which
//! a reference with a scheme, an authority or an absolute path permits),
//! query pairs are sorted, unreserved percent-triplets in path and query
//! are decoded, the fragment is cleared, the default port is elided, and
//! a present authority gets `/` instead of an empty path.
//!
//! The canonical string is *not* the identity of the value; the
//! [`Display`][`core::fmt::Display`] form of a [`Uri`] stays faithful to
//! the parsed components. The canonical form only underpins
//! [`is_same_document`].
//!
//! # Examples
//!
//! ```
//! use uri_value::{is_same_document, normalize, Uri};
//!
//! let a = Uri::parse("http://example.org/~foo/?b=2&a=1#frag")?;
//! assert_eq!(normalize(&a), "http://example.org/~foo/?a=1&b=2");
//!
//! let b = Uri::parse("http://example.ORG:80/bar/./../%7Efoo/?a=1&b=2")?;
//! assert!(is_same_document(&a, &b));
//! # Ok::<_, uri_value::SyntaxError>(())
//! ```

use crate::origin::default_port;
use crate::percent_encode::decode_unreserved;
use crate::resolve::remove_dot_segments;
use crate::uri::Uri;

/// Returns the canonical document-equivalence form of the URI.
///
/// The result is idempotent: normalizing the parse of a normalized
/// string yields the same string.
#[must_use]
pub fn normalize(uri: &Uri) -> String {
    // Decoding must happen before dot-segment removal: `%2E` is an
    // unreserved triplet, and a decoded `.`/`..` segment has to be
    // reduced like a literal one or repeated normalization would keep
    // finding new dot segments.
    let mut path = decode_unreserved(uri.path());
    if uri.scheme().is_some() || uri.host().is_some() || path.starts_with('/') {
        // Resolving a reference with a scheme, an authority or an
        // absolute path against itself reduces to dot-segment removal.
        path = remove_dot_segments(&path);
    }
    if uri.host().is_none() && path.starts_with("//") {
        path.insert_str(0, "/.");
    }
    if uri.host().is_some() && path.is_empty() {
        path.push('/');
    }

    let query = match uri.query() {
        None | Some("") => None,
        Some(query) => Some(sort_query(query)),
    };
    let port = uri
        .port()
        .filter(|&port| uri.scheme().and_then(default_port) != Some(port));

    let mut out = String::new();
    if let Some(scheme) = uri.scheme() {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(host) = uri.host() {
        out.push_str("//");
        if let Some(userinfo) = uri.userinfo() {
            out.push_str(&userinfo.to_string());
            out.push('@');
        }
        out.push_str(host);
        if let Some(port) = port {
            out.push(':');
            out.push_str(&port.to_string());
        }
    }
    out.push_str(&path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(&query);
    }
    out
}

/// Checks two URIs for document equivalence.
///
/// Fragments are ignored; everything else is compared through
/// [`normalize()`]. The relation is reflexive, symmetric and transitive.
#[must_use]
pub fn is_same_document(a: &Uri, b: &Uri) -> bool {
    normalize(a) == normalize(b)
}

/// Splits the query on `&`, decodes unreserved triplets in each pair,
/// and sorts the pairs lexicographically.
///
/// Pair payloads are otherwise opaque: reserved triplets stay encoded and
/// no `=`-aware parsing happens.
fn sort_query(query: &str) -> String {
    let mut pairs: Vec<String> = query.split('&').map(decode_unreserved).collect();
    pairs.sort_unstable();
    pairs.join("&")
}
