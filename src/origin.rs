//! Origin computation and comparison.
//!
//! Follows the WHATWG notion of origin: only the "special" schemes
//! (`ftp`, `http`, `https`, `ws`, `wss`) have a tuple origin, reduced
//! here to scheme + host + non-default port. A `blob:` URI delegates to
//! the origin of the URI carried in its path. Everything else is opaque
//! and treated as "no origin".

use crate::uri::Uri;

/// Schemes whose URIs have a tuple origin, with their default ports.
const SPECIAL_SCHEMES: &[(&str, u16)] = &[
    ("ftp", 21),
    ("http", 80),
    ("https", 443),
    ("ws", 80),
    ("wss", 443),
];

/// Returns the default port of a scheme, if it has one.
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    SPECIAL_SCHEMES
        .iter()
        .find(|(special, _)| *special == scheme)
        .map(|(_, port)| *port)
}

/// Computes the origin of a URI.
///
/// The origin keeps scheme and host, elides the port when it is the
/// scheme's default, and drops userinfo, path, query and fragment.
/// Returns `None` for schemes without a tuple origin.
///
/// # Examples
///
/// ```
/// use uri_value::{origin, Uri};
///
/// let uri = Uri::parse("https://user@mozilla.org:443/en-US/?q#top")?;
/// assert_eq!(origin(&uri).unwrap().to_string(), "https://mozilla.org");
///
/// let blob = Uri::parse("blob:https://mozilla.org:443/uuid")?;
/// assert_eq!(origin(&blob).unwrap().to_string(), "https://mozilla.org");
///
/// assert_eq!(origin(&Uri::parse("mailto:a@b.example")?), None);
/// # Ok::<_, uri_value::SyntaxError>(())
/// ```
#[must_use]
pub fn origin(uri: &Uri) -> Option<Uri> {
    let scheme = uri.scheme()?;
    if scheme == "blob" {
        let inner = Uri::parse(uri.path()).ok()?;
        return origin(&inner);
    }
    let default = default_port(scheme)?;
    let host = uri.host()?;
    if host.is_empty() {
        return None;
    }
    let port = uri.port().filter(|&port| port != default);
    Some(Uri::from_trusted_components(
        Some(scheme.to_owned()),
        None,
        Some(host.to_owned()),
        port,
        String::new(),
        None,
        None,
    ))
}

/// Checks whether two URIs belong to different origins.
///
/// True when either URI has no origin, or when the origins differ. The
/// relation is symmetric.
///
/// # Examples
///
/// ```
/// use uri_value::{is_cross_origin, Uri};
///
/// let a = Uri::parse("https://example.com/a")?;
/// let b = Uri::parse("https://example.com:443/b")?;
/// let c = Uri::parse("http://example.com/c")?;
///
/// assert!(!is_cross_origin(&a, &b));
/// assert!(is_cross_origin(&a, &c));
/// # Ok::<_, uri_value::SyntaxError>(())
/// ```
#[must_use]
pub fn is_cross_origin(a: &Uri, b: &Uri) -> bool {
    match (origin(a), origin(b)) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}
