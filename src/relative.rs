//! Reference relativization.
//!
//! The inverse of [resolution][`crate::resolve`]: given a base and a
//! target sharing its scheme and authority, produce the shortest
//! reference that resolves back to the target. Relativization never
//! fails; when the inputs are unrelated (different scheme or authority,
//! or a target that is itself a relative path) the target is returned
//! unchanged.
//!
//! # Examples
//!
//! ```
//! use uri_value::{relativize, resolve, Uri};
//!
//! let base = Uri::parse("http://example.com/a/b/c")?;
//! let target = Uri::parse("http://example.com/a/x/y?q")?;
//!
//! let reference = relativize(&base, &target);
//! assert_eq!(reference.to_string(), "../x/y?q");
//! assert_eq!(resolve(&base, &reference), target);
//! # Ok::<_, uri_value::SyntaxError>(())
//! ```

use crate::uri::Uri;

/// Relativizes `target` against `base`.
///
/// The scheme and the whole authority (userinfo, host, port) must match,
/// and the target must not be a relative-path reference; otherwise the
/// target is returned as-is. The result keeps the target's fragment and
/// drops path and query down to the shortest reference that still
/// resolves to the target.
#[must_use]
pub fn relativize(base: &Uri, target: &Uri) -> Uri {
    if !is_relativizable(base, target) {
        return target.clone();
    }

    let fragment = target.fragment().map(ToOwned::to_owned);
    if target.path() != base.path() {
        let path = relativize_path(base.path(), target.path());
        let query = target.query().map(ToOwned::to_owned);
        return Uri::from_trusted_components(None, None, None, None, path, query, fragment);
    }
    if target.query() == base.query() {
        // Same path, same query: a bare (possibly empty) fragment
        // reference is enough.
        return Uri::from_trusted_components(None, None, None, None, String::new(), None, fragment);
    }
    if target.query().is_none() {
        // The base has a query the target lacks; an empty reference would
        // inherit it, so re-state the last path segment.
        let path = basename_reference(target.path());
        return Uri::from_trusted_components(None, None, None, None, path, None, fragment);
    }
    let query = target.query().map(ToOwned::to_owned);
    Uri::from_trusted_components(None, None, None, None, String::new(), query, fragment)
}

/// Checks that relativization applies at all.
fn is_relativizable(base: &Uri, target: &Uri) -> bool {
    base.scheme() == target.scheme()
        && base.userinfo() == target.userinfo()
        && base.host() == target.host()
        && base.port() == target.port()
        && !is_relative_path_reference(target)
}

/// Checks for a relative-path reference (no scheme, no authority, path
/// not starting with `/`).
fn is_relative_path_reference(uri: &Uri) -> bool {
    uri.scheme().is_none() && uri.host().is_none() && !uri.path().starts_with('/')
}

/// Computes the relative path from the base's directory to the target.
fn relativize_path(base_path: &str, target_path: &str) -> String {
    let mut base_segments: Vec<&str> = base_path.split('/').collect();
    let mut target_segments: Vec<&str> = target_path.split('/').collect();
    let target_basename = target_segments.pop().unwrap_or("");
    base_segments.pop();

    let mut common = 0;
    while common < base_segments.len()
        && common < target_segments.len()
        && base_segments[common] == target_segments[common]
    {
        common += 1;
    }

    let mut out: Vec<&str> = Vec::new();
    out.resize(base_segments.len() - common, "..");
    out.extend(&target_segments[common..]);
    out.push(target_basename);
    format_path(out.join("/"), base_path)
}

/// Final shaping of a computed relative path.
///
/// An empty path needs `./` (unless the base path itself was empty or
/// `/`), and a `:` before any `/` needs a `./` prefix so the first
/// segment cannot be mistaken for a scheme.
fn format_path(path: String, base_path: &str) -> String {
    if path.is_empty() {
        return if base_path.is_empty() || base_path == "/" {
            base_path.to_owned()
        } else {
            "./".to_owned()
        };
    }
    match path.find(':') {
        Some(colon_pos) => match path.find('/') {
            Some(slash_pos) if colon_pos > slash_pos => path,
            _ => format!("./{path}"),
        },
        None => path,
    }
}

/// The last path segment as a self-reference, `./` when it is empty.
fn basename_reference(path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or("");
    if basename.is_empty() {
        "./".to_owned()
    } else {
        format_path(basename.to_owned(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `(base, target, expected)` triples.
    const CASES: &[(&str, &str, &str)] = &[
        ("http://a/b/c/d;p?q", "http://a/b/c/g;x?y#s", "g;x?y#s"),
        ("http://a/b/c/d;p?q", "http://a/g", "../../g"),
        ("http://a/b/c/d;p?q", "http://a/b/c/d;p?q", ""),
        ("http://a/b/c/d;p?q", "http://a/b/c/d;p?y", "?y"),
        ("http://a/b/c/d;p?q", "http://a/b/c/d;p?q#s", "#s"),
        ("http://a/b/c/d;p?q", "http://a/b/c/d;p", "d;p"),
        ("http://a/b/c/", "http://a/b/c/", ""),
        ("http://a/b/c/d", "http://a/b/c/", "./"),
        ("http://a/b/", "http://a/b/g:h", "./g:h"),
        ("http://a/", "http://b/", "http://b/"),
        ("https://a/", "http://a/", "http://a/"),
    ];

    #[test]
    fn relativize_cases() {
        for (base, target, expected) in CASES {
            let base = Uri::parse(base).expect("should be a valid base");
            let target = Uri::parse(target).expect("should be a valid target");
            assert_eq!(
                relativize(&base, &target).to_string(),
                *expected,
                "base={base}, target={target}"
            );
        }
    }

    #[test]
    fn round_trips_through_resolve() {
        for (base, target, _expected) in CASES {
            let base = Uri::parse(base).expect("should be a valid base");
            let target = Uri::parse(target).expect("should be a valid target");
            let reference = relativize(&base, &target);
            assert_eq!(
                crate::resolve::resolve(&base, &reference),
                target,
                "base={base}, reference={reference}"
            );
        }
    }

    #[test]
    fn relative_path_target_is_returned_unchanged() {
        let base = Uri::parse("http://a/b").expect("valid");
        let target = Uri::parse("x/y").expect("valid");
        assert_eq!(relativize(&base, &target), target);
    }
}
