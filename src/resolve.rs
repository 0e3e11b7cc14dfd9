//! Reference resolution.
//!
//! Implements the strict transform-references algorithm of [RFC 3986
//! section 5.2] (no scheme-based backward-compatibility fallback).
//!
//! Resolution never fails. Resolving against a non-absolute base is
//! allowed; the result is then simply not guaranteed to be absolute, and
//! checking absoluteness is left to the caller. The one abnormal case
//! (a merged path starting with `//` on an authority-less target) is kept
//! unambiguous with a `/.` prefix segment, so the resulting value always
//! upholds the component invariants.
//!
//! [RFC 3986 section 5.2]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2
//!
//! # Examples
//!
//! ```
//! use uri_value::{resolve, Uri};
//!
//! let base = Uri::parse("http://a/b/c/d;p?q")?;
//! let reference = Uri::parse("../../g")?;
//! assert_eq!(resolve(&base, &reference).to_string(), "http://a/g");
//! # Ok::<_, uri_value::SyntaxError>(())
//! ```

use crate::uri::Uri;

/// Resolves `reference` against `base`.
///
/// The target components are chosen per [RFC 3986 section 5.2.2]: the
/// reference wins from its first present component on, everything higher
/// is inherited from the base (userinfo and port travel with the
/// authority). The fragment always comes from the reference.
///
/// [RFC 3986 section 5.2.2]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.2
#[must_use]
pub fn resolve(base: &Uri, reference: &Uri) -> Uri {
    let t_scheme;
    let t_userinfo;
    let t_host;
    let t_port;
    let t_path;
    let t_query;

    if reference.scheme().is_some() {
        t_scheme = reference.scheme();
        t_userinfo = reference.userinfo().cloned();
        t_host = reference.host();
        t_port = reference.port();
        t_path = remove_dot_segments(reference.path());
        t_query = reference.query();
    } else if reference.host().is_some() {
        t_scheme = base.scheme();
        t_userinfo = reference.userinfo().cloned();
        t_host = reference.host();
        t_port = reference.port();
        t_path = remove_dot_segments(reference.path());
        t_query = reference.query();
    } else {
        t_scheme = base.scheme();
        t_userinfo = base.userinfo().cloned();
        t_host = base.host();
        t_port = base.port();
        if reference.path().is_empty() {
            t_path = base.path().to_owned();
            t_query = reference.query().or_else(|| base.query());
        } else {
            if reference.path().starts_with('/') {
                t_path = remove_dot_segments(reference.path());
            } else {
                t_path = remove_dot_segments(&merge(base, reference.path()));
            }
            t_query = reference.query();
        }
    }

    Uri::from_trusted_components(
        t_scheme.map(ToOwned::to_owned),
        t_userinfo,
        t_host.map(ToOwned::to_owned),
        t_port,
        t_path,
        t_query.map(ToOwned::to_owned),
        reference.fragment().map(ToOwned::to_owned),
    )
}

/// Merges the reference path into the base path.
///
/// See [RFC 3986 section 5.2.3]: with an authority and an empty path the
/// reference is grafted onto `/`; otherwise it replaces the base path's
/// last segment.
///
/// [RFC 3986 section 5.2.3]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.3
fn merge(base: &Uri, ref_path: &str) -> String {
    if base.host().is_some() && base.path().is_empty() {
        return format!("/{ref_path}");
    }
    let base_dir_end = base.path().rfind('/').map_or(0, |pos| pos + 1);
    format!("{}{}", &base.path()[..base_dir_end], ref_path)
}

/// Removes `.` and `..` segments from the path.
///
/// See [RFC 3986 section 5.2.4]. A trailing `.` or `..` input segment
/// leaves a trailing slash in the output. The function is idempotent.
///
/// [RFC 3986 section 5.2.4]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4
pub(crate) fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            // 2A.
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            // 2A.
            input = rest;
        } else if input.starts_with("/./") {
            // 2B: `/./rest` becomes `/rest`; slicing from the dot keeps
            // the slash in place.
            input = &input[2..];
        } else if input == "/." {
            // 2B.
            input = "/";
        } else if input.starts_with("/../") {
            // 2C: `/../rest` becomes `/rest`.
            pop_last_segment(&mut output);
            input = &input[3..];
        } else if input == "/.." {
            // 2C.
            pop_last_segment(&mut output);
            input = "/";
        } else if input == "." || input == ".." {
            // 2D.
            input = "";
        } else {
            // 2E: move the first segment (with its leading slash, if any)
            // to the output.
            let skip = usize::from(input.starts_with('/'));
            let seg_end = input[skip..]
                .find('/')
                .map_or_else(|| input.len(), |pos| pos + skip);
            output.push_str(&input[..seg_end]);
            input = &input[seg_end..];
        }
    }
    output
}

/// Removes the last output segment and its preceding slash, if any.
fn pop_last_segment(output: &mut String) {
    match output.rfind('/') {
        Some(pos) => output.truncate(pos),
        None => output.clear(),
    }
}
