//! Percent encoding.
//!
//! Encoding is region-specific: each syntactic region of a URI permits a
//! different set of characters to stay unencoded. Decoding is
//! region-agnostic and, for canonicalization purposes, restricted to
//! percent-triplets whose decoded byte is `unreserved`.

use core::fmt::{self, Write as _};

use crate::parser::char;

/// Syntactic region an encoder operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Region {
    /// Userinfo (`user` and `password` alike).
    Userinfo,
    /// Registered name (hostname).
    RegName,
    /// A single path segment. A slash is encoded to `%2F`.
    PathSegment,
    /// A whole path. Slashes separate segments and stay as-is.
    Path,
    /// Query, without the leading `?`.
    Query,
    /// Fragment, without the leading `#`.
    Fragment,
}

impl Region {
    /// Checks if the given character may stay unencoded in this region.
    fn allows(self, c: char) -> bool {
        match self {
            Region::Userinfo => char::is_userinfo_char(c),
            Region::RegName => char::is_regname_char(c),
            Region::PathSegment => char::is_pchar_single(c),
            Region::Path => c == '/' || char::is_pchar_single(c),
            Region::Query | Region::Fragment => {
                c == '/' || c == '?' || char::is_pchar_single(c)
            }
        }
    }
}

/// Raw byte that may not appear unescaped under strict encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ForbiddenControlByte(pub(crate) u8);

/// Encodes `raw` for the given region.
///
/// Already-valid percent triplets pass through (uppercased); a stray `%`
/// is re-encoded as `%25`; every other byte outside the region's
/// permitted set becomes an uppercase `%XX` triplet. Raw control bytes
/// (0x00..=0x1F and 0x7F) are rejected.
pub(crate) fn encode(region: Region, raw: &str) -> Result<String, ForbiddenControlByte> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if c == '%' {
            let bytes = rest.as_bytes();
            if bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit() {
                out.push('%');
                out.push(bytes[1].to_ascii_uppercase() as char);
                out.push(bytes[2].to_ascii_uppercase() as char);
                rest = &rest[3..];
            } else {
                out.push_str("%25");
                rest = &rest[1..];
            }
            continue;
        }
        if char::is_control(c) {
            return Err(ForbiddenControlByte(c as u8));
        }
        if region.allows(c) {
            out.push(c);
        } else {
            encode_char(&mut out, c);
        }
        rest = &rest[c.len_utf8()..];
    }
    Ok(out)
}

/// Percent-encodes every UTF-8 byte of the character.
fn encode_char(out: &mut String, c: char) {
    let mut buf = [0_u8; 4];
    for b in c.encode_utf8(&mut buf).bytes() {
        let _ = write!(out, "%{b:02X}");
    }
}

/// Decodes percent-triplets whose decoded byte is `unreserved`, and
/// uppercases the remaining triplets.
///
/// A `%` not followed by two hex digits is re-encoded as `%25`; decoded
/// state of reserved bytes is left alone.
pub(crate) fn decode_unreserved(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if c != '%' {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let bytes = rest.as_bytes();
        if bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit() {
            let decoded = hex_value(bytes[1]) * 16 + hex_value(bytes[2]);
            if decoded.is_ascii() && char::is_unreserved(decoded as char) {
                out.push(decoded as char);
            } else {
                out.push('%');
                out.push(bytes[1].to_ascii_uppercase() as char);
                out.push(bytes[2].to_ascii_uppercase() as char);
            }
            rest = &rest[3..];
        } else {
            out.push_str("%25");
            rest = &rest[1..];
        }
    }
    out
}

/// Value of an ASCII hex digit.
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// A proxy to percent-encode a string for a URI region.
///
/// The proxy implements [`Display`][`core::fmt::Display`], so no
/// intermediate allocation happens until the result is actually written.
///
/// # Examples
///
/// ```
/// use uri_value::percent_encode::PercentEncoded;
///
/// assert_eq!(
///     PercentEncoded::from_path_segment("alpha/\u{03B1}?#").to_string(),
///     "alpha%2F%CE%B1%3F%23"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PercentEncoded<T> {
    /// Source string context.
    region: Region,
    /// Raw string before being encoded.
    raw: T,
}

impl<T: fmt::Display> PercentEncoded<T> {
    /// Creates an encoded string from a raw userinfo piece.
    #[inline]
    #[must_use]
    pub fn from_userinfo(raw: T) -> Self {
        Self {
            region: Region::Userinfo,
            raw,
        }
    }

    /// Creates an encoded string from a raw reg-name (i.e. hostname).
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::percent_encode::PercentEncoded;
    ///
    /// assert_eq!(
    ///     PercentEncoded::from_reg_name("alpha.\u{03B1}.example.com").to_string(),
    ///     "alpha.%CE%B1.example.com"
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn from_reg_name(raw: T) -> Self {
        Self {
            region: Region::RegName,
            raw,
        }
    }

    /// Creates an encoded string from a raw path segment.
    ///
    /// A slash (`/`) will be encoded to `%2F`.
    #[inline]
    #[must_use]
    pub fn from_path_segment(raw: T) -> Self {
        Self {
            region: Region::PathSegment,
            raw,
        }
    }

    /// Creates an encoded string from a raw path.
    ///
    /// A slash (`/`) will be used as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::percent_encode::PercentEncoded;
    ///
    /// assert_eq!(
    ///     PercentEncoded::from_path("alpha/\u{03B1}?#").to_string(),
    ///     "alpha/%CE%B1%3F%23"
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn from_path(raw: T) -> Self {
        Self {
            region: Region::Path,
            raw,
        }
    }

    /// Creates an encoded string from a raw query (without the `?` prefix).
    #[inline]
    #[must_use]
    pub fn from_query(raw: T) -> Self {
        Self {
            region: Region::Query,
            raw,
        }
    }

    /// Creates an encoded string from a raw fragment (without the `#` prefix).
    #[inline]
    #[must_use]
    pub fn from_fragment(raw: T) -> Self {
        Self {
            region: Region::Fragment,
            raw,
        }
    }
}

impl<T: fmt::Display> fmt::Display for PercentEncoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Filter that encodes characters as they are written.
        struct Filter<'a, 'b> {
            /// Encoding region.
            region: Region,
            /// Writer.
            writer: &'a mut fmt::Formatter<'b>,
        }
        impl fmt::Write for Filter<'_, '_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                s.chars().try_for_each(|c| self.write_char(c))
            }
            fn write_char(&mut self, c: char) -> fmt::Result {
                if self.region.allows(c) {
                    self.writer.write_char(c)
                } else {
                    let mut buf = [0_u8; 4];
                    c.encode_utf8(&mut buf)
                        .bytes()
                        .try_for_each(|b| write!(self.writer, "%{b:02X}"))
                }
            }
        }
        let mut filter = Filter {
            region: self.region,
            writer: f,
        };
        write!(filter, "{}", self.raw)
    }
}
