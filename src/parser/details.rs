//! Grammar rules for RFC 3986 URI references.
//!
//! The rules decompose a reference into raw component slices; they do not
//! canonicalize. Canonicalization is the job of the component validators.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1, take_while_m_n};
use nom::character::complete::{char as char_, one_of, satisfy};
use nom::combinator::{cut, map, not, opt, recognize};
use nom::error::ParseError;
use nom::multi::{fold_many_m_n, many0_count, many1_count};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

use crate::parser::char::{
    is_pchar_single, is_regname_char, is_sub_delim, is_ucschar, is_unreserved, is_userinfo_char,
};
use crate::parser::{RawAuthority, RawComponents};

/// Repeats the embedded parser between `m` and `n` times and returns the
/// number of successful iterations.
fn many_m_n_count<'a, O, E, F>(
    m: usize,
    n: usize,
    f: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, usize, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
    E: ParseError<&'a str>,
{
    fold_many_m_n(m, n, f, || 0, |count, _| count + 1)
}

/// Parses the `URI-reference` rule and returns raw components.
pub(crate) fn uri_reference<'a, E: ParseError<&'a str>>(
    i: &'a str,
) -> IResult<&'a str, RawComponents<'a>, E> {
    alt((uri, relative_ref))(i)
}

/// Parses the `URI` rule and returns raw components.
fn uri<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, RawComponents<'a>, E> {
    map(
        tuple((
            terminated(scheme, char_(':')),
            hier_part,
            opt(preceded(char_('?'), query)),
            opt(preceded(char_('#'), fragment)),
        )),
        |(scheme, (authority, path), query, fragment)| RawComponents {
            scheme: Some(scheme),
            authority,
            path,
            query,
            fragment,
        },
    )(i)
}

/// Parses the `relative-ref` rule and returns raw components.
fn relative_ref<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, RawComponents<'a>, E> {
    map(
        tuple((
            relative_part,
            opt(preceded(char_('?'), query)),
            opt(preceded(char_('#'), fragment)),
        )),
        |((authority, path), query, fragment)| RawComponents {
            scheme: None,
            authority,
            path,
            query,
            fragment,
        },
    )(i)
}

/// Parses the `hier-part` rule and returns authority and path.
fn hier_part<'a, E: ParseError<&'a str>>(
    i: &'a str,
) -> IResult<&'a str, (Option<RawAuthority<'a>>, &'a str), E> {
    alt((
        preceded(tag("//"), pair(map(authority, Some), path_abempty)),
        map(path_absolute, |path| (None, path)),
        map(path_rootless, |path| (None, path)),
        map(path_empty, |path| (None, path)),
    ))(i)
}

/// Parses the `relative-part` rule and returns authority and path.
fn relative_part<'a, E: ParseError<&'a str>>(
    i: &'a str,
) -> IResult<&'a str, (Option<RawAuthority<'a>>, &'a str), E> {
    alt((
        preceded(tag("//"), pair(map(authority, Some), path_abempty)),
        map(path_absolute, |path| (None, path)),
        map(path_noscheme, |path| (None, path)),
        map(path_empty, |path| (None, path)),
    ))(i)
}

/// Parses the `scheme` rule.
fn scheme<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
    ))(i)
}

/// Parses the `authority` rule and returns userinfo, host and port slices.
fn authority<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, RawAuthority<'a>, E> {
    map(
        tuple((
            opt(terminated(userinfo, char_('@'))),
            host,
            opt(preceded(char_(':'), port)),
        )),
        |(userinfo, host, port)| RawAuthority {
            userinfo,
            host,
            port,
        },
    )(i)
}

/// Parses the `userinfo` rule.
fn userinfo<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(many0_count(alt((
        map(take_while1(is_userinfo_char), |_| ()),
        map(pct_encoded, |_| ()),
    ))))(i)
}

/// Parses the `host` rule.
///
/// An IPv4-shaped host also matches `reg-name`, so only the bracketed
/// `IP-literal` form needs its own branch here; the host validator is the
/// one that tells dotted-decimal addresses apart from registered names.
fn host<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    alt((ip_literal, reg_name))(i)
}

/// Parses the `port` rule. The digit string may be empty.
fn port<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while(|c: char| c.is_ascii_digit())(i)
}

/// Parses the `IP-literal` rule, brackets included.
pub(crate) fn ip_literal<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(delimited(
        char_('['),
        alt((ipv6address, ipvfuture)),
        char_(']'),
    ))(i)
}

/// Parses the `IPvFuture` rule.
fn ipvfuture<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(tuple((
        alt((char_('v'), char_('V'))),
        take_while1(|c: char| c.is_ascii_hexdigit()),
        char_('.'),
        take_while1(|c: char| is_unreserved(c) || is_sub_delim(c) || c == ':'),
    )))(i)
}

/// Parses the `IPv6address` rule.
fn ipv6address<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    /// Generates a parser for the part before `::` (and `::` itself).
    fn before_and_double_colon<'b, E: ParseError<&'b str>>(
        num_h16: usize,
    ) -> impl FnMut(&'b str) -> IResult<&'b str, &'b str, E> {
        recognize(terminated(
            pair(
                h16,
                many_m_n_count(num_h16 - 1, num_h16 - 1, preceded(char_(':'), h16)),
            ),
            tag("::"),
        ))
    }

    /// Generates a parser for the part after `::`.
    fn after_double_colon<'b, E: ParseError<&'b str>>(
        num_max_h16: usize,
    ) -> impl FnMut(&'b str) -> IResult<&'b str, &'b str, E> {
        recognize(alt((
            pair(
                many_m_n_count(0, num_max_h16 - 1, terminated(h16, char_(':'))),
                terminated(h16, not(char_('.'))),
            ),
            pair(
                many_m_n_count(0, num_max_h16 - 2, terminated(h16, char_(':'))),
                ipv4address,
            ),
        )))
    }

    alt((
        recognize(pair(tag("::"), after_double_colon(7))),
        recognize(pair(before_and_double_colon(1), after_double_colon(6))),
        recognize(pair(before_and_double_colon(2), after_double_colon(5))),
        recognize(pair(before_and_double_colon(3), after_double_colon(4))),
        recognize(pair(before_and_double_colon(4), after_double_colon(3))),
        recognize(pair(before_and_double_colon(5), after_double_colon(2))),
        recognize(pair(before_and_double_colon(6), h16)),
        before_and_double_colon(7),
        recognize(pair(
            many_m_n_count(0, 7, terminated(h16, char_(':'))),
            terminated(h16, not(char_('.'))),
        )),
        recognize(pair(
            many_m_n_count(0, 6, terminated(h16, char_(':'))),
            ipv4address,
        )),
    ))(i)
}

/// Parses the `h16` rule.
fn h16<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while_m_n(1, 4, |c: char| c.is_ascii_hexdigit())(i)
}

/// Parses the `IPv4address` rule (strict dotted-decimal).
pub(crate) fn ipv4address<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(tuple((
        terminated(dec_octet, char_('.')),
        terminated(dec_octet, char_('.')),
        terminated(dec_octet, char_('.')),
        dec_octet,
    )))(i)
}

/// Parses the `dec-octet` rule.
fn dec_octet<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    alt((
        recognize(pair(tag("25"), one_of("012345"))),
        recognize(tuple((
            char_('2'),
            one_of("01234"),
            satisfy(|c: char| c.is_ascii_digit()),
        ))),
        recognize(pair(
            char_('1'),
            take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
        )),
        recognize(pair(
            satisfy(|c: char| ('1'..='9').contains(&c)),
            satisfy(|c: char| c.is_ascii_digit()),
        )),
        recognize(satisfy(|c: char| c.is_ascii_digit())),
    ))(i)
}

/// Parses the `reg-name` rule, extended with `ucschar` so that IDN labels
/// survive decomposition and reach the host validator.
fn reg_name<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(many0_count(alt((
        map(
            take_while1(|c: char| is_regname_char(c) || is_ucschar(c)),
            |_| (),
        ),
        map(pct_encoded, |_| ()),
    ))))(i)
}

/// Parses the `path-abempty` rule.
fn path_abempty<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(many0_count(preceded(char_('/'), segment)))(i)
}

/// Parses the `path-absolute` rule.
fn path_absolute<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(preceded(
        char_('/'),
        opt(pair(segment_nz, many0_count(preceded(char_('/'), segment)))),
    ))(i)
}

/// Parses the `path-noscheme` rule.
fn path_noscheme<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        segment_nz_nc,
        many0_count(preceded(char_('/'), segment)),
    ))(i)
}

/// Parses the `path-rootless` rule.
fn path_rootless<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(pair(segment_nz, many0_count(preceded(char_('/'), segment))))(i)
}

/// Parses the `path-empty` rule.
fn path_empty<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    Ok((i, &i[0..0]))
}

/// Parses the `segment` rule.
fn segment<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(many0_count(pchar))(i)
}

/// Parses the `segment-nz` rule.
fn segment_nz<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(many1_count(pchar))(i)
}

/// Parses the `segment-nz-nc` rule.
fn segment_nz_nc<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(many1_count(alt((
        map(
            satisfy(|c: char| is_unreserved(c) || is_sub_delim(c) || c == '@'),
            |_| (),
        ),
        map(pct_encoded, |_| ()),
    ))))(i)
}

/// Parses the `pchar` rule.
fn pchar<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(alt((
        map(satisfy(is_pchar_single), |_| ()),
        map(pct_encoded, |_| ()),
    )))(i)
}

/// Parses the `query` rule.
fn query<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    // The leading `?` was already consumed, so a failure here must fail the
    // whole reference.
    recognize(cut(many0_count(alt((pchar, tag("/"), tag("?"))))))(i)
}

/// Parses the `fragment` rule.
fn fragment<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    // The leading `#` was already consumed, so a failure here must fail the
    // whole reference.
    recognize(cut(many0_count(alt((pchar, tag("/"), tag("?"))))))(i)
}

/// Parses the `pct-encoded` rule.
fn pct_encoded<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, (char, char), E> {
    preceded(char_('%'), cut(pair(hexdig, hexdig)))(i)
}

/// Parses a hex digit.
fn hexdig<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, char, E> {
    satisfy(|c: char| c.is_ascii_hexdigit())(i)
}

#[cfg(test)]
mod tests {
    use nom::combinator::all_consuming;

    use super::*;

    fn decompose(i: &str) -> Option<RawComponents<'_>> {
        all_consuming(uri_reference::<()>)(i)
            .ok()
            .map(|(_rest, components)| components)
    }

    #[test]
    fn absolute_uri_with_authority() {
        let c = decompose("http://user:pw@example.com:8080/a/b?q=1#frag").expect("should parse");
        assert_eq!(c.scheme, Some("http"));
        let auth = c.authority.expect("should have authority");
        assert_eq!(auth.userinfo, Some("user:pw"));
        assert_eq!(auth.host, "example.com");
        assert_eq!(auth.port, Some("8080"));
        assert_eq!(c.path, "/a/b");
        assert_eq!(c.query, Some("q=1"));
        assert_eq!(c.fragment, Some("frag"));
    }

    #[test]
    fn empty_authority() {
        let c = decompose("foo://").expect("should parse");
        let auth = c.authority.expect("authority is present though empty");
        assert_eq!(auth.userinfo, None);
        assert_eq!(auth.host, "");
        assert_eq!(auth.port, None);
        assert_eq!(c.path, "");
    }

    #[test]
    fn rootless_path() {
        let c = decompose("urn:example:animal:ferret").expect("should parse");
        assert_eq!(c.scheme, Some("urn"));
        assert!(c.authority.is_none());
        assert_eq!(c.path, "example:animal:ferret");
    }

    #[test]
    fn relative_reference_rejects_colon_in_first_segment() {
        assert!(decompose("a:b").is_some(), "parses as scheme `a`");
        assert_eq!(decompose("a:b").and_then(|c| c.scheme), Some("a"));
        // `./` makes the colon unambiguous.
        let c = decompose("./a:b").expect("should parse");
        assert_eq!(c.scheme, None);
        assert_eq!(c.path, "./a:b");
    }

    #[test]
    fn bracketed_hosts() {
        for host in ["[2001:db8::7]", "[::ffff:192.0.2.1]", "[v1.fe:d]"] {
            let input = format!("s://{host}/");
            let c = decompose(&input).expect("should parse");
            assert_eq!(c.authority.expect("authority").host, host);
        }
        assert!(decompose("s://[::1").is_none(), "unterminated literal");
        assert!(decompose("s://[zz]").is_none(), "garbage literal");
    }

    #[test]
    fn invalid_percent_encoding_is_rejected()  {
        assert!(decompose("http://example.com/%zz").is_none());
        assert!(decompose("http://example.com/%1").is_none());
        assert!(decompose("%%").is_none());
    }

    #[test]
    fn network_path_reference() {
        let c = decompose("//example.com/path").expect("should parse");
        assert_eq!(c.scheme, None);
        assert_eq!(c.authority.expect("authority").host, "example.com");
        assert_eq!(c.path, "/path");
    }
}
