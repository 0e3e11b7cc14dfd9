//! Tests for origin computation and comparison.

use uri_value::{is_cross_origin, origin, Uri};

/// `(input, origin)` pairs; `None` means "no origin".
const TEST_CASES: &[(&str, Option<&str>)] = &[
    ("http://example.com/", Some("http://example.com")),
    ("http://example.com", Some("http://example.com")),
    ("http://u:p@example.com/p?q#f", Some("http://example.com")),
    ("http://example.com:80/", Some("http://example.com")),
    ("http://example.com:8080/", Some("http://example.com:8080")),
    ("https://example.com:443/", Some("https://example.com")),
    ("https://example.com:80/", Some("https://example.com:80")),
    ("ws://example.com/chat", Some("ws://example.com")),
    ("wss://example.com:443/chat", Some("wss://example.com")),
    ("ftp://ftp.example.com:21/f", Some("ftp://ftp.example.com")),
    ("blob:https://mozilla.org:443/", Some("https://mozilla.org")),
    (
        "blob:https://whatwg.org/d0360e2f-caee-469f-9a2f-87d5b0456f6f",
        Some("https://whatwg.org"),
    ),
    ("blob:d0360e2f-caee-469f-9a2f-87d5b0456f6f", None),
    ("blob:mailto:x@y.example", None),
    ("mailto:x@y.example", None),
    ("urn:isbn:0451450523", None),
    ("file:/etc/hosts", None),
    ("relative/path", None),
    ("//host/no-scheme", None),
];

#[test]
fn origin_cases() {
    for (input, expected) in TEST_CASES {
        let uri = Uri::parse(input).expect("should be a valid URI reference");
        let origin = origin(&uri).map(|origin| origin.to_string());
        assert_eq!(origin.as_deref(), *expected, "input={input:?}");
    }
}

#[test]
fn origin_values_are_already_canonical() {
    for (input, expected) in TEST_CASES {
        let Some(expected) = expected else { continue };
        let uri = Uri::parse(input).expect("valid");
        let origin = origin(&uri).expect("origin should exist");
        assert_eq!(origin.path(), "");
        assert_eq!(origin.userinfo(), None);
        assert_eq!(origin.query(), None);
        assert_eq!(origin.fragment(), None);
        let reparsed = Uri::parse(expected).expect("origin string should parse");
        assert_eq!(reparsed, origin, "input={input:?}");
    }
}

#[test]
fn same_origin_pairs() {
    let pairs = [
        ("http://a/x", "http://a/y?q#f"),
        ("http://a:80/x", "http://a/y"),
        ("https://a/", "blob:https://a/uuid"),
        ("wss://a:443/", "wss://a/"),
    ];
    for (left, right) in pairs {
        let left = Uri::parse(left).expect("valid");
        let right = Uri::parse(right).expect("valid");
        assert!(!is_cross_origin(&left, &right), "{left} vs {right}");
        assert!(!is_cross_origin(&right, &left), "{right} vs {left}");
    }
}

#[test]
fn cross_origin_pairs() {
    let pairs = [
        ("http://a/", "https://a/"),
        ("http://a/", "http://b/"),
        ("http://a/", "http://a:8080/"),
        ("ws://a/", "wss://a/"),
        // No origin on either side means cross-origin.
        ("mailto:x@y", "mailto:x@y"),
        ("urn:a", "http://a/"),
        ("blob:not-a-wrapped-uri", "http://a/"),
    ];
    for (left, right) in pairs {
        let left = Uri::parse(left).expect("valid");
        let right = Uri::parse(right).expect("valid");
        assert!(is_cross_origin(&left, &right), "{left} vs {right}");
        assert!(is_cross_origin(&right, &left), "symmetry: {right} vs {left}");
    }
}
