//! Tests for relativization.

use uri_value::{is_same_document, relativize, resolve, Uri};

/// `(base, target, expected)` triples.
const TEST_CASES: &[(&str, &str, &str)] = &[
    (
        "http://www.example.com",
        "http://www.example.com/?foo=toto#~typo",
        "/?foo=toto#~typo",
    ),
    ("http://a/b/c/d;p?q", "http://a/b/c/g;x?y#s", "g;x?y#s"),
    ("http://a/b/c/d;p?q", "http://a/g", "../../g"),
    ("http://a/b/c/d;p?q", "http://a/b/c/d;p?q", ""),
    ("http://a/b/c/d;p?q", "http://a/b/c/d;p?y", "?y"),
    ("http://a/b/c/d;p?q", "http://a/b/c/d;p?q#s", "#s"),
    ("http://a/b/c/d;p?q", "http://a/b/c/d;p", "d;p"),
    ("http://a/b/c/d;p?q", "http://a/b/c/", "./"),
    ("http://a/b/c/d;p?q", "http://a/b/", "../"),
    ("http://a/b/c/d", "http://a/b/c/x/y", "x/y"),
    ("http://a/b/", "http://a/b/g:h", "./g:h"),
    ("http://a/b/c", "http://a/x/y?q#f", "../x/y?q#f"),
    // Not relativizable: returned unchanged.
    ("http://a/", "http://b/", "http://b/"),
    ("https://a/", "http://a/", "http://a/"),
    ("http://a/", "http://a:8080/", "http://a:8080/"),
    ("http://u@a/", "http://a/", "http://a/"),
    ("http://a/b", "x/y", "x/y"),
];

#[test]
fn relativize_cases() {
    for (base, target, expected) in TEST_CASES {
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
fn resolve_undoes_relativize() {
    for (base, target, _expected) in TEST_CASES {
        let base = Uri::parse(base).expect("should be a valid base");
        let target = Uri::parse(target).expect("should be a valid target");
        if target.scheme().is_none() && target.host().is_none() {
            // Relativization does not apply; no round-trip to check.
            continue;
        }
        let reference = relativize(&base, &target);
        let round_tripped = resolve(&base, &reference);
        assert!(
            is_same_document(&round_tripped, &target),
            "base={base}, target={target}, reference={reference}, \
             round_tripped={round_tripped}"
        );
        assert_eq!(
            round_tripped.fragment(),
            target.fragment(),
            "base={base}, target={target}"
        );
    }
}

#[test]
fn deep_trees_walk_up_with_dot_dot() {
    let base = Uri::parse("http://h/a/b/c/d/e").expect("valid");
    let target = Uri::parse("http://h/a/x").expect("valid");
    let reference = relativize(&base, &target);
    assert_eq!(reference.to_string(), "../../../x");
    assert_eq!(resolve(&base, &reference), target);
}

#[test]
fn method_form() {
    let base = Uri::parse("http://example.com/a/b").expect("valid");
    let target = Uri::parse("http://example.com/a/c").expect("valid");
    assert_eq!(base.relativize(&target).to_string(), "c");
}
