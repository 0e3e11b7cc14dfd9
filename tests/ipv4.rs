//! Tests for WHATWG IPv4 host normalization.

use uri_value::ipv4::{normalize_host, normalize_uri};
use uri_value::Uri;

/// `(input, normalized)` pairs. Inputs that are not IPv4 candidates map
/// to themselves.
const TEST_CASES: &[(&str, &str)] = &[
    ("0300.0250.0.01", "192.168.0.1"),
    ("0x7F.0.0.1", "127.0.0.1"),
    ("0xff.0xFF.0Xff.0xfF", "255.255.255.255"),
    ("192.168.257", "192.168.1.1"),
    ("127.1", "127.0.0.1"),
    ("0x7F000001", "127.0.0.1"),
    ("2130706433", "127.0.0.1"),
    ("0", "0.0.0.0"),
    ("0x", "0.0.0.0"),
    ("192.168.0.1.", "192.168.0.1"),
    ("0351.0xa8.0.01.", "233.168.0.1"),
    ("4294967295", "255.255.255.255"),
    // Not IPv4: unchanged.
    ("example.com", "example.com"),
    ("a.0.0.1", "a.0.0.1"),
    ("0x7F.0.0.0x1g", "0x7F.0.0.0x1g"),
    ("1.2.3.4.5", "1.2.3.4.5"),
    ("1..2", "1..2"),
    ("4294967296", "4294967296"),
    ("1.2.3.256", "1.2.3.256"),
    ("08.1.1.1", "08.1.1.1"),
    ("", ""),
    (".", "."),
    ("192.168.0.1..", "192.168.0.1.."),
];

#[test]
fn normalize_host_cases() {
    for (input, expected) in TEST_CASES {
        assert_eq!(normalize_host(input), *expected, "input={input:?}");
    }
}

#[test]
fn normalize_host_is_idempotent() {
    for (input, _expected) in TEST_CASES {
        let once = normalize_host(input).into_owned();
        assert_eq!(normalize_host(&once), once, "input={input:?}");
    }
}

#[test]
fn normalize_uri_rewrites_only_ipv4_hosts() {
    let uri = Uri::parse("http://0x7F.0.0.1:8080/a?q#f").expect("valid");
    assert_eq!(
        normalize_uri(&uri).to_string(),
        "http://127.0.0.1:8080/a?q#f"
    );

    let untouched = Uri::parse("http://example.com/a").expect("valid");
    assert_eq!(normalize_uri(&untouched), untouched);

    let hostless = Uri::parse("mailto:a@b.example").expect("valid");
    assert_eq!(normalize_uri(&hostless), hostless);
}
