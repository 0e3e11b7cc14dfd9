//! WHATWG IPv4 host normalization.
//!
//! The URL Standard accepts hexadecimal, octal and decimal host "numbers"
//! (e.g. `0x7F.0.0.1` or `0300.0250.0.01`) and reduces them to the
//! dot-decimal form. Hosts that do not match the IPv4 shape are not an
//! error; they are simply left untouched.

use std::borrow::Cow;

use crate::uri::Uri;

/// Normalizes an IPv4-shaped host to dot-decimal notation.
///
/// Returns the input unchanged when it is not an IPv4 host per the WHATWG
/// IPv4 parser (wrong shape, overflowing part, or a part mixing bases).
/// A single trailing dot is tolerated and stripped.
///
/// # Examples
///
/// ```
/// use uri_value::ipv4::normalize_host;
///
/// assert_eq!(normalize_host("0300.0250.0.01"), "192.168.0.1");
/// assert_eq!(normalize_host("0x7F.0.0.1"), "127.0.0.1");
/// assert_eq!(normalize_host("192.168.257"), "192.168.1.1");
/// assert_eq!(normalize_host("example.com"), "example.com");
/// ```
#[must_use]
pub fn normalize_host(host: &str) -> Cow<'_, str> {
    match parse(host) {
        Some(address) => {
            let canonical = to_dot_decimal(address);
            if canonical == host {
                Cow::Borrowed(host)
            } else {
                Cow::Owned(canonical)
            }
        }
        None => Cow::Borrowed(host),
    }
}

/// Normalizes the host of a URI when it is IPv4-shaped.
///
/// URIs without a host, or with a host that is not an IPv4 candidate,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use uri_value::ipv4::normalize_uri;
/// use uri_value::Uri;
///
/// let uri = Uri::parse("http://0xC0.0xA8.0.1/path").unwrap();
/// assert_eq!(normalize_uri(&uri).to_string(), "http://192.168.0.1/path");
/// ```
#[must_use]
pub fn normalize_uri(uri: &Uri) -> Uri {
    match uri.host() {
        Some(host) => match normalize_host(host) {
            Cow::Borrowed(_) => uri.clone(),
            Cow::Owned(canonical) => uri
                .with_host(Some(&canonical))
                .expect("[validity] a dot-decimal IPv4 address is a valid host"),
        },
        None => uri.clone(),
    }
}

/// Parses a host per the WHATWG IPv4 parser.
///
/// Returns `None` when the host is not an IPv4 address.
fn parse(host: &str) -> Option<u32> {
    let trimmed = host.strip_suffix('.').unwrap_or(host);
    if trimmed.is_empty() {
        return None;
    }
    let mut numbers = [0_u64; 4];
    let mut count = 0_usize;
    for part in trimmed.split('.') {
        if count == 4 {
            return None;
        }
        numbers[count] = parse_part(part)?;
        count += 1;
    }

    let last = numbers[count - 1];
    if last >= 256_u64.pow(5 - count as u32) {
        return None;
    }
    let mut address = last;
    for (i, number) in numbers[..count - 1].iter().enumerate() {
        if *number > 255 {
            return None;
        }
        address += number * 256_u64.pow(3 - i as u32);
    }
    Some(address as u32)
}

/// Parses a single IPv4 "number" in its self-selected base.
///
/// `0x` selects hexadecimal, a leading `0` selects octal, anything else
/// is decimal. `0x` alone parses as zero.
fn parse_part(part: &str) -> Option<u64> {
    if part.is_empty() {
        return None;
    }
    let (digits, radix) = if let Some(hex) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        (hex, 16)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8)
    } else {
        (part, 10)
    };
    if digits.is_empty() {
        // `0x` with no digits.
        return Some(0);
    }
    // `from_str_radix` accepts a sign; an IPv4 number must not carry one.
    if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Formats a 32-bit address as `a.b.c.d`.
fn to_dot_decimal(address: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        address >> 24,
        (address >> 16) & 0xFF,
        (address >> 8) & 0xFF,
        address & 0xFF
    )
}
