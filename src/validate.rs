//! Component validators.
//!
//! Each validator consumes a raw string slice and returns the canonical
//! form of the component, or fails. Validators know nothing about whole
//! URIs; cross-component rules (authority shape, scheme-specific
//! restrictions) live with the [`Uri`][`crate::Uri`] constructors.

use core::fmt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::error;

use nom::combinator::all_consuming;

use crate::parser;
use crate::percent_encode::{self, Region};

/// Syntactic region a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Scheme.
    Scheme,
    /// Userinfo (user and password).
    Userinfo,
    /// Host.
    Host,
    /// Port.
    Port,
    /// Path.
    Path,
    /// Query.
    Query,
    /// Fragment.
    Fragment,
}

impl Component {
    /// Returns the lowercase component name.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::Userinfo => "userinfo",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        }
    }
}

/// Component validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// The component that was rejected.
    component: Component,
    /// Whether the rejection was a raw control byte under strict
    /// encoding, rather than a plain syntax mismatch.
    forbidden_control_byte: bool,
}

impl Error {
    /// Creates a new `Error`.
    #[inline]
    pub(crate) fn new(component: Component) -> Self {
        Self {
            component,
            forbidden_control_byte: false,
        }
    }

    /// Creates a new `Error` for an unescaped control byte.
    #[inline]
    pub(crate) fn control_byte(component: Component) -> Self {
        Self {
            component,
            forbidden_control_byte: true,
        }
    }

    /// Returns the rejected component.
    #[inline]
    #[must_use]
    pub fn component(&self) -> Component {
        self.component
    }

    /// Returns `true` when the failure was an unescaped control byte.
    #[inline]
    #[must_use]
    pub fn is_forbidden_control_byte(&self) -> bool {
        self.forbidden_control_byte
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.forbidden_control_byte {
            write!(
                f,
                "control bytes in the {} component must be percent-encoded",
                self.component.name()
            )
        } else {
            write!(f, "invalid {} component", self.component.name())
        }
    }
}

impl error::Error for Error {}

/// Maximum number of memoized scheme acceptances per thread.
const SCHEME_MEMO_CAP: usize = 100;

thread_local! {
    /// Recently accepted schemes, most recent first, in canonical
    /// (lowercase) form. Bounded at [`SCHEME_MEMO_CAP`] entries.
    static SCHEME_MEMO: RefCell<VecDeque<Box<str>>> = const { RefCell::new(VecDeque::new()) };
}

/// Validates a scheme and returns it lowercased.
///
/// Accepted schemes are memoized per thread with LRU eviction; rejections
/// are cheap and never cached.
pub(crate) fn scheme(raw: &str) -> Result<String, Error> {
    let memoized = SCHEME_MEMO.with(|memo| {
        let mut memo = memo.borrow_mut();
        let pos = memo.iter().position(|known| raw.eq_ignore_ascii_case(known))?;
        let entry = memo
            .remove(pos)
            .expect("[validity] the position was just found");
        let canonical = String::from(&*entry);
        memo.push_front(entry);
        Some(canonical)
    });
    if let Some(canonical) = memoized {
        return Ok(canonical);
    }

    let mut chars = raw.chars();
    let first_is_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !first_is_alpha || !rest_ok {
        return Err(Error::new(Component::Scheme));
    }

    let canonical = raw.to_ascii_lowercase();
    SCHEME_MEMO.with(|memo| {
        let mut memo = memo.borrow_mut();
        memo.push_front(canonical.clone().into_boxed_str());
        memo.truncate(SCHEME_MEMO_CAP);
    });
    Ok(canonical)
}

/// Validates a port.
///
/// A leading zero is allowed only on `0` itself.
pub(crate) fn port(raw: &str) -> Result<u16, Error> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::new(Component::Port));
    }
    if raw != "0" && raw.starts_with('0') {
        return Err(Error::new(Component::Port));
    }
    raw.parse::<u16>().map_err(|_| Error::new(Component::Port))
}

/// Validates a host and returns its canonical form.
///
/// Dispatches on the first character: `[` selects the IP-literal rules;
/// otherwise a strict dotted-decimal IPv4 address is tried, and the rest
/// is treated as a reg-name. Non-ASCII reg-names are converted to their
/// A-label (punycode) form.
pub(crate) fn host(raw: &str) -> Result<String, Error> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    if raw.starts_with('[') {
        return match all_consuming(parser::ip_literal::<()>)(raw) {
            Ok(_) => Ok(raw.to_ascii_lowercase()),
            Err(_) => Err(Error::new(Component::Host)),
        };
    }
    if all_consuming(parser::ipv4address::<()>)(raw).is_ok() {
        return Ok(raw.to_owned());
    }
    if raw.is_ascii() {
        return reg_name(raw);
    }
    let ascii = idna::domain_to_ascii(raw).map_err(|_| Error::new(Component::Host))?;
    if ascii.is_empty() {
        return Err(Error::new(Component::Host));
    }
    Ok(ascii)
}

/// Validates an ASCII reg-name and returns it lowercased, with
/// percent-triplets uppercased.
fn reg_name(raw: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw.as_bytes();
    while let Some(&b) = rest.first() {
        if b == b'%' {
            // A `%` must introduce a percent-encoded triplet.
            if rest.len() < 3 || !rest[1].is_ascii_hexdigit() || !rest[2].is_ascii_hexdigit() {
                return Err(Error::new(Component::Host));
            }
            out.push('%');
            out.push(rest[1].to_ascii_uppercase() as char);
            out.push(rest[2].to_ascii_uppercase() as char);
            rest = &rest[3..];
            continue;
        }
        if !crate::parser::char::is_regname_char(b as char) {
            return Err(Error::new(Component::Host));
        }
        out.push(b.to_ascii_lowercase() as char);
        rest = &rest[1..];
    }
    Ok(out)
}

/// Validates a raw userinfo and returns the canonical `(user, password)`
/// pair, split at the first `:`.
pub(crate) fn userinfo(raw: &str) -> Result<(String, Option<String>), Error> {
    let err = || Error::control_byte(Component::Userinfo);
    match raw.split_once(':') {
        Some((user, password)) => {
            let user = percent_encode::encode(Region::Userinfo, user).map_err(|_| err())?;
            let password = percent_encode::encode(Region::Userinfo, password).map_err(|_| err())?;
            Ok((user, Some(password)))
        }
        None => {
            let user = percent_encode::encode(Region::Userinfo, raw).map_err(|_| err())?;
            Ok((user, None))
        }
    }
}

/// Canonicalizes a path.
pub(crate) fn path(raw: &str) -> Result<String, Error> {
    percent_encode::encode(Region::Path, raw).map_err(|_| Error::control_byte(Component::Path))
}

/// Canonicalizes a query.
pub(crate) fn query(raw: &str) -> Result<String, Error> {
    percent_encode::encode(Region::Query, raw).map_err(|_| Error::control_byte(Component::Query))
}

/// Canonicalizes a fragment.
pub(crate) fn fragment(raw: &str) -> Result<String, Error> {
    percent_encode::encode(Region::Fragment, raw)
        .map_err(|_| Error::control_byte(Component::Fragment))
}
