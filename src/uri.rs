//! URI value type.

use core::fmt;
use core::str::FromStr;
use std::error;

use crate::parser::{self, RawComponents};
use crate::validate::{self, Component};

/// Schemes which require a non-empty host whenever an authority is present.
const HOST_REQUIRING_SCHEMES: &[&str] = &["file", "ftp", "http", "https", "ws", "wss"];

/// URI creation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    /// What was rejected.
    kind: SyntaxErrorKind,
}

/// Reason a reference or a component bundle was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyntaxErrorKind {
    /// The string does not match the `URI-reference` grammar.
    Malformed,
    /// A component failed validation.
    Component(Component),
    /// A raw control byte appeared where only escaped ones are allowed.
    ForbiddenControlByte,
    /// Userinfo without a host.
    UserinfoWithoutHost,
    /// Port without a host.
    PortWithoutHost,
    /// Path shape incompatible with the presence (or absence) of an
    /// authority.
    PathShape,
    /// Scheme-less reference whose first path segment contains a colon.
    ColonInFirstSegment,
    /// The scheme requires a non-empty host.
    EmptyHost,
    /// `data:` path is not `mediatype ("," data)?`.
    DataMediatype,
}

impl SyntaxError {
    /// Creates a new `SyntaxError`.
    #[inline]
    pub(crate) fn new(kind: SyntaxErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the rejected component, if the failure was a component
    /// validation failure.
    #[must_use]
    pub fn component(&self) -> Option<Component> {
        match self.kind {
            SyntaxErrorKind::Component(component) => Some(component),
            _ => None,
        }
    }
}

impl From<validate::Error> for SyntaxError {
    fn from(e: validate::Error) -> Self {
        if e.is_forbidden_control_byte() {
            Self::new(SyntaxErrorKind::ForbiddenControlByte)
        } else {
            Self::new(SyntaxErrorKind::Component(e.component()))
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SyntaxErrorKind::Malformed => f.write_str("not a valid URI reference"),
            SyntaxErrorKind::Component(component) => {
                write!(f, "invalid {} component", component.name())
            }
            SyntaxErrorKind::ForbiddenControlByte => {
                f.write_str("control bytes must be percent-encoded")
            }
            SyntaxErrorKind::UserinfoWithoutHost => f.write_str("userinfo requires a host"),
            SyntaxErrorKind::PortWithoutHost => f.write_str("port requires a host"),
            SyntaxErrorKind::PathShape => {
                f.write_str("path shape conflicts with the authority component")
            }
            SyntaxErrorKind::ColonInFirstSegment => f.write_str(
                "first path segment of a scheme-less reference cannot contain `:` \
                 (prepend `./`)",
            ),
            SyntaxErrorKind::EmptyHost => f.write_str("the scheme requires a non-empty host"),
            SyntaxErrorKind::DataMediatype => {
                f.write_str("`data:` path must be `mediatype (\",\" data)?`")
            }
        }
    }
}

impl error::Error for SyntaxError {}

/// Userinfo subcomponent, split at the first `:` into a user and an
/// optional password.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Userinfo {
    /// User. Never contains a raw `:`.
    user: String,
    /// Password. May contain `:`.
    password: Option<String>,
}

impl Userinfo {
    /// Returns the user.
    #[inline]
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password, if any.
    #[inline]
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Display for Userinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user)?;
        if let Some(password) = &self.password {
            write!(f, ":{password}")?;
        }
        Ok(())
    }
}

/// An immutable URI reference, decomposed into canonical components.
///
/// Every constructor validates and canonicalizes: the scheme and the ASCII
/// part of the host are lowercased, percent-triplets are uppercased,
/// non-ASCII hosts become A-labels, and cross-component invariants (e.g.
/// "no port without a host") are enforced. A `Uri` value therefore never
/// changes after construction and its [`Display`][`core::fmt::Display`]
/// form is the canonical RFC 3986 recomposition.
///
/// # Examples
///
/// ```
/// use uri_value::Uri;
///
/// let uri = Uri::parse("HTTP://User@Example.COM:8080/a/./b?q#frag")?;
/// assert_eq!(uri.scheme(), Some("http"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some(8080));
/// // Dot segments are kept; resolution and normalization remove them.
/// assert_eq!(uri.path(), "/a/./b");
/// assert_eq!(uri.to_string(), "http://User@example.com:8080/a/./b?q#frag");
/// # Ok::<_, uri_value::SyntaxError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uri {
    /// Scheme, lowercase.
    scheme: Option<String>,
    /// Userinfo. `Some` implies `host` is `Some`.
    userinfo: Option<Userinfo>,
    /// Host. `None` means "no authority"; `Some("")` is an empty host.
    host: Option<String>,
    /// Port. `Some` implies `host` is `Some`.
    port: Option<u16>,
    /// Path. Always present, possibly empty.
    path: String,
    /// Query, without the leading `?`.
    query: Option<String>,
    /// Fragment, without the leading `#`.
    fragment: Option<String>,
}

impl Uri {
    /// Parses a URI reference.
    ///
    /// # Failures
    ///
    /// Fails when the string does not match the RFC 3986 `URI-reference`
    /// grammar, when a component is invalid for its region, or when a
    /// scheme-specific rule is violated (`data:` path shape; empty host
    /// on `http`-family and `file` URIs).
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::Uri;
    ///
    /// assert!(Uri::parse("http://example.com/").is_ok());
    /// assert!(Uri::parse("//example.com/no-scheme").is_ok());
    /// assert!(Uri::parse("relative/reference").is_ok());
    /// assert!(Uri::parse("http://exa mple.com/").is_err());
    /// assert!(Uri::parse("http:///empty-host").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let raw = parser::decompose(input)
            .ok_or_else(|| SyntaxError::new(SyntaxErrorKind::Malformed))?;
        Self::from_raw(&raw)
    }

    /// Builds a `Uri` from validated raw components.
    fn from_raw(raw: &RawComponents<'_>) -> Result<Self, SyntaxError> {
        let scheme = raw.scheme.map(validate::scheme).transpose()?;
        let (userinfo, host, port) = match raw.authority {
            Some(authority) => {
                let userinfo = authority
                    .userinfo
                    .map(|ui| {
                        validate::userinfo(ui).map(|(user, password)| Userinfo { user, password })
                    })
                    .transpose()?;
                let host = validate::host(authority.host)?;
                let port = match authority.port {
                    Some("") | None => None,
                    Some(digits) => Some(validate::port(digits)?),
                };
                (userinfo, Some(host), port)
            }
            None => (None, None, None),
        };
        let path = validate::path(raw.path)?;
        let query = raw.query.map(validate::query).transpose()?;
        let fragment = raw.fragment.map(validate::fragment).transpose()?;

        let uri = Self {
            scheme,
            userinfo,
            host,
            port,
            path,
            query,
            fragment,
        };
        uri.check_rules()?;
        Ok(uri)
    }

    /// Assembles a `Uri` from already-canonical components.
    ///
    /// The resolver and the relativizer only ever recombine components of
    /// existing `Uri` values, so no re-validation happens here; only the
    /// authority-vs-`//` path ambiguity needs active protection.
    pub(crate) fn from_trusted_components(
        scheme: Option<String>,
        userinfo: Option<Userinfo>,
        host: Option<String>,
        port: Option<u16>,
        path: String,
        query: Option<String>,
        fragment: Option<String>,
    ) -> Self {
        let path = if host.is_none() && path.starts_with("//") {
            // A path cannot start with `//` without an authority; `/.`
            // keeps the recomposition unambiguous.
            format!("/.{path}")
        } else if scheme.is_none()
            && host.is_none()
            && path.split('/').next().unwrap_or("").contains(':')
        {
            // Dot-segment removal on a scheme-less target may surface a
            // colon into the first segment; `./` disambiguates it from a
            // scheme.
            format!("./{path}")
        } else {
            path
        };
        Self {
            scheme,
            userinfo,
            host,
            port,
            path,
            query,
            fragment,
        }
    }

    /// Returns a builder for assembling a URI from components.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::Uri;
    ///
    /// let uri = Uri::builder()
    ///     .scheme("https")
    ///     .host("Example.COM")
    ///     .path("/a b")
    ///     .query("k=v")
    ///     .build()?;
    /// assert_eq!(uri.to_string(), "https://example.com/a%20b?k=v");
    /// # Ok::<_, uri_value::SyntaxError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn builder() -> UriBuilder {
        UriBuilder::default()
    }

    /// Checks cross-component and scheme-specific rules.
    fn check_rules(&self) -> Result<(), SyntaxError> {
        if self.host.is_none() {
            if self.userinfo.is_some() {
                return Err(SyntaxError::new(SyntaxErrorKind::UserinfoWithoutHost));
            }
            if self.port.is_some() {
                return Err(SyntaxError::new(SyntaxErrorKind::PortWithoutHost));
            }
            if self.path.starts_with("//") {
                return Err(SyntaxError::new(SyntaxErrorKind::PathShape));
            }
        } else if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(SyntaxError::new(SyntaxErrorKind::PathShape));
        }
        if self.scheme.is_none() {
            let first_segment = self.path.split('/').next().unwrap_or("");
            if first_segment.contains(':') {
                return Err(SyntaxError::new(SyntaxErrorKind::ColonInFirstSegment));
            }
        }
        if let (Some(scheme), Some(host)) = (&self.scheme, &self.host) {
            if host.is_empty() && HOST_REQUIRING_SCHEMES.contains(&scheme.as_str()) {
                return Err(SyntaxError::new(SyntaxErrorKind::EmptyHost));
            }
        }
        if self.scheme.as_deref() == Some("data") {
            check_data_path(&self.path)?;
        }
        Ok(())
    }

    /// Returns the scheme.
    #[inline]
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the userinfo.
    #[inline]
    #[must_use]
    pub fn userinfo(&self) -> Option<&Userinfo> {
        self.userinfo.as_ref()
    }

    /// Returns the user part of the userinfo.
    #[inline]
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.userinfo.as_ref().map(Userinfo::user)
    }

    /// Returns the password part of the userinfo.
    #[inline]
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.userinfo.as_ref().and_then(Userinfo::password)
    }

    /// Returns the host.
    ///
    /// `None` means the URI has no authority; `Some("")` is an authority
    /// with an empty host (e.g. `foo:///`).
    #[inline]
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query, without the leading `?`.
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the fragment, without the leading `#`.
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the recomposed authority, without the leading `//`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// assert_eq!(uri.authority().as_deref(), Some("user@example.com:8080"));
    /// assert_eq!(Uri::parse("mailto:a@b.example")?.authority(), None);
    /// # Ok::<_, uri_value::SyntaxError>(())
    /// ```
    #[must_use]
    pub fn authority(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let mut out = String::new();
        if let Some(userinfo) = &self.userinfo {
            out.push_str(&userinfo.to_string());
            out.push('@');
        }
        out.push_str(host);
        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        Some(out)
    }

    /// Returns `true` if the URI has a scheme.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns a new URI with the given scheme, or without one.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(
    ///     uri.with_scheme(Some("HTTPS"))?.to_string(),
    ///     "https://example.com/"
    /// );
    /// # Ok::<_, uri_value::SyntaxError>(())
    /// ```
    pub fn with_scheme(&self, scheme: Option<&str>) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.scheme = scheme.map(validate::scheme).transpose()?;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Returns a new URI with the given raw userinfo, split at the first
    /// `:` and percent-encoded as needed.
    pub fn with_userinfo(&self, userinfo: Option<&str>) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.userinfo = userinfo
            .map(|raw| validate::userinfo(raw).map(|(user, password)| Userinfo { user, password }))
            .transpose()?;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Returns a new URI with the given host.
    ///
    /// Accepts reg-names (IDN labels included), dotted-decimal IPv4
    /// addresses and bracketed IP literals.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(
    ///     uri.with_host(Some("Bücher.example"))?.to_string(),
    ///     "http://xn--bcher-kva.example/"
    /// );
    /// # Ok::<_, uri_value::SyntaxError>(())
    /// ```
    pub fn with_host(&self, host: Option<&str>) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.host = host.map(validate::host).transpose()?;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Returns a new URI with the given port.
    pub fn with_port(&self, port: Option<u16>) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.port = port;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Returns a new URI with the given raw path, percent-encoded as
    /// needed.
    ///
    /// The path must stay compatible with the authority: with an
    /// authority it must be empty or start with `/`; without one it must
    /// not start with `//`, and on a scheme-less reference its first
    /// segment must not contain `:`.
    pub fn with_path(&self, path: &str) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.path = validate::path(path)?;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Returns a new URI with the given raw query, percent-encoded as
    /// needed.
    pub fn with_query(&self, query: Option<&str>) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.query = query.map(validate::query).transpose()?;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Returns a new URI with the given raw fragment, percent-encoded as
    /// needed.
    pub fn with_fragment(&self, fragment: Option<&str>) -> Result<Self, SyntaxError> {
        let mut uri = self.clone();
        uri.fragment = fragment.map(validate::fragment).transpose()?;
        uri.check_rules()?;
        Ok(uri)
    }

    /// Resolves the given reference against this base.
    ///
    /// See [`resolve()`][`crate::resolve()`].
    #[inline]
    #[must_use]
    pub fn resolve(&self, reference: &Uri) -> Uri {
        crate::resolve::resolve(self, reference)
    }

    /// Parses the given string and resolves it against this base.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::Uri;
    ///
    /// let base = Uri::parse("http://example.com/a/b")?;
    /// assert_eq!(base.join("../c")?.to_string(), "http://example.com/c");
    /// # Ok::<_, uri_value::SyntaxError>(())
    /// ```
    pub fn join(&self, reference: &str) -> Result<Uri, SyntaxError> {
        Ok(crate::resolve::resolve(self, &Uri::parse(reference)?))
    }

    /// Relativizes the given target against this base.
    ///
    /// See [`relativize`][`crate::relativize`].
    #[inline]
    #[must_use]
    pub fn relativize(&self, target: &Uri) -> Uri {
        crate::relative::relativize(self, target)
    }

    /// Returns the canonical document-equivalence form.
    ///
    /// See [`normalize()`][`crate::normalize()`].
    #[inline]
    #[must_use]
    pub fn normalize(&self) -> String {
        crate::normalize::normalize(self)
    }

    /// Returns the origin of this URI, if it has one.
    ///
    /// See [`origin()`][`crate::origin()`].
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Option<Uri> {
        crate::origin::origin(self)
    }
}

/// Checks that a `data:` URI path is `mediatype ("," data)?`.
fn check_data_path(path: &str) -> Result<(), SyntaxError> {
    let err = || SyntaxError::new(SyntaxErrorKind::DataMediatype);
    let mediatype = path.split(',').next().unwrap_or(path);
    let mediatype = mediatype.strip_suffix(";base64").unwrap_or(mediatype);
    if mediatype.is_empty() {
        // RFC 2397 defaults the mediatype to `text/plain;charset=US-ASCII`.
        return Ok(());
    }
    let mut pieces = mediatype.split(';');
    let essence = pieces.next().unwrap_or("");
    let (ty, subtype) = essence.split_once('/').ok_or_else(err)?;
    if !is_mediatype_token(ty) || !is_mediatype_token(subtype) {
        return Err(err());
    }
    for parameter in pieces {
        let (attribute, value) = parameter.split_once('=').ok_or_else(err)?;
        if !is_mediatype_token(attribute) || !is_parameter_value(value) {
            return Err(err());
        }
    }
    Ok(())
}

/// Checks an RFC 2045 `token`.
fn is_mediatype_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')'
                        | b'<'
                        | b'>'
                        | b'@'
                        | b','
                        | b';'
                        | b':'
                        | b'\\'
                        | b'"'
                        | b'/'
                        | b'['
                        | b']'
                        | b'?'
                        | b'='
                )
        })
}

/// Checks a mediatype parameter value (token, possibly percent-encoded).
fn is_parameter_value(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_graphic() && !matches!(b, b';' | b','))
}

impl fmt::Display for Uri {
    /// Recomposes the components per RFC 3986 section 5.3.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(userinfo) = &self.userinfo {
                write!(f, "{userinfo}@")?;
            }
            f.write_str(host)?;
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = SyntaxError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = SyntaxError;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        /// Visitor for a URI string.
        struct UriVisitor;
        impl serde::de::Visitor<'_> for UriVisitor {
            type Value = Uri;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a URI reference")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Uri::parse(v).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_str(UriVisitor)
    }
}

/// Component-wise URI builder.
///
/// Raw strings given to the builder are validated and canonicalized by
/// [`build`][`UriBuilder::build`], with the same rules as
/// [`Uri::parse`].
#[derive(Default, Debug, Clone)]
pub struct UriBuilder {
    /// Raw scheme.
    scheme: Option<String>,
    /// Raw userinfo.
    userinfo: Option<String>,
    /// Raw host.
    host: Option<String>,
    /// Port.
    port: Option<u16>,
    /// Raw path.
    path: String,
    /// Raw query.
    query: Option<String>,
    /// Raw fragment.
    fragment: Option<String>,
}

impl UriBuilder {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: &str) -> Self {
        self.scheme = Some(scheme.to_owned());
        self
    }

    /// Sets the userinfo (raw `user[:password]`).
    #[must_use]
    pub fn userinfo(mut self, userinfo: &str) -> Self {
        self.userinfo = Some(userinfo.to_owned());
        self
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_owned());
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_owned();
        self
    }

    /// Sets the query (without the leading `?`).
    #[must_use]
    pub fn query(mut self, query: &str) -> Self {
        self.query = Some(query.to_owned());
        self
    }

    /// Sets the fragment (without the leading `#`).
    #[must_use]
    pub fn fragment(mut self, fragment: &str) -> Self {
        self.fragment = Some(fragment.to_owned());
        self
    }

    /// Validates the components and assembles a [`Uri`].
    pub fn build(self) -> Result<Uri, SyntaxError> {
        let scheme = self.scheme.as_deref().map(validate::scheme).transpose()?;
        let userinfo = self
            .userinfo
            .as_deref()
            .map(|raw| {
                validate::userinfo(raw).map(|(user, password)| Userinfo { user, password })
            })
            .transpose()?;
        let host = self.host.as_deref().map(validate::host).transpose()?;
        let path = validate::path(&self.path)?;
        let query = self.query.as_deref().map(validate::query).transpose()?;
        let fragment = self
            .fragment
            .as_deref()
            .map(validate::fragment)
            .transpose()?;

        let uri = Uri {
            scheme,
            userinfo,
            host,
            port: self.port,
            path,
            query,
            fragment,
        };
        uri.check_rules()?;
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_shapes() {
        assert!(Uri::parse("data:,A%20brief%20note").is_ok());
        assert!(Uri::parse("data:text/plain;charset=US-ASCII,hello").is_ok());
        assert!(Uri::parse("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(Uri::parse("data:;base64,aGk=").is_ok());
        assert!(Uri::parse("data:").is_ok());
        assert!(Uri::parse("data:text,hi").is_err(), "no subtype");
        assert!(Uri::parse("data:text/plain;charset,hi").is_err(), "bare attribute");
        assert!(Uri::parse("data:/plain,hi").is_err(), "empty type");
    }

    #[test]
    fn empty_host_is_rejected_for_host_requiring_schemes() {
        for input in ["http://", "https:///p", "ws://?q", "file:///etc/passwd", "ftp://"] {
            assert!(Uri::parse(input).is_err(), "input={input:?}");
        }
        // Non-special schemes may carry an empty host.
        assert!(Uri::parse("foo:///p").is_ok());
        // And `file:` without an authority is fine.
        assert!(Uri::parse("file:/etc/passwd").is_ok());
    }

    #[test]
    fn builder_requires_consistent_authority() {
        assert!(Uri::builder().port(80).build().is_err());
        assert!(Uri::builder().userinfo("u").build().is_err());
        assert!(Uri::builder().host("h").path("rel").build().is_err());
        assert!(Uri::builder().path("//x").build().is_err());
        assert!(Uri::builder().path("a:b").build().is_err());
        assert!(Uri::builder().scheme("s").path("a:b").build().is_ok());
        assert!(Uri::builder().path("./a:b").build().is_ok());
    }

    #[test]
    fn with_port_requires_host() {
        let uri = Uri::parse("mailto:a@b.example").unwrap();
        assert!(uri.with_port(Some(25)).is_err());
    }
}
