//! Processor for [RFC 6570] URI Templates (expansion Level 4).
//!
//! [RFC 6570]: https://www.rfc-editor.org/rfc/rfc6570.html
//!
//! # Usage
//!
//! 1. Parse a [`Template`].
//! 2. Fill a [`VariableBag`] with values; scalars, lists and ordered
//!    associative arrays are supported, and scalars of any shape
//!    (booleans, numbers) normalize to strings on insertion.
//! 3. Call [`Template::expand`].
//!
//! # Examples
//!
//! ```
//! use uri_value::template::{Template, VariableBag};
//!
//! let mut bag = VariableBag::new();
//! bag.assign("username", "foo")?;
//! // U+2713 CHECK MARK
//! bag.assign("mark", "\u{2713}")?;
//!
//! let template = Template::parse("/users/{username}{?mark}")?;
//! assert_eq!(template.expand(&bag)?, "/users/foo?mark=%E2%9C%93");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::fmt;
use core::str::FromStr;

mod ast;
mod context;
mod error;
mod expand;
mod parser;

pub use self::context::{Binding, Value, VariableBag};
pub use self::error::{Error, ExpandError};

/// A parsed URI template.
///
/// Holds the original template string plus the ordered, de-duplicated
/// list of variable names appearing in its expressions.
///
/// # Examples
///
/// ```
/// use uri_value::template::Template;
///
/// let template = Template::parse("{count}{/count,list}{?list}")?;
/// assert_eq!(template.variable_names(), ["count", "list"]);
/// # Ok::<_, uri_value::template::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// The validated template string.
    inner: String,
    /// Ordered unique variable names.
    variables: Vec<String>,
}

impl Template {
    /// Parses a URI template.
    ///
    /// # Failures
    ///
    /// Fails on unclosed or empty expressions, characters not allowed in
    /// literals, operators reserved for future extensions, malformed
    /// variable names, and malformed modifiers (including `:N` combined
    /// with `*`).
    pub fn parse(template: &str) -> Result<Self, Error> {
        let variables = parser::validate_and_collect(template)?;
        Ok(Self {
            inner: template.to_owned(),
            variables,
        })
    }

    /// Returns the template as a plain `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the ordered unique variable names of all expressions.
    #[inline]
    #[must_use]
    pub fn variable_names(&self) -> &[String] {
        &self.variables
    }

    /// Expands the template with the given variables.
    ///
    /// Every variable is either bound or skipped: an unbound (or
    /// undefined) variable contributes nothing to the output.
    ///
    /// # Failures
    ///
    /// Fails when a prefix modifier meets a composite value.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::template::{Template, VariableBag};
    ///
    /// let mut bag = VariableBag::new();
    /// bag.assign("list", vec!["red", "green", "blue"])?;
    /// bag.assign("path", "/foo/bar/baz")?;
    ///
    /// let template = Template::parse("{/list*,path:4}")?;
    /// assert_eq!(template.expand(&bag)?, "/red/green/blue/%2Ffoo");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn expand(&self, variables: &VariableBag) -> Result<String, ExpandError> {
        expand::expand(self, variables)
    }
}

impl fmt::Display for Template {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl FromStr for Template {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Template {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Template {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        /// Visitor for a template string.
        struct TemplateVisitor;
        impl serde::de::Visitor<'_> for TemplateVisitor {
            type Value = Template;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a URI template")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Template::parse(v).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_str(TemplateVisitor)
    }
}
