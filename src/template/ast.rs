//! Template expression components.
//!
//! The owning [`Template`][`super::Template`] string is validated once at
//! creation, so re-reading an expression during expansion can use the
//! infallible `*_trusted` constructors here.

/// Expression body, without the wrapping braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ExprBody<'a>(&'a str);

impl<'a> ExprBody<'a> {
    /// Wraps a trusted expression body.
    #[inline]
    #[must_use]
    pub(super) fn new(body: &'a str) -> Self {
        Self(body)
    }

    /// Splits the body into the operator and the variable list.
    #[must_use]
    pub(super) fn decompose(self) -> (Operator, VarListIter<'a>) {
        match self.0.bytes().next().and_then(Operator::from_byte) {
            Some(operator) => (operator, VarListIter { rest: &self.0[1..] }),
            None => (Operator::String, VarListIter { rest: self.0 }),
        }
    }
}

/// Iterator over the varspecs of an expression.
#[derive(Debug, Clone)]
pub(super) struct VarListIter<'a> {
    /// Remaining comma-separated varspecs.
    rest: &'a str,
}

impl<'a> Iterator for VarListIter<'a> {
    type Item = VarSpec<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let spec = match self.rest.split_once(',') {
            Some((spec, rest)) => {
                self.rest = rest;
                spec
            }
            None => core::mem::take(&mut self.rest),
        };
        Some(VarSpec::parse_trusted(spec))
    }
}

/// Variable specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VarSpec<'a> {
    /// Variable name.
    name: &'a str,
    /// Modifier.
    modifier: Modifier,
}

impl<'a> VarSpec<'a> {
    /// Returns the variable name.
    #[inline]
    #[must_use]
    pub(super) fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the modifier.
    #[inline]
    #[must_use]
    pub(super) fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Parses a trusted varspec string.
    #[must_use]
    pub(super) fn parse_trusted(spec: &'a str) -> Self {
        if let Some(name) = spec.strip_suffix('*') {
            return Self {
                name,
                modifier: Modifier::Explode,
            };
        }
        match spec.split_once(':') {
            Some((name, max_len)) => {
                let max_len: u16 = max_len
                    .parse()
                    .expect("[validity] templates are validated at creation");
                Self {
                    name,
                    modifier: Modifier::MaxLen(max_len),
                }
            }
            None => Self {
                name: spec,
                modifier: Modifier::None,
            },
        }
    }
}

/// Variable modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Modifier {
    /// No modifier.
    None,
    /// Max length, in 1..=9999.
    MaxLen(u16),
    /// Explode (`*`).
    Explode,
}

/// Expression operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operator {
    /// No operator: simple string expansion.
    String,
    /// Reserved expansion (`+`).
    Reserved,
    /// Fragment expansion (`#`).
    Fragment,
    /// Label expansion (`.`).
    Label,
    /// Path segment expansion (`/`).
    PathSegments,
    /// Path-style parameter expansion (`;`).
    PathParams,
    /// Form-style query expansion (`?`).
    FormQuery,
    /// Form-style query continuation (`&`).
    FormQueryCont,
}

impl Operator {
    /// Returns the operator for the given byte.
    #[must_use]
    pub(super) fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Self::Reserved),
            b'#' => Some(Self::Fragment),
            b'.' => Some(Self::Label),
            b'/' => Some(Self::PathSegments),
            b';' => Some(Self::PathParams),
            b'?' => Some(Self::FormQuery),
            b'&' => Some(Self::FormQueryCont),
            _ => None,
        }
    }

    /// Checks if the byte is an operator reserved for future extensions.
    #[must_use]
    pub(super) fn is_reserved_for_future(b: u8) -> bool {
        matches!(b, b'=' | b',' | b'!' | b'@' | b'|')
    }
}
