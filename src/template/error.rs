//! Template errors.

use core::fmt;
use std::error;

/// Template parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// What went wrong.
    kind: ErrorKind,
    /// Byte position the failure was detected at.
    location: usize,
}

impl Error {
    /// Creates a new `Error`.
    #[inline]
    pub(super) fn new(kind: ErrorKind, location: usize) -> Self {
        Self { kind, location }
    }

    /// Returns the byte position the failure was detected at.
    #[inline]
    #[must_use]
    pub fn location(&self) -> usize {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::ExpressionNotClosed => "expression is not closed",
            ErrorKind::InvalidLiteral => "invalid character in literal",
            ErrorKind::EmptyExpression => "expression is empty",
            ErrorKind::UnsupportedOperator => "operator is reserved for future extensions",
            ErrorKind::InvalidVarname => "invalid variable name",
            ErrorKind::InvalidMaxLength => "invalid max-length modifier",
            ErrorKind::PrefixWithExplode => "prefix and explode modifiers are exclusive",
        };
        write!(f, "invalid URI template: {msg} (at byte {})", self.location)
    }
}

impl error::Error for Error {}

/// Template parse failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ErrorKind {
    /// `{` without a matching `}`.
    ExpressionNotClosed,
    /// Character not allowed in a literal.
    InvalidLiteral,
    /// `{}` or an expression without varspecs.
    EmptyExpression,
    /// One of the `op-reserve` operators (`=`, `,`, `!`, `@`, `|`).
    UnsupportedOperator,
    /// Variable name does not match `varname`.
    InvalidVarname,
    /// Max-length not in 1..=9999.
    InvalidMaxLength,
    /// `:N` combined with `*`.
    PrefixWithExplode,
}

/// Template expansion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandError {
    /// What went wrong.
    kind: ExpandErrorKind,
}

impl ExpandError {
    /// Creates a new `ExpandError`.
    #[inline]
    pub(super) fn new(kind: ExpandErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ExpandErrorKind::NestedValue => {
                f.write_str("sequences cannot nest inside a template value")
            }
            ExpandErrorKind::PrefixOnComposite => {
                f.write_str("prefix modifier is not applicable to composite values")
            }
        }
    }
}

impl error::Error for ExpandError {}

/// Expansion failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ExpandErrorKind {
    /// A list or an associative array nested inside another one.
    NestedValue,
    /// `:N` applied to a list or an associative array.
    PrefixOnComposite,
}
