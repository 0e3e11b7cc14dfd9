//! Expansion.

use core::fmt::Write as _;
use core::mem;

use crate::parser::char::{is_reserved, is_unreserved};
use crate::template::ast::{ExprBody, Modifier, Operator};
use crate::template::context::{Binding, VariableBag};
use crate::template::error::{ExpandError, ExpandErrorKind};
use crate::template::Template;

/// A chunk in a template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    /// Literal.
    Literal(&'a str),
    /// Expression, without the wrapping braces.
    Expr(ExprBody<'a>),
}

/// Iterator of template chunks.
#[derive(Debug, Clone)]
struct Chunks<'a> {
    /// Remaining template.
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find('{') {
            Some(0) => {
                let close = self.rest[1..]
                    .find('}')
                    .expect("[validity] expressions in a template are closed");
                let body = &self.rest[1..=close];
                self.rest = &self.rest[close + 2..];
                Some(Chunk::Expr(ExprBody::new(body)))
            }
            Some(open) => {
                let (literal, rest) = self.rest.split_at(open);
                self.rest = rest;
                Some(Chunk::Literal(literal))
            }
            None => Some(Chunk::Literal(mem::take(&mut self.rest))),
        }
    }
}

/// Properties of an operator.
///
/// See [RFC 6570 Appendix A](https://www.rfc-editor.org/rfc/rfc6570#appendix-A).
#[derive(Debug, Clone, Copy)]
struct OpProps {
    /// Prefix for the first element.
    first: &'static str,
    /// Separator.
    sep: &'static str,
    /// Whether the expansion includes the variable or key name.
    named: bool,
    /// Trailing string for an empty named value.
    ifemp: &'static str,
    /// Whether reserved characters pass through unencoded.
    allow_reserved: bool,
}

impl OpProps {
    /// Simple string expansion.
    const STRING: Self = Self {
        first: "",
        sep: ",",
        named: false,
        ifemp: "",
        allow_reserved: false,
    };
    /// Reserved expansion (`+`).
    const RESERVED: Self = Self {
        first: "",
        sep: ",",
        named: false,
        ifemp: "",
        allow_reserved: true,
    };
    /// Fragment expansion (`#`).
    const FRAGMENT: Self = Self {
        first: "#",
        sep: ",",
        named: false,
        ifemp: "",
        allow_reserved: true,
    };
    /// Label expansion (`.`).
    const LABEL: Self = Self {
        first: ".",
        sep: ".",
        named: false,
        ifemp: "",
        allow_reserved: false,
    };
    /// Path segment expansion (`/`).
    const PATH_SEGMENTS: Self = Self {
        first: "/",
        sep: "/",
        named: false,
        ifemp: "",
        allow_reserved: false,
    };
    /// Path-style parameter expansion (`;`).
    const PATH_PARAMS: Self = Self {
        first: ";",
        sep: ";",
        named: true,
        ifemp: "",
        allow_reserved: false,
    };
    /// Form-style query expansion (`?`).
    const FORM_QUERY: Self = Self {
        first: "?",
        sep: "&",
        named: true,
        ifemp: "=",
        allow_reserved: false,
    };
    /// Form-style query continuation (`&`).
    const FORM_QUERY_CONT: Self = Self {
        first: "&",
        sep: "&",
        named: true,
        ifemp: "=",
        allow_reserved: false,
    };

    /// Returns the properties for the operator.
    #[must_use]
    fn from_op(op: Operator) -> &'static Self {
        match op {
            Operator::String => &Self::STRING,
            Operator::Reserved => &Self::RESERVED,
            Operator::Fragment => &Self::FRAGMENT,
            Operator::Label => &Self::LABEL,
            Operator::PathSegments => &Self::PATH_SEGMENTS,
            Operator::PathParams => &Self::PATH_PARAMS,
            Operator::FormQuery => &Self::FORM_QUERY,
            Operator::FormQueryCont => &Self::FORM_QUERY_CONT,
        }
    }
}

/// Expands the template against the bag.
pub(super) fn expand(template: &Template, bag: &VariableBag) -> Result<String, ExpandError> {
    let mut out = String::new();
    let chunks = Chunks {
        rest: template.as_str(),
    };
    for chunk in chunks {
        match chunk {
            Chunk::Literal(literal) => write_value(&mut out, literal, true, None),
            Chunk::Expr(body) => expand_expr(&mut out, body, bag)?,
        }
    }
    Ok(out)
}

/// Expands one expression.
fn expand_expr(
    out: &mut String,
    body: ExprBody<'_>,
    bag: &VariableBag,
) -> Result<(), ExpandError> {
    let (op, varlist) = body.decompose();
    let props = OpProps::from_op(op);

    let mut is_first = true;
    for varspec in varlist {
        let binding = match bag.fetch(varspec.name()) {
            Some(binding) => binding,
            None => continue,
        };
        // A composite with zero members is undefined (RFC 6570 section
        // 2.3) and contributes nothing.
        match binding {
            Binding::List(items) if items.is_empty() => continue,
            Binding::Pairs(pairs) if pairs.is_empty() => continue,
            _ => {}
        }
        let max_len = match varspec.modifier() {
            Modifier::MaxLen(max_len) => {
                if !matches!(binding, Binding::Scalar(_)) {
                    return Err(ExpandError::new(ExpandErrorKind::PrefixOnComposite));
                }
                Some(max_len)
            }
            Modifier::None | Modifier::Explode => None,
        };

        out.push_str(if mem::replace(&mut is_first, false) {
            props.first
        } else {
            props.sep
        });

        match binding {
            Binding::Scalar(value) => {
                if props.named {
                    out.push_str(varspec.name());
                    if value.is_empty() {
                        out.push_str(props.ifemp);
                        continue;
                    }
                    out.push('=');
                }
                write_value(out, value, props.allow_reserved, max_len);
            }
            Binding::List(items) => {
                if matches!(varspec.modifier(), Modifier::Explode) {
                    let mut is_following = false;
                    for item in items {
                        if mem::replace(&mut is_following, true) {
                            out.push_str(props.sep);
                        }
                        if props.named {
                            out.push_str(varspec.name());
                            if item.is_empty() {
                                out.push_str(props.ifemp);
                                continue;
                            }
                            out.push('=');
                        }
                        write_value(out, item, props.allow_reserved, None);
                    }
                } else {
                    if props.named {
                        out.push_str(varspec.name());
                        out.push('=');
                    }
                    let mut is_following = false;
                    for item in items {
                        if mem::replace(&mut is_following, true) {
                            out.push(',');
                        }
                        write_value(out, item, props.allow_reserved, None);
                    }
                }
            }
            Binding::Pairs(pairs) => {
                if matches!(varspec.modifier(), Modifier::Explode) {
                    // The key replaces the varspec name in named
                    // expansions.
                    let mut is_following = false;
                    for (key, value) in pairs {
                        if mem::replace(&mut is_following, true) {
                            out.push_str(props.sep);
                        }
                        write_value(out, key, props.allow_reserved, None);
                        if props.named && value.is_empty() {
                            out.push_str(props.ifemp);
                            continue;
                        }
                        out.push('=');
                        write_value(out, value, props.allow_reserved, None);
                    }
                } else {
                    if props.named {
                        out.push_str(varspec.name());
                        out.push('=');
                    }
                    let mut is_following = false;
                    for (key, value) in pairs {
                        if mem::replace(&mut is_following, true) {
                            out.push(',');
                        }
                        write_value(out, key, props.allow_reserved, None);
                        out.push(',');
                        write_value(out, value, props.allow_reserved, None);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Escapes a value and writes it, with an optional prefix length.
///
/// The prefix length counts characters of the raw value, before
/// encoding. Valid percent-triplets pass through uppercased, a stray `%`
/// becomes `%25`, unreserved characters stay raw, reserved ones stay raw
/// only when the operator allows them, and everything else is
/// percent-encoded from its UTF-8 bytes.
fn write_value(out: &mut String, value: &str, allow_reserved: bool, max_len: Option<u16>) {
    let truncated = match max_len {
        Some(max_len) => {
            let end = value
                .char_indices()
                .nth(usize::from(max_len))
                .map_or(value.len(), |(i, _c)| i);
            &value[..end]
        }
        None => value,
    };
    let mut rest = truncated;
    while let Some(c) = rest.chars().next() {
        if c == '%' {
            let bytes = rest.as_bytes();
            if bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit() {
                out.push('%');
                out.push(bytes[1].to_ascii_uppercase() as char);
                out.push(bytes[2].to_ascii_uppercase() as char);
                rest = &rest[3..];
            } else {
                out.push_str("%25");
                rest = &rest[1..];
            }
            continue;
        }
        if is_unreserved(c) || (allow_reserved && is_reserved(c)) {
            out.push(c);
        } else {
            let mut buf = [0_u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{b:02X}");
            }
        }
        rest = &rest[c.len_utf8()..];
    }
}
