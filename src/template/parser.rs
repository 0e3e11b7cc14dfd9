//! Template validation.
//!
//! A single pass validates literals and expressions and collects the
//! ordered, de-duplicated variable names. Later passes (expansion) trust
//! the template completely.
//!
//! [Errata 6937](https://www.rfc-editor.org/errata/eid6937) is applied:
//! single quotes are allowed in literals.

use crate::parser::char::is_ucschar;
use crate::template::ast::Operator;
use crate::template::error::{Error, ErrorKind};

/// Validates the template and returns the ordered unique variable names.
pub(super) fn validate_and_collect(template: &str) -> Result<Vec<String>, Error> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;
    let mut pos = 0;
    while !rest.is_empty() {
        match rest.find('{') {
            Some(open) => {
                validate_literal(&rest[..open], pos)?;
                let after_open = &rest[open + 1..];
                let close = after_open
                    .find('}')
                    .ok_or_else(|| Error::new(ErrorKind::ExpressionNotClosed, pos + open))?;
                validate_expression(&after_open[..close], pos + open + 1, &mut names)?;
                let consumed = open + 1 + close + 1;
                pos += consumed;
                rest = &rest[consumed..];
            }
            None => {
                validate_literal(rest, pos)?;
                break;
            }
        }
    }
    Ok(names)
}

/// Validates a literal run.
fn validate_literal(literal: &str, pos: usize) -> Result<(), Error> {
    let mut iter = literal.char_indices();
    while let Some((i, c)) = iter.next() {
        if c == '%' {
            let hex_ok = matches!(
                (iter.next(), iter.next()),
                (Some((_, h1)), Some((_, h2))) if h1.is_ascii_hexdigit() && h2.is_ascii_hexdigit()
            );
            if !hex_ok {
                return Err(Error::new(ErrorKind::InvalidLiteral, pos + i));
            }
            continue;
        }
        if !is_literal_char(c) {
            return Err(Error::new(ErrorKind::InvalidLiteral, pos + i));
        }
    }
    Ok(())
}

/// Validates an expression body and collects its variable names.
fn validate_expression(body: &str, pos: usize, names: &mut Vec<String>) -> Result<(), Error> {
    let first = match body.bytes().next() {
        Some(first) => first,
        None => return Err(Error::new(ErrorKind::EmptyExpression, pos)),
    };
    let varlist = if Operator::from_byte(first).is_some() {
        &body[1..]
    } else if Operator::is_reserved_for_future(first) {
        return Err(Error::new(ErrorKind::UnsupportedOperator, pos));
    } else {
        body
    };
    if varlist.is_empty() {
        return Err(Error::new(ErrorKind::EmptyExpression, pos));
    }

    let mut offset = body.len() - varlist.len();
    for spec in varlist.split(',') {
        let name = validate_varspec(spec, pos + offset)?;
        if !names.iter().any(|known| known == name) {
            names.push(name.to_owned());
        }
        offset += spec.len() + 1;
    }
    Ok(())
}

/// Validates a single varspec and returns its variable name.
fn validate_varspec(spec: &str, pos: usize) -> Result<&str, Error> {
    let name = if let Some((name, max_len)) = spec.split_once(':') {
        if max_len.contains('*') || name.ends_with('*') {
            return Err(Error::new(ErrorKind::PrefixWithExplode, pos));
        }
        let digits_ok = !max_len.is_empty()
            && max_len.len() <= 4
            && max_len.bytes().all(|b| b.is_ascii_digit())
            && !max_len.starts_with('0');
        if !digits_ok {
            return Err(Error::new(ErrorKind::InvalidMaxLength, pos));
        }
        name
    } else if let Some(name) = spec.strip_suffix('*') {
        name
    } else {
        spec
    };
    if !is_varname(name) {
        return Err(Error::new(ErrorKind::InvalidVarname, pos));
    }
    Ok(name)
}

/// Checks the `varname` rule: varchars (`ALPHA / DIGIT / "_" /
/// pct-encoded`) with single interior dots.
fn is_varname(s: &str) -> bool {
    if s.is_empty() || s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len()
                    || !bytes[i + 1].is_ascii_hexdigit()
                    || !bytes[i + 2].is_ascii_hexdigit()
                {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => i += 1,
            _ => return false,
        }
    }
    true
}

/// Checks if the character may appear raw in a literal.
fn is_literal_char(c: char) -> bool {
    match u32::from(c) {
        0x21 | 0x23..=0x24 | 0x26..=0x3B | 0x3D | 0x3F..=0x5B | 0x5D | 0x5F | 0x61..=0x7A
        | 0x7E => true,
        // iprivate
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD => true,
        _ => is_ucschar(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_names_in_order_without_duplicates() {
        let names =
            validate_and_collect("{count}{/count,list}{?list,keys:4}{&count*}").expect("valid");
        assert_eq!(names, ["count", "list", "keys"]);
    }

    #[test]
    fn accepts_rfc_level4_shapes() {
        for template in [
            "",
            "no-expressions",
            "O{undef}X",
            "{+path:6}/here",
            "{#keys*}",
            "{/var:1,var}",
            "{;hello:5}",
            "{?var:3}",
            "{&v,empty,who}",
            "{.null}",
            "up{+path}{var}/here",
            "{semi.dot}",
            "{%20encoded}",
            "'single-quotes'",
        ] {
            assert!(validate_and_collect(template).is_ok(), "template={template:?}");
        }
    }

    #[test]
    fn rejects_malformed_templates() {
        for template in [
            "{var",
            "var}extra{",
            "{}",
            "{?}",
            "{=eq}",
            "{|pipe}",
            "{!bang}",
            "{var:0}",
            "{var:10000}",
            "{var:x}",
            "{var:3*}",
            "{var*:3}",
            "{.bad.}",
            "{..bad}",
            "{a b}",
            "{a-b}",
            "lit eral{x}",
            "100%",
            "per%.cent",
            "<angle>",
        ] {
            assert!(validate_and_collect(template).is_err(), "template={template:?}");
        }
    }
}
