//! Character classification helpers.

/// Checks if the given character matches the `unreserved` rule.
pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Checks if the given character matches the `sub-delims` rule.
pub(crate) fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

/// Checks if the given character matches the `gen-delims` rule.
pub(crate) fn is_gen_delim(c: char) -> bool {
    matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

/// Checks if the given character matches the `reserved` rule.
pub(crate) fn is_reserved(c: char) -> bool {
    is_gen_delim(c) || is_sub_delim(c)
}

/// Checks if the given ASCII character matches the `pchar` rule
/// (excluding `pct-encoded`, which spans multiple characters).
pub(crate) fn is_pchar_single(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == ':' || c == '@'
}

/// Checks if the given character is allowed in `userinfo`
/// (excluding `pct-encoded`).
pub(crate) fn is_userinfo_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == ':'
}

/// Checks if the given character is allowed in `reg-name`
/// (excluding `pct-encoded`).
pub(crate) fn is_regname_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c)
}

/// Checks if the given character is a forbidden raw control byte.
///
/// Control bytes may only appear percent-encoded.
pub(crate) fn is_control(c: char) -> bool {
    matches!(u32::from(c), 0x00..=0x1F | 0x7F)
}

/// Checks if the given character matches the `ucschar` rule of RFC 3987.
///
/// Non-ASCII host labels are accepted by the decomposition and converted
/// to A-labels by the host validator.
pub(crate) fn is_ucschar(c: char) -> bool {
    matches!(
        u32::from(c),
        0xA0..=0xD7FF |
        0xF900..=0xFDCF |
        0xFDF0..=0xFFEF |
        0x1_0000..=0x1_FFFD |
        0x2_0000..=0x2_FFFD |
        0x3_0000..=0x3_FFFD |
        0x4_0000..=0x4_FFFD |
        0x5_0000..=0x5_FFFD |
        0x6_0000..=0x6_FFFD |
        0x7_0000..=0x7_FFFD |
        0x8_0000..=0x8_FFFD |
        0x9_0000..=0x9_FFFD |
        0xA_0000..=0xA_FFFD |
        0xB_0000..=0xB_FFFD |
        0xC_0000..=0xC_FFFD |
        0xD_0000..=0xD_FFFD |
        0xE_1000..=0xE_FFFD
    )
}
