//! Literal parsing: numbers, characters, escapes and strings.

use toy32_spec::escape::{escape_byte, unescape};

/// Parse a numeric literal into a 32-bit value.
///
/// Accepts anything representable as `i32` or `u32`; unsigned values above
/// `i32::MAX` keep their bit pattern.
pub fn parse_number(text: &str) -> Option<i32> {
    let value = if let Some(hex) = text.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = text.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()?
    } else {
        text.parse::<i64>().ok()?
    };

    if (i32::MIN as i64..=u32::MAX as i64).contains(&value) {
        Some(value as u32 as i32)
    } else {
        None
    }
}

/// Code point of a character literal (`'a'`, `'\n'`, `'\x41'`)
pub fn parse_char(text: &str) -> Option<u32> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    if inner.starts_with('\\') {
        return parse_escape(inner);
    }
    let mut chars = inner.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(c as u32)
}

/// Byte value of a bare escape literal (`\n`, `\x41`)
pub fn parse_escape(text: &str) -> Option<u32> {
    let body = text.strip_prefix('\\')?;
    if let Some(hex) = body.strip_prefix('x') {
        if hex.len() == 2 {
            return u8::from_str_radix(hex, 16).ok().map(u32::from);
        }
    }
    match body.as_bytes() {
        [c] => escape_byte(*c).map(u32::from),
        _ => None,
    }
}

/// Escape-decoded bytes of a string literal
pub fn parse_string(text: &str) -> Option<Vec<u8>> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(inner.as_bytes()))
}
