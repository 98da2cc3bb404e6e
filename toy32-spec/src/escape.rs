//! Backslash escape decoding, shared by assembler string literals and the
//! engine's OUT instruction.

/// Byte produced by the single-character escape `\c`, if `c` names one.
pub const fn escape_byte(c: u8) -> Option<u8> {
    match c {
        b'n' => Some(b'\n'),
        b't' => Some(b'\t'),
        b'r' => Some(b'\r'),
        b'0' => Some(0),
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'v' => Some(0x0B),
        _ => None,
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decode backslash escapes in `bytes`.
///
/// Unknown escapes, a truncated `\x`, and a trailing lone backslash are
/// copied through unchanged.
pub fn unescape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let next = bytes[i + 1];
        if let Some(b) = escape_byte(next) {
            out.push(b);
            i += 2;
        } else if next == b'x' {
            let hi = bytes.get(i + 2).copied().and_then(hex_digit);
            let lo = bytes.get(i + 3).copied().and_then(hex_digit);
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 4;
                }
                _ => {
                    out.extend_from_slice(&bytes[i..i + 2]);
                    i += 2;
                }
            }
        } else {
            out.extend_from_slice(&bytes[i..i + 2]);
            i += 2;
        }
    }

    out
}
