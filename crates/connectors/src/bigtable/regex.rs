//! Helpers for the RE2 byte patterns the engine evaluates.

/// Matches any sequence of bytes, newlines included.
pub const ANY_BYTES: &[u8] = b"\\C*";

/// Escape `literal` so it matches itself and nothing else.
///
/// ASCII letters, digits, `_` and non-ASCII bytes pass through; NUL becomes
/// `\x00`; every other byte is prefixed with a backslash.
pub fn quote(literal: &[u8]) -> Vec<u8> {
    let mut quoted = Vec::with_capacity(literal.len() * 2);
    for &byte in literal {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | 0x80..=0xff => quoted.push(byte),
            0 => quoted.extend_from_slice(b"\\x00"),
            _ => {
                quoted.push(b'\\');
                quoted.push(byte);
            }
        }
    }
    quoted
}

/// Pattern matching every byte string that starts with `prefix`.
pub fn prefix_pattern(prefix: &[u8]) -> Vec<u8> {
    let mut pattern = quote(prefix);
    pattern.extend_from_slice(ANY_BYTES);
    pattern
}
