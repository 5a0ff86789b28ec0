//! Vorbis comment field-name cleanup
//!
//! A field name may only use ASCII 0x20 through 0x7D, with 0x3D ('=')
//! excluded. Names compare case-insensitively, so the cleaned form is
//! always uppercase.

/// Byte written in place of anything outside the allowed range.
const REPLACEMENT: u8 = b' ';

/// Returns true if `byte` may appear in a field name as-is.
pub fn is_allowed_name_byte(byte: u8) -> bool {
    matches!(byte, 0x20..=0x3C | 0x3E..=0x7D)
}

/// Clean a raw field name, byte by byte.
///
/// NUL and every other byte outside `[0x20, 0x3C] ∪ [0x3E, 0x7D]` becomes a
/// single space, then the result is uppercased. Multi-byte UTF-8 sequences
/// turn into one space per byte. Never fails.
pub fn sanitize_name_bytes(name: &[u8]) -> String {
    name.iter()
        .map(|&b| {
            if is_allowed_name_byte(b) {
                b.to_ascii_uppercase() as char
            } else {
                REPLACEMENT as char
            }
        })
        .collect()
}

/// Clean a field name. See [`sanitize_name_bytes`].
pub fn sanitize_name(name: &str) -> String {
    sanitize_name_bytes(name.as_bytes())
}
