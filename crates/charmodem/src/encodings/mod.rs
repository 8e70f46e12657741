//! Built-in encodings.
//!
//! Each encoding is a zero-sized descriptor with a `'static` shared
//! instance, intended to be passed by reference into walkers, converters,
//! and the registry. [`Ascii`] is fixed single-byte; [`Utf8`] is the
//! variable multi-byte encoding derived from it; [`Utf16Le`] is variable
//! with 2-byte elements; [`Utf32Le`] is fixed wide.

mod ascii;
mod utf8;
mod utf16le;
mod utf32le;

pub use ascii::{ASCII, Ascii};
pub use utf8::{UTF_8, Utf8};
pub use utf16le::{UTF_16LE, Utf16Le};
pub use utf32le::{UTF_32LE, Utf32Le};

use crate::point::CodePoint;

/// Combining-mark test shared by the Unicode-transparent encodings.
///
/// Covers the combining blocks (diacritical marks, extended, supplement,
/// marks for symbols, half marks); the full `Grapheme_Extend` property is
/// out of scope.
pub(crate) fn is_combining_point(point: CodePoint) -> bool {
    matches!(
        point.value(),
        0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F
    )
}

/// Single-point lowercase mapping; identity when the full mapping is
/// multi-character (e.g. İ) or the point is caseless.
pub(crate) fn unicode_to_lower(point: CodePoint) -> CodePoint {
    let Some(c) = point.to_char() else {
        return point;
    };
    let mut mapping = c.to_lowercase();
    match (mapping.next(), mapping.next()) {
        (Some(lower), None) => CodePoint::from(lower),
        _ => point,
    }
}

/// Single-point uppercase mapping; identity when the full mapping is
/// multi-character (e.g. ß) or the point is caseless.
pub(crate) fn unicode_to_upper(point: CodePoint) -> CodePoint {
    let Some(c) = point.to_char() else {
        return point;
    };
    let mut mapping = c.to_uppercase();
    match (mapping.next(), mapping.next()) {
        (Some(upper), None) => CodePoint::from(upper),
        _ => point,
    }
}
