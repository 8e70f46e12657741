//! Plain 7-bit ASCII.

use crate::encoding::{Encoding, Probe};
use crate::flags::CharFlags;
use crate::point::CodePoint;

/// Fixed single-byte 7-bit encoding. Bytes above `0x7F` are malformed.
#[derive(Debug, Clone, Copy)]
pub struct Ascii;

/// Shared instance.
pub static ASCII: Ascii = Ascii;

impl Encoding for Ascii {
    fn name(&self) -> &str {
        "ascii"
    }

    fn element_size(&self) -> usize {
        1
    }

    fn min_elements(&self) -> usize {
        1
    }

    fn max_elements(&self) -> usize {
        1
    }

    fn probe(&self, buf: &[u8]) -> Probe {
        match buf.first() {
            None => Probe::Empty,
            Some(&b) if b <= 0x7F => Probe::Complete(1),
            Some(_) => Probe::Invalid,
        }
    }

    fn decode(&self, buf: &[u8]) -> Option<CodePoint> {
        match buf.first() {
            Some(&b) if b <= 0x7F => Some(CodePoint::new(i32::from(b))),
            _ => None,
        }
    }

    fn encode(&self, point: CodePoint, out: Option<&mut [u8]>) -> Option<usize> {
        let value = point.to_u32()?;
        if value > 0x7F {
            return None;
        }
        if let Some(out) = out {
            *out.first_mut()? = value as u8;
        }
        Some(1)
    }

    fn classify(&self, point: CodePoint) -> CharFlags {
        if point == self.eos() {
            return CharFlags::EOS;
        }
        let Some(c) = point.to_char() else {
            return CharFlags::NONE;
        };
        if !c.is_ascii() {
            return CharFlags::NONE;
        }
        let mut f = CharFlags::NONE;
        if c.is_ascii_alphabetic() {
            f |= CharFlags::ALPHA;
        }
        if c.is_ascii_digit() {
            f |= CharFlags::DIGIT;
        }
        if c.is_ascii_hexdigit() {
            f |= CharFlags::XDIGIT;
        }
        if c.is_ascii_control() {
            f |= CharFlags::CNTRL;
        } else {
            f |= CharFlags::PRINT;
        }
        if c.is_ascii_punctuation() {
            f |= CharFlags::PUNCT;
        }
        if c.is_ascii_whitespace() {
            f |= CharFlags::SPACE;
        }
        if matches!(c, '\n' | '\r' | '\u{0B}' | '\u{0C}') {
            f |= CharFlags::NEWLINE | CharFlags::SPACE;
        }
        if c.is_ascii_uppercase() {
            f |= CharFlags::UPPER;
        }
        if c.is_ascii_lowercase() {
            f |= CharFlags::LOWER;
        }
        f
    }

    fn to_lower(&self, point: CodePoint) -> CodePoint {
        match point.to_char() {
            Some(c) if c.is_ascii() => CodePoint::from(c.to_ascii_lowercase()),
            _ => point,
        }
    }

    fn to_upper(&self, point: CodePoint) -> CodePoint {
        match point.to_char() {
            Some(c) if c.is_ascii() => CodePoint::from(c.to_ascii_uppercase()),
            _ => point,
        }
    }
}
