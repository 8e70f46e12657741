//! UTF-16, little endian.

use crate::encoding::{Encoding, Probe};
use crate::encodings::{is_combining_point, unicode_to_lower, unicode_to_upper};
use crate::flags::{CharFlags, classify_unicode};
use crate::point::CodePoint;

/// Variable-width encoding over 2-byte elements: one element for the Basic
/// Multilingual Plane, a surrogate pair for everything above it. Not
/// multi-byte in the strict sense (its element is wider than one byte).
#[derive(Debug, Clone, Copy)]
pub struct Utf16Le;

/// Shared instance.
pub static UTF_16LE: Utf16Le = Utf16Le;

const HIGH_SURROGATE: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATE: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

fn unit_at(buf: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([buf[pos], buf[pos + 1]])
}

impl Encoding for Utf16Le {
    fn name(&self) -> &str {
        "utf-16le"
    }

    fn element_size(&self) -> usize {
        2
    }

    fn min_elements(&self) -> usize {
        1
    }

    fn max_elements(&self) -> usize {
        2
    }

    fn max_points_per_glyph(&self) -> usize {
        8
    }

    fn probe(&self, buf: &[u8]) -> Probe {
        if buf.is_empty() {
            return Probe::Empty;
        }
        if buf.len() < 2 {
            return Probe::Incomplete;
        }
        let first = unit_at(buf, 0);
        if LOW_SURROGATE.contains(&first) {
            return Probe::Invalid;
        }
        if !HIGH_SURROGATE.contains(&first) {
            return Probe::Complete(2);
        }
        if buf.len() < 4 {
            return Probe::Incomplete;
        }
        if LOW_SURROGATE.contains(&unit_at(buf, 2)) {
            Probe::Complete(4)
        } else {
            Probe::Invalid
        }
    }

    fn decode(&self, buf: &[u8]) -> Option<CodePoint> {
        match self.probe(buf) {
            Probe::Complete(2) => CodePoint::from_u32(u32::from(unit_at(buf, 0))),
            Probe::Complete(4) => {
                let high = u32::from(unit_at(buf, 0)) - 0xD800;
                let low = u32::from(unit_at(buf, 2)) - 0xDC00;
                CodePoint::from_u32(0x10000 + (high << 10 | low))
            }
            _ => None,
        }
    }

    fn encode(&self, point: CodePoint, out: Option<&mut [u8]>) -> Option<usize> {
        let c = point.to_char()?;
        let mut units = [0u16; 2];
        let encoded = c.encode_utf16(&mut units);
        let len = encoded.len() * 2;
        if let Some(out) = out {
            if out.len() < len {
                return None;
            }
            for (i, unit) in encoded.iter().enumerate() {
                out[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
            }
        }
        Some(len)
    }

    fn classify(&self, point: CodePoint) -> CharFlags {
        if point == self.eos() {
            return CharFlags::EOS;
        }
        classify_unicode(point)
    }

    fn to_lower(&self, point: CodePoint) -> CodePoint {
        unicode_to_lower(point)
    }

    fn to_upper(&self, point: CodePoint) -> CodePoint {
        unicode_to_upper(point)
    }

    fn is_combining(&self, point: CodePoint) -> bool {
        is_combining_point(point)
    }
}
