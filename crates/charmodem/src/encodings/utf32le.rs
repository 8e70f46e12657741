//! UTF-32, little endian: the fixed wide-character encoding.

use crate::encoding::{Encoding, Probe};
use crate::encodings::{is_combining_point, unicode_to_lower, unicode_to_upper};
use crate::flags::{CharFlags, classify_unicode};
use crate::point::CodePoint;

/// Fixed-width encoding: one 4-byte element per character.
#[derive(Debug, Clone, Copy)]
pub struct Utf32Le;

/// Shared instance.
pub static UTF_32LE: Utf32Le = Utf32Le;

impl Encoding for Utf32Le {
    fn name(&self) -> &str {
        "utf-32le"
    }

    fn element_size(&self) -> usize {
        4
    }

    fn min_elements(&self) -> usize {
        1
    }

    fn max_elements(&self) -> usize {
        1
    }

    fn max_points_per_glyph(&self) -> usize {
        8
    }

    fn probe(&self, buf: &[u8]) -> Probe {
        if buf.is_empty() {
            return Probe::Empty;
        }
        if buf.len() < 4 {
            return Probe::Incomplete;
        }
        let raw = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if char::from_u32(raw).is_some() {
            Probe::Complete(4)
        } else {
            Probe::Invalid
        }
    }

    fn decode(&self, buf: &[u8]) -> Option<CodePoint> {
        match self.probe(buf) {
            Probe::Complete(_) => {
                let raw = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
                CodePoint::from_u32(raw)
            }
            Probe::Empty | Probe::Incomplete | Probe::Invalid => None,
        }
    }

    fn encode(&self, point: CodePoint, out: Option<&mut [u8]>) -> Option<usize> {
        let c = point.to_char()?;
        if let Some(out) = out {
            if out.len() < 4 {
                return None;
            }
            out[..4].copy_from_slice(&(c as u32).to_le_bytes());
        }
        Some(4)
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
