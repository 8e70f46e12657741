//! UTF-8, the variable multi-byte encoding.

use crate::encoding::{Encoding, Probe};
use crate::encodings::{ASCII, is_combining_point, unicode_to_lower, unicode_to_upper};
use crate::flags::{CharFlags, classify_unicode};
use crate::point::CodePoint;

/// Multi-byte encoding: 1 to 4 single-byte elements per character.
///
/// Derived from [`Ascii`](super::Ascii): the two agree on every 7-bit
/// character, and classification and case operations over that range
/// delegate to the base.
#[derive(Debug, Clone, Copy)]
pub struct Utf8;

/// Shared instance.
pub static UTF_8: Utf8 = Utf8;

/// Continuation range the second byte must fall in, given the lead byte.
/// The constrained rows reject overlong forms and surrogates at the
/// earliest possible byte, so `probe` never reports a doomed prefix as
/// `Incomplete`.
fn sequence_shape(lead: u8) -> Option<(usize, u8, u8)> {
    match lead {
        0xC2..=0xDF => Some((2, 0x80, 0xBF)),
        0xE0 => Some((3, 0xA0, 0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => Some((3, 0x80, 0xBF)),
        0xED => Some((3, 0x80, 0x9F)),
        0xF0 => Some((4, 0x90, 0xBF)),
        0xF1..=0xF3 => Some((4, 0x80, 0xBF)),
        0xF4 => Some((4, 0x80, 0x8F)),
        _ => None,
    }
}

impl Encoding for Utf8 {
    fn name(&self) -> &str {
        "utf-8"
    }

    fn base(&self) -> Option<&dyn Encoding> {
        Some(&ASCII)
    }

    fn element_size(&self) -> usize {
        1
    }

    fn min_elements(&self) -> usize {
        1
    }

    fn max_elements(&self) -> usize {
        4
    }

    fn max_points_per_glyph(&self) -> usize {
        8
    }

    fn probe(&self, buf: &[u8]) -> Probe {
        let Some(&lead) = buf.first() else {
            return Probe::Empty;
        };
        if lead <= 0x7F {
            return Probe::Complete(1);
        }
        let Some((len, second_lo, second_hi)) = sequence_shape(lead) else {
            return Probe::Invalid;
        };
        for (i, &b) in buf.iter().enumerate().take(len).skip(1) {
            let (lo, hi) = if i == 1 {
                (second_lo, second_hi)
            } else {
                (0x80, 0xBF)
            };
            if b < lo || b > hi {
                return Probe::Invalid;
            }
        }
        if buf.len() < len {
            Probe::Incomplete
        } else {
            Probe::Complete(len)
        }
    }

    fn decode(&self, buf: &[u8]) -> Option<CodePoint> {
        match self.probe(buf) {
            Probe::Complete(len) => {
                let (ch, read) = bstr::decode_utf8(buf);
                debug_assert_eq!(read, len);
                ch.map(CodePoint::from)
            }
            Probe::Empty | Probe::Incomplete | Probe::Invalid => None,
        }
    }

    fn encode(&self, point: CodePoint, out: Option<&mut [u8]>) -> Option<usize> {
        let c = point.to_char()?;
        let len = c.len_utf8();
        if let Some(out) = out {
            if out.len() < len {
                return None;
            }
            c.encode_utf8(out);
        }
        Some(len)
    }

    fn classify(&self, point: CodePoint) -> CharFlags {
        if point == self.eos() {
            return CharFlags::EOS;
        }
        if point.value() <= 0x7F {
            return ASCII.classify(point);
        }
        classify_unicode(point)
    }

    fn to_lower(&self, point: CodePoint) -> CodePoint {
        if point.value() <= 0x7F {
            ASCII.to_lower(point)
        } else {
            unicode_to_lower(point)
        }
    }

    fn to_upper(&self, point: CodePoint) -> CodePoint {
        if point.value() <= 0x7F {
            ASCII.to_upper(point)
        } else {
            unicode_to_upper(point)
        }
    }

    fn is_combining(&self, point: CodePoint) -> bool {
        is_combining_point(point)
    }
}
