//! The character-trait contract: how an encoding locates, measures, and
//! classifies characters in a raw byte buffer.
//!
//! An [`Encoding`] is an immutable, stateless descriptor. Every operation is
//! a pure function of its explicit arguments: implementations never
//! allocate, never touch global state, and are safe to call concurrently on
//! the same buffer. Positional queries are all expressible through
//! [`Encoding::seek`]:
//!
//! - first character: `seek(buf, 0, None)`
//! - next character: `seek(buf, 1, Some(pos))`
//! - last character: `seek(buf, -1, None)`
//! - valid character start: `seek(buf, 0, Some(pos)).is_some()`
//!
//! [`Encoding::probe`] is the finer-grained primitive the incremental
//! converter is built on: unlike `seek`, it distinguishes a buffer that
//! *ends inside* a valid character (more input may arrive) from one that
//! can never begin a valid character.

use core::cmp::Ordering;

use crate::flags::CharFlags;
use crate::point::CodePoint;

/// Classification of the head of a byte buffer under an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The buffer is empty.
    Empty,
    /// The buffer begins with one complete character occupying this many
    /// bytes.
    Complete(usize),
    /// The whole buffer is a proper prefix of some valid character; more
    /// bytes could complete it.
    Incomplete,
    /// No valid character of this encoding can begin with these bytes.
    Invalid,
}

/// The location of one character inside a buffer: its starting byte offset
/// and its length in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seek {
    /// Byte offset of the character's first byte.
    pub pos: usize,
    /// Byte length of the character.
    pub len: usize,
}

/// A pluggable descriptor of one text encoding's structural and
/// classification rules.
///
/// Implementations are shared, immutable, and `Sync`; the crate's built-in
/// encodings are exposed as `'static` instances in [`crate::encodings`].
/// All provided methods are derived from [`Encoding::probe`] and
/// [`Encoding::decode`] and honor the full-validation rule: any seek that
/// crosses other characters validates every one of them and reports `None`
/// on the first malformed or truncated unit.
pub trait Encoding: Send + Sync {
    /// Display name, also the registry lookup key.
    fn name(&self) -> &str;

    /// The encoding this one specializes, if any.
    ///
    /// A derived encoding must agree with its base on every character the
    /// two share; `classify` and the case operations delegate to the base
    /// over that shared range.
    fn base(&self) -> Option<&dyn Encoding> {
        None
    }

    /// Size in bytes of the smallest addressable element.
    fn element_size(&self) -> usize;

    /// Minimum number of elements composing one character. At least 1.
    fn min_elements(&self) -> usize;

    /// Maximum number of elements composing one character. At least
    /// [`Encoding::min_elements`].
    fn max_elements(&self) -> usize;

    /// Upper bound on code points composing one user-perceived character.
    fn max_points_per_glyph(&self) -> usize {
        1
    }

    /// The end-of-stream code point for streams of this encoding.
    fn eos(&self) -> CodePoint {
        CodePoint::NONE
    }

    /// `true` when every character spans the same number of elements.
    fn is_fixed_width(&self) -> bool {
        self.min_elements() == self.max_elements()
    }

    /// `true` for byte-oriented encodings where a character may span
    /// several bytes.
    fn is_multi_byte(&self) -> bool {
        self.element_size() == 1 && self.max_elements() > 1
    }

    /// Largest possible byte length of one character.
    fn max_char_bytes(&self) -> usize {
        self.element_size() * self.max_elements()
    }

    /// Classifies the head of `buf`. Never reads past `buf.len()`.
    fn probe(&self, buf: &[u8]) -> Probe;

    /// Code point of the single character at the head of `buf`, or `None`
    /// when the head is not one valid character of this encoding.
    fn decode(&self, buf: &[u8]) -> Option<CodePoint>;

    /// Renders a code point as bytes of this encoding.
    ///
    /// With `out = None` this is a capacity query: it returns the byte
    /// count the real write would produce, writing nothing. Returns `None`
    /// when the point is not representable or `out` is too small.
    fn encode(&self, point: CodePoint, out: Option<&mut [u8]>) -> Option<usize>;

    /// Every classification tag that applies to `point`.
    fn classify(&self, point: CodePoint) -> CharFlags;

    /// Lowercase variant of `point`; identity when it has none.
    fn to_lower(&self, point: CodePoint) -> CodePoint;

    /// Uppercase variant of `point`; identity when it has none.
    fn to_upper(&self, point: CodePoint) -> CodePoint;

    /// Swaps letter case; identity for caseless points.
    fn swap_case(&self, point: CodePoint) -> CodePoint {
        let flags = self.classify(point);
        if flags.contains(CharFlags::UPPER) {
            self.to_lower(point)
        } else if flags.contains(CharFlags::LOWER) {
            self.to_upper(point)
        } else {
            point
        }
    }

    /// `true` when `point` is a combining mark that attaches to the
    /// preceding base character.
    fn is_combining(&self, point: CodePoint) -> bool {
        let _ = point;
        false
    }

    /// Locates the character `offset` characters away from `from`.
    ///
    /// With `from = None` the walk starts at the buffer head; if `offset`
    /// is also negative, it starts from the logical end and moves backward
    /// (`-1` is the last character). Returns `None` when no such character
    /// exists: malformed data anywhere along the walk, a truncated
    /// trailing sequence, or a walk past either end.
    fn seek(&self, buf: &[u8], offset: isize, from: Option<usize>) -> Option<Seek> {
        match (from, offset) {
            (Some(start), 0..) => walk_forward(self, buf, start, offset.unsigned_abs()),
            (None, 0..) => walk_forward(self, buf, 0, offset.unsigned_abs()),
            (Some(start), _) => {
                let index = index_of(self, buf, start)?;
                let target = index.checked_sub(offset.unsigned_abs())?;
                walk_forward(self, buf, 0, target)
            }
            (None, _) => {
                let total = self.length(buf)?;
                let target = total.checked_sub(offset.unsigned_abs())?;
                walk_forward(self, buf, 0, target)
            }
        }
    }

    /// Number of characters in `buf`, or `None` unless the entire buffer
    /// is composed of complete, valid characters.
    fn length(&self, buf: &[u8]) -> Option<usize> {
        let mut pos = 0;
        let mut count = 0;
        loop {
            match self.probe(&buf[pos..]) {
                Probe::Empty => return Some(count),
                Probe::Complete(len) => {
                    pos += len;
                    count += 1;
                }
                Probe::Incomplete | Probe::Invalid => return None,
            }
        }
    }

    /// Lexicographic comparison of two buffers under this encoding's
    /// character semantics.
    ///
    /// Characters are decoded pairwise rather than compared as raw bytes,
    /// so distinct byte sequences for one logical character compare equal.
    /// A malformed tail ends its side as if the buffer stopped there.
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        let mut ia = 0;
        let mut ib = 0;
        loop {
            let pa = next_point(self, a, &mut ia);
            let pb = next_point(self, b, &mut ib);
            match (pa, pb) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(x), Some(y)) => match x.cmp(&y) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                },
            }
        }
    }

    /// Produces a canonical, binary-comparable form of `from`: comparing
    /// two transformed outputs byte-wise orders them exactly as
    /// [`Encoding::compare`] orders the originals.
    ///
    /// With `to = None` this is a capacity query returning the byte count
    /// the real write would produce. The canonical form is the UTF-32
    /// big-endian rendering of the decoded sequence, whose byte order
    /// mirrors code-point order.
    fn transform(&self, from: &[u8], to: Option<&mut [u8]>) -> Option<usize> {
        let mut cursor = 0;
        match to {
            None => {
                let mut needed = 0;
                while next_point(self, from, &mut cursor).is_some() {
                    needed += 4;
                }
                Some(needed)
            }
            Some(out) => {
                let mut written = 0;
                while let Some(point) = next_point(self, from, &mut cursor) {
                    let raw = point.to_u32()?;
                    let end = written + 4;
                    if end > out.len() {
                        return None;
                    }
                    out[written..end].copy_from_slice(&raw.to_be_bytes());
                    written = end;
                }
                Some(written)
            }
        }
    }
}

/// Steps over `count` characters starting at byte `start`, validating each
/// one, and returns the location of the character reached.
fn walk_forward<E: Encoding + ?Sized>(
    enc: &E,
    buf: &[u8],
    start: usize,
    count: usize,
) -> Option<Seek> {
    if start > buf.len() {
        return None;
    }
    let mut pos = start;
    let mut remaining = count;
    loop {
        match enc.probe(&buf[pos..]) {
            Probe::Complete(len) => {
                if remaining == 0 {
                    return Some(Seek { pos, len });
                }
                pos += len;
                remaining -= 1;
            }
            Probe::Empty | Probe::Incomplete | Probe::Invalid => return None,
        }
    }
}

/// Character index of byte position `target`, validating every character
/// before it. `None` when `target` is not a character boundary or the
/// prefix is malformed.
fn index_of<E: Encoding + ?Sized>(enc: &E, buf: &[u8], target: usize) -> Option<usize> {
    let mut pos = 0;
    let mut index = 0;
    while pos < target {
        match enc.probe(&buf[pos..]) {
            Probe::Complete(len) => {
                pos += len;
                index += 1;
            }
            Probe::Empty | Probe::Incomplete | Probe::Invalid => return None,
        }
    }
    (pos == target).then_some(index)
}

/// Decodes the character at `*cursor` and advances past it. `None` at the
/// end of the buffer or at the first malformed or truncated unit.
fn next_point<E: Encoding + ?Sized>(
    enc: &E,
    buf: &[u8],
    cursor: &mut usize,
) -> Option<CodePoint> {
    match enc.probe(&buf[*cursor..]) {
        Probe::Complete(len) => {
            let point = enc.decode(&buf[*cursor..*cursor + len])?;
            *cursor += len;
            Some(point)
        }
        Probe::Empty | Probe::Incomplete | Probe::Invalid => None,
    }
}
