//! A read-only character cursor over a caller-owned buffer.

use crate::encoding::{Encoding, Probe};
use crate::point::CodePoint;

/// Step granularity of a [`Walker`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkUnit {
    /// One encoding character per step.
    #[default]
    Point,
    /// One user-perceived character per step: a base character plus any
    /// combining marks that follow it, bounded by
    /// [`Encoding::max_points_per_glyph`].
    Glyph,
    /// One raw element per step, ignoring character completeness. A
    /// diagnostic mode: the final step may cover a partial element.
    Element,
}

/// Iteration mode of a [`Walker`].
///
/// ```
/// use charmodem::WalkMode;
///
/// let mode = WalkMode::glyphs().reversed();
/// assert!(mode.reverse);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkMode {
    /// Step granularity.
    pub unit: WalkUnit,
    /// Negates the direction of [`Walker::advance`] and
    /// [`Walker::retreat`].
    pub reverse: bool,
}

impl WalkMode {
    /// Per-code-point stepping, forward.
    #[must_use]
    pub const fn points() -> Self {
        WalkMode {
            unit: WalkUnit::Point,
            reverse: false,
        }
    }

    /// Per-user-character stepping, forward.
    #[must_use]
    pub const fn glyphs() -> Self {
        WalkMode {
            unit: WalkUnit::Glyph,
            reverse: false,
        }
    }

    /// Per-raw-element stepping, forward.
    #[must_use]
    pub const fn elements() -> Self {
        WalkMode {
            unit: WalkUnit::Element,
            reverse: false,
        }
    }

    /// The same granularity, stepping in the opposite direction.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Position classification of a [`Walker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerState {
    /// On the first unit of the buffer.
    AtStart,
    /// On a unit past the first.
    Positioned,
    /// Past the last unit (also the state of an empty buffer).
    AtEnd,
    /// Motion hit malformed bytes; further motion is a no-op until the
    /// caller binds a fresh walker.
    Invalid,
}

/// A cursor that enumerates the characters of a borrowed byte buffer
/// under a given encoding and iteration mode.
///
/// The walker owns nothing but its own bookkeeping; the buffer and the
/// encoding outlive it. Its position always rests on the first byte of a
/// structurally valid unit, or at the end.
///
/// ```
/// use charmodem::{WalkMode, Walker, WalkerState};
/// use charmodem::encodings::UTF_8;
///
/// let text = "aé€".as_bytes();
/// let mut walker = Walker::bind(text, &UTF_8, WalkMode::points());
/// assert_eq!(walker.state(), WalkerState::AtStart);
/// assert_eq!(walker.current_len(), 1);
/// walker.advance();
/// assert_eq!(walker.position(), 1);
/// assert_eq!(walker.current_len(), 2);
/// walker.advance();
/// walker.advance();
/// assert_eq!(walker.state(), WalkerState::AtEnd);
/// ```
pub struct Walker<'buf, 'enc> {
    buf: &'buf [u8],
    enc: &'enc dyn Encoding,
    mode: WalkMode,
    start: usize,
    pos: usize,
    len: usize,
    state: WalkerState,
}

impl<'buf, 'enc> Walker<'buf, 'enc> {
    /// Binds a walker to a buffer.
    ///
    /// An empty buffer binds at [`WalkerState::AtEnd`]; a buffer whose
    /// first unit is malformed binds at [`WalkerState::Invalid`].
    #[must_use]
    pub fn bind(buf: &'buf [u8], enc: &'enc dyn Encoding, mode: WalkMode) -> Self {
        let mut walker = Walker {
            buf,
            enc,
            mode,
            start: 0,
            pos: 0,
            len: 0,
            state: WalkerState::AtEnd,
        };
        if buf.is_empty() {
            return walker;
        }
        match walker.measure(0) {
            Some(len) => {
                walker.len = len;
                walker.state = WalkerState::AtStart;
            }
            None => walker.state = WalkerState::Invalid,
        }
        walker
    }

    /// Byte length of the unit beginning at `pos`, per the configured
    /// granularity.
    fn measure(&self, pos: usize) -> Option<usize> {
        match self.mode.unit {
            WalkUnit::Element => {
                let rest = self.buf.len() - pos;
                if rest == 0 {
                    None
                } else {
                    Some(self.enc.element_size().min(rest))
                }
            }
            WalkUnit::Point => match self.enc.probe(&self.buf[pos..]) {
                Probe::Complete(len) => Some(len),
                Probe::Empty | Probe::Incomplete | Probe::Invalid => None,
            },
            WalkUnit::Glyph => self.measure_glyph(pos),
        }
    }

    fn measure_glyph(&self, pos: usize) -> Option<usize> {
        let Probe::Complete(base) = self.enc.probe(&self.buf[pos..]) else {
            return None;
        };
        let mut len = base;
        let mut points = 1;
        while points < self.enc.max_points_per_glyph() {
            let tail = &self.buf[pos + len..];
            let Probe::Complete(next) = self.enc.probe(tail) else {
                break;
            };
            let point = self.enc.decode(tail)?;
            if !self.enc.is_combining(point) {
                break;
            }
            len += next;
            points += 1;
        }
        Some(len)
    }

    /// Moves one unit in the configured direction and returns the new
    /// state. A no-op in [`WalkerState::Invalid`].
    pub fn advance(&mut self) -> WalkerState {
        if self.mode.reverse {
            self.step_back()
        } else {
            self.step_forward()
        }
    }

    /// Moves one unit against the configured direction and returns the
    /// new state. Retreating before the first unit is a no-op boundary.
    pub fn retreat(&mut self) -> WalkerState {
        if self.mode.reverse {
            self.step_forward()
        } else {
            self.step_back()
        }
    }

    fn step_forward(&mut self) -> WalkerState {
        match self.state {
            WalkerState::AtEnd | WalkerState::Invalid => self.state,
            WalkerState::AtStart | WalkerState::Positioned => {
                let next = self.pos + self.len;
                if next >= self.buf.len() {
                    self.pos = self.buf.len();
                    self.len = 0;
                    self.state = WalkerState::AtEnd;
                } else {
                    match self.measure(next) {
                        Some(len) => {
                            self.pos = next;
                            self.len = len;
                            self.state = WalkerState::Positioned;
                        }
                        None => self.state = WalkerState::Invalid,
                    }
                }
                self.state
            }
        }
    }

    fn step_back(&mut self) -> WalkerState {
        if self.buf.is_empty() {
            return self.state;
        }
        match self.state {
            WalkerState::AtStart | WalkerState::Invalid => self.state,
            WalkerState::Positioned | WalkerState::AtEnd => {
                match self.previous_start().and_then(|prev| {
                    let len = self.measure(prev)?;
                    Some((prev, len))
                }) {
                    Some((prev, len)) => {
                        self.pos = prev;
                        self.len = len;
                        self.state = if prev == self.start {
                            WalkerState::AtStart
                        } else {
                            WalkerState::Positioned
                        };
                    }
                    None => self.state = WalkerState::Invalid,
                }
                self.state
            }
        }
    }

    /// Start of the unit preceding the current position.
    fn previous_start(&self) -> Option<usize> {
        match self.mode.unit {
            WalkUnit::Element => Some(self.pos - self.enc.element_size().min(self.pos)),
            WalkUnit::Point => self.seek_back(self.pos),
            WalkUnit::Glyph => {
                let mut pos = self.pos;
                let mut points = 0;
                loop {
                    pos = self.seek_back(pos)?;
                    points += 1;
                    let point = self.enc.decode(&self.buf[pos..])?;
                    if !self.enc.is_combining(point)
                        || points >= self.enc.max_points_per_glyph()
                        || pos == self.start
                    {
                        return Some(pos);
                    }
                }
            }
        }
    }

    fn seek_back(&self, pos: usize) -> Option<usize> {
        let seek = if pos == self.buf.len() {
            self.enc.seek(self.buf, -1, None)
        } else {
            self.enc.seek(self.buf, -1, Some(pos))
        }?;
        Some(seek.pos)
    }

    /// The walker's state.
    #[must_use]
    pub fn state(&self) -> WalkerState {
        self.state
    }

    /// The iteration mode the walker was bound with.
    #[must_use]
    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    /// The encoding the walker was bound with.
    #[must_use]
    pub fn encoding(&self) -> &'enc dyn Encoding {
        self.enc
    }

    /// Byte offset the walk began at.
    #[must_use]
    pub fn start_position(&self) -> usize {
        self.start
    }

    /// Byte offset of the current unit.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte length of the current unit (zero at the end).
    #[must_use]
    pub fn current_len(&self) -> usize {
        self.len
    }

    /// Bytes remaining from the current position to the end of the
    /// buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes of the current unit.
    #[must_use]
    pub fn current_bytes(&self) -> &'buf [u8] {
        &self.buf[self.pos..self.pos + self.len]
    }

    /// First code point of the current unit, when it decodes.
    #[must_use]
    pub fn current_point(&self) -> Option<CodePoint> {
        self.enc.decode(self.current_bytes())
    }

    /// Decodes every code point of the current unit in order. A glyph
    /// step may yield several points; a point step yields one.
    #[must_use]
    pub fn current_points(&self) -> CurrentPoints<'_> {
        CurrentPoints {
            enc: self.enc,
            bytes: self.current_bytes(),
        }
    }
}

/// Iterator over the code points of a walker's current unit.
pub struct CurrentPoints<'w> {
    enc: &'w dyn Encoding,
    bytes: &'w [u8],
}

impl Iterator for CurrentPoints<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        let Probe::Complete(len) = self.enc.probe(self.bytes) else {
            return None;
        };
        let point = self.enc.decode(self.bytes)?;
        self.bytes = &self.bytes[len..];
        Some(point)
    }
}
