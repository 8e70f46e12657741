//! Code point value type.

use core::fmt;

/// The integer identity of one character within an encoding's code space.
///
/// A `CodePoint` is a plain value: it never owns memory and carries no
/// reference to the encoding that produced it. The distinguished
/// [`CodePoint::NONE`] sentinel means "no character / end of input"; every
/// real character identity is non-negative.
///
/// # Examples
///
/// ```
/// use charmodem::CodePoint;
///
/// let a = CodePoint::from('A');
/// assert_eq!(a.value(), 0x41);
/// assert_eq!(a.to_char(), Some('A'));
/// assert!(!a.is_none());
/// assert!(CodePoint::NONE.is_none());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(i32);

impl CodePoint {
    /// The "no character / end of input" sentinel.
    pub const NONE: Self = CodePoint(-1);

    /// Wraps a raw non-negative identity. Negative values collapse to
    /// [`CodePoint::NONE`].
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        if raw < 0 { Self::NONE } else { CodePoint(raw) }
    }

    /// Wraps an unsigned identity, or `None` when it does not fit the
    /// signed code-point range.
    #[must_use]
    pub const fn from_u32(raw: u32) -> Option<Self> {
        if raw <= i32::MAX as u32 {
            Some(CodePoint(raw as i32))
        } else {
            None
        }
    }

    /// Returns `true` for the [`CodePoint::NONE`] sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 < 0
    }

    /// The raw signed identity (`-1` for [`CodePoint::NONE`]).
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// The identity as an unsigned integer, or `None` for the sentinel.
    #[must_use]
    pub const fn to_u32(self) -> Option<u32> {
        if self.0 < 0 { None } else { Some(self.0 as u32) }
    }

    /// The identity as a Unicode scalar value, when it is one.
    ///
    /// Encodings whose code space is not Unicode may hold identities with
    /// no `char` equivalent; those return `None` here.
    #[must_use]
    pub fn to_char(self) -> Option<char> {
        match self.to_u32() {
            Some(v) => char::from_u32(v),
            None => None,
        }
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        CodePoint(c as i32)
    }
}

impl fmt::Debug for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("CodePoint(NONE)")
        } else {
            write!(f, "CodePoint(U+{:04X})", self.0)
        }
    }
}
