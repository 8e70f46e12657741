//! Character classification flags.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use crate::point::CodePoint;

/// A bitset of classification tags for one code point.
///
/// Composite classes are derived, never stored: alphanumeric is
/// `ALPHA | DIGIT` and graphic is alphanumeric plus `PUNCT`. Query them
/// through [`CharFlags::is_alphanumeric`] and [`CharFlags::is_graphic`].
///
/// ```
/// use charmodem::{CharFlags, CodePoint, Encoding};
/// use charmodem::encodings::ASCII;
///
/// let f = ASCII.classify(CodePoint::from('7'));
/// assert!(f.contains(CharFlags::DIGIT));
/// assert!(f.is_alphanumeric());
/// assert!(!f.contains(CharFlags::ALPHA));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CharFlags(u16);

impl CharFlags {
    /// No classification applies (an invalid or unknown code point).
    pub const NONE: Self = CharFlags(0);
    /// An alphabetic character.
    pub const ALPHA: Self = CharFlags(1 << 0);
    /// A decimal digit.
    pub const DIGIT: Self = CharFlags(1 << 1);
    /// A hexadecimal digit.
    pub const XDIGIT: Self = CharFlags(1 << 2);
    /// A control character.
    pub const CNTRL: Self = CharFlags(1 << 3);
    /// A printable character.
    pub const PRINT: Self = CharFlags(1 << 4);
    /// A punctuation character.
    pub const PUNCT: Self = CharFlags(1 << 5);
    /// A whitespace character, including newlines and tabs.
    pub const SPACE: Self = CharFlags(1 << 6);
    /// A newline character. Implies [`CharFlags::SPACE`].
    pub const NEWLINE: Self = CharFlags(1 << 7);
    /// An uppercase letter. Implies [`CharFlags::ALPHA`].
    pub const UPPER: Self = CharFlags(1 << 8);
    /// A lowercase letter. Implies [`CharFlags::ALPHA`].
    pub const LOWER: Self = CharFlags(1 << 9);
    /// The end-of-stream marker character of an encoding that has one.
    pub const EOS: Self = CharFlags(1 << 10);
    /// Valid in the encoding but matching no other classification.
    pub const VALID: Self = CharFlags(1 << 11);

    /// Returns `true` when every tag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` when any tag in `other` is set in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` when no tag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Alphabetic or digit. Derived, never stored.
    #[must_use]
    pub const fn is_alphanumeric(self) -> bool {
        self.intersects(CharFlags(Self::ALPHA.0 | Self::DIGIT.0))
    }

    /// Alphanumeric or punctuation. Derived, never stored.
    #[must_use]
    pub const fn is_graphic(self) -> bool {
        self.is_alphanumeric() || self.contains(Self::PUNCT)
    }

    /// Valid under the encoding: any classification tag, or the explicit
    /// [`CharFlags::VALID`] catch-all.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// The raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for CharFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CharFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CharFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CharFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        CharFlags(self.0 & rhs.0)
    }
}

impl BitAndAssign for CharFlags {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Debug for CharFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(CharFlags, &str); 12] = [
            (CharFlags::ALPHA, "ALPHA"),
            (CharFlags::DIGIT, "DIGIT"),
            (CharFlags::XDIGIT, "XDIGIT"),
            (CharFlags::CNTRL, "CNTRL"),
            (CharFlags::PRINT, "PRINT"),
            (CharFlags::PUNCT, "PUNCT"),
            (CharFlags::SPACE, "SPACE"),
            (CharFlags::NEWLINE, "NEWLINE"),
            (CharFlags::UPPER, "UPPER"),
            (CharFlags::LOWER, "LOWER"),
            (CharFlags::EOS, "EOS"),
            (CharFlags::VALID, "VALID"),
        ];
        if self.is_empty() {
            return f.write_str("CharFlags(NONE)");
        }
        f.write_str("CharFlags(")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}

/// Classification for encodings whose code space is Unicode.
///
/// Punctuation detection only covers the ASCII block; non-ASCII
/// punctuation falls back to the `VALID` catch-all, since the full Unicode
/// category tables are out of scope here.
pub(crate) fn classify_unicode(point: CodePoint) -> CharFlags {
    let Some(c) = point.to_char() else {
        return CharFlags::NONE;
    };
    let mut f = CharFlags::NONE;
    if c.is_alphabetic() {
        f |= CharFlags::ALPHA;
    }
    if c.is_numeric() {
        f |= CharFlags::DIGIT;
    }
    if c.is_ascii_hexdigit() {
        f |= CharFlags::XDIGIT;
    }
    if c.is_control() {
        f |= CharFlags::CNTRL;
    } else {
        f |= CharFlags::PRINT;
    }
    if c.is_ascii_punctuation() {
        f |= CharFlags::PUNCT;
    }
    if c.is_whitespace() {
        f |= CharFlags::SPACE;
    }
    if matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    ) {
        f |= CharFlags::NEWLINE | CharFlags::SPACE;
    }
    if c.is_uppercase() {
        f |= CharFlags::UPPER;
    }
    if c.is_lowercase() {
        f |= CharFlags::LOWER;
    }
    if f == CharFlags::PRINT {
        // Printable but otherwise unclassified (symbols, marks, ...).
        f |= CharFlags::VALID;
    }
    f
}

#[cfg(test)]
mod tests {
    use super::{CharFlags, classify_unicode};
    use crate::point::CodePoint;

    #[test]
    fn composites_are_derived() {
        let alpha = CharFlags::ALPHA;
        let digit = CharFlags::DIGIT;
        let punct = CharFlags::PUNCT;
        assert!(alpha.is_alphanumeric());
        assert!(digit.is_alphanumeric());
        assert!(!punct.is_alphanumeric());
        assert!(punct.is_graphic());
        assert!(!CharFlags::SPACE.is_graphic());
    }

    #[test]
    fn newline_implies_space() {
        let f = classify_unicode(CodePoint::from('\n'));
        assert!(f.contains(CharFlags::NEWLINE));
        assert!(f.contains(CharFlags::SPACE));
    }

    #[test]
    fn unclassified_symbol_is_valid() {
        let f = classify_unicode(CodePoint::from('←'));
        assert!(f.contains(CharFlags::VALID));
        assert!(f.is_valid());
        assert!(!f.is_alphanumeric());
    }

    #[test]
    fn case_tags() {
        let upper = classify_unicode(CodePoint::from('Å'));
        assert!(upper.contains(CharFlags::UPPER | CharFlags::ALPHA));
        let lower = classify_unicode(CodePoint::from('ß'));
        assert!(lower.contains(CharFlags::LOWER | CharFlags::ALPHA));
    }

    #[test]
    fn invalid_point_is_empty() {
        assert!(classify_unicode(CodePoint::NONE).is_empty());
        assert!(classify_unicode(CodePoint::new(0xD800)).is_empty());
    }

    #[test]
    fn debug_lists_tags() {
        use std::format;
        let f = CharFlags::ALPHA | CharFlags::LOWER;
        assert_eq!(format!("{f:?}"), "CharFlags(ALPHA | LOWER)");
    }
}
