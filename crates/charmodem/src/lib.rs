//! Streaming, incremental character-set transcoding.
//!
//! This crate models text encodings as pluggable *character traits*: an
//! [`Encoding`] describes how one encoding locates, measures, and
//! classifies characters in a raw byte buffer. On top of that contract sit
//! two independent consumers:
//!
//! - [`Walker`], a read-only cursor that enumerates the characters of a
//!   caller-owned buffer one code point, user-perceived character, or raw
//!   element at a time;
//! - [`Converter`], a restartable pipeline stage that transcodes a stream
//!   of unknown total length between two encodings through fixed-size
//!   caller buffers, carrying partial characters across call boundaries
//!   without data loss.
//!
//! Encodings are immutable and shareable; the built-ins live in
//! [`encodings`] as `'static` instances and can be looked up by name
//! through a [`Registry`].
//!
//! ```
//! use charmodem::{Converter, StepStatus};
//! use charmodem::encodings::{UTF_8, UTF_16LE};
//!
//! let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
//! let mut out = [0u8; 32];
//! let report = conv.step("déjà vu".as_bytes(), &mut out, 0).unwrap();
//! assert_eq!(report.converted, 7);
//! assert_eq!(report.status, StepStatus::Ok);
//! assert_eq!(conv.finish(&mut out).unwrap().status, StepStatus::Ok);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod converter;
mod encoding;
pub mod encodings;
mod error;
mod flags;
mod point;
mod registry;
mod walker;

#[cfg(test)]
mod tests;

pub use converter::{Converter, StepReport, StepStatus, transcode};
pub use encoding::{Encoding, Probe, Seek};
pub use error::ConvertError;
pub use flags::CharFlags;
pub use point::CodePoint;
pub use registry::Registry;
pub use walker::{CurrentPoints, WalkMode, WalkUnit, Walker, WalkerState};
