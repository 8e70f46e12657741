//! Converter error taxonomy.

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::point::CodePoint;

/// A fatal conversion failure.
///
/// Capacity exhaustion and a mid-stream incomplete character are *not*
/// errors: they are [`StepStatus`](crate::StepStatus) values, fully
/// recoverable by calling [`Converter::step`](crate::Converter::step)
/// again. An error here ends the current conversion; the converter never
/// retries a step it has reported as failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The input cannot be a prefix of any valid source character.
    ///
    /// `offset` is the byte position inside the current call's input slice
    /// at which the walk stopped; the offending bytes are not consumed and
    /// any retained carry-over is left in place for inspection.
    #[error("malformed input at byte offset {offset}")]
    MalformedInput {
        /// Byte offset into the current input slice.
        offset: usize,
    },

    /// A decoded code point has no rendering under the destination
    /// encoding.
    #[error("code point {point:?} is not representable in {encoding}")]
    Unrepresentable {
        /// The point that could not be encoded.
        point: CodePoint,
        /// Name of the destination encoding.
        encoding: String,
    },

    /// End of input was declared while a partial character was pending.
    ///
    /// Only diagnosed by [`Converter::finish`](crate::Converter::finish);
    /// the identical in-memory state mid-stream is reported as
    /// [`StepStatus::NeedMoreInput`](crate::StepStatus::NeedMoreInput),
    /// because more input may legitimately arrive. Reported once: the
    /// undecodable trailing bytes move out of the converter and into the
    /// error.
    #[error("input ended inside a partial character ({} bytes pending)", pending.len())]
    TruncatedStream {
        /// The undecodable trailing bytes.
        pending: Vec<u8>,
    },
}
