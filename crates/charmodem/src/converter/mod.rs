//! Incremental transcoding between two encodings.
//!
//! A [`Converter`] chains a source and a destination [`Encoding`] and is
//! driven call-after-call with whatever input bytes and output capacity
//! the stream binding has on hand. Two small carry buffers make the
//! protocol restartable with no data loss at buffer boundaries:
//!
//! - *input carry*: the trailing bytes of the previous call that were a
//!   valid prefix of a character but did not complete one. Always strictly
//!   shorter than the source encoding's widest character.
//! - *output carry*: the encoded bytes of a converted character that did
//!   not fit the previous call's output slice. Drained before any new
//!   input is processed; never longer than the destination encoding's
//!   widest character.
//!
//! Failure ordering: when a call has already delivered work (drained
//! carry, converted characters) and then runs into malformed or
//! unrepresentable data, the call returns `Ok` with that progress and
//! `bytes_read` stopped at the offending position; the error itself
//! surfaces on the next call, which can make no progress. A step reported
//! as failed is never retried internally.

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

use crate::encoding::{Encoding, Probe};
use crate::error::ConvertError;
use crate::point::CodePoint;

/// Outcome classification of one [`Converter::step`] call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The call ran to its natural end: input exhausted, or the
    /// `max_chars` budget reached, or progress stopped just before a
    /// position the next call will report as an error. Compare
    /// `bytes_read` against the input length to distinguish.
    Ok,
    /// All input was consumed and the trailing bytes were an incomplete
    /// character, now held as input carry. Not an error: call `step`
    /// again with the next input, or [`Converter::finish`] to diagnose a
    /// truncated stream.
    NeedMoreInput,
    /// The output slice filled up before the converted character was
    /// fully delivered; the remainder is held as output carry. Call again
    /// with fresh capacity.
    NeedMoreOutput,
}

/// What one [`Converter::step`] call accomplished.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Source characters converted by this call.
    pub converted: usize,
    /// Bytes consumed from this call's input slice (including bytes
    /// absorbed into the input carry).
    pub bytes_read: usize,
    /// Bytes written to this call's output slice.
    pub bytes_written: usize,
    /// Why the call returned.
    pub status: StepStatus,
}

/// A stateful pipeline stage transcoding a byte stream from one encoding
/// to another, incrementally.
///
/// ```
/// use charmodem::{Converter, StepStatus};
/// use charmodem::encodings::{UTF_8, UTF_16LE};
///
/// let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
/// let mut out = [0u8; 16];
///
/// // "é" split across two calls: the first byte alone converts nothing.
/// let report = conv.step(&"é".as_bytes()[..1], &mut out, 0).unwrap();
/// assert_eq!(report.status, StepStatus::NeedMoreInput);
/// assert_eq!(report.converted, 0);
///
/// let report = conv.step(&"é".as_bytes()[1..], &mut out, 0).unwrap();
/// assert_eq!(report.converted, 1);
/// assert_eq!(&out[..report.bytes_written], &[0xE9, 0x00]);
///
/// conv.finish(&mut out).unwrap();
/// ```
pub struct Converter<'enc> {
    from: &'enc dyn Encoding,
    to: &'enc dyn Encoding,
    carry_in: Vec<u8>,
    carry_out: Vec<u8>,
}

impl<'enc> Converter<'enc> {
    /// Binds a converter to a source and destination encoding.
    ///
    /// The pair may be identical, making the converter a validating
    /// pass-through.
    #[must_use]
    pub fn bind(from: &'enc dyn Encoding, to: &'enc dyn Encoding) -> Self {
        Converter {
            from,
            to,
            carry_in: Vec::new(),
            carry_out: Vec::new(),
        }
    }

    /// The source encoding.
    #[must_use]
    pub fn from_encoding(&self) -> &'enc dyn Encoding {
        self.from
    }

    /// The destination encoding.
    #[must_use]
    pub fn to_encoding(&self) -> &'enc dyn Encoding {
        self.to
    }

    /// Bytes of the pending incomplete source character, for the binding
    /// layer's recovery policy.
    #[must_use]
    pub fn pending_input(&self) -> &[u8] {
        &self.carry_in
    }

    /// Undelivered encoded bytes awaiting output capacity.
    #[must_use]
    pub fn pending_output(&self) -> &[u8] {
        &self.carry_out
    }

    /// Converts as much of `input` as fits the rules and the `output`
    /// capacity. `max_chars` caps the characters converted by this call;
    /// zero means "as many as fit".
    ///
    /// # Errors
    ///
    /// [`ConvertError::MalformedInput`] when the bytes at `bytes_read`
    /// cannot begin any source character, and
    /// [`ConvertError::Unrepresentable`] when a decoded point has no
    /// destination rendering. Both are only returned by a call that made
    /// no progress; a call that already converted or delivered something
    /// reports that work first and the error surfaces on the next call.
    /// After an error, bytes may have moved into the input carry;
    /// [`Converter::pending_input`] reflects exactly what is held.
    pub fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        max_chars: usize,
    ) -> Result<StepReport, ConvertError> {
        let mut converted = 0;
        let mut read = 0;
        let mut written = self.drain_carry_out(output);
        if !self.carry_out.is_empty() {
            return Ok(StepReport {
                converted,
                bytes_read: read,
                bytes_written: written,
                status: StepStatus::NeedMoreOutput,
            });
        }

        // Complete the pending partial character byte by byte before
        // touching the rest of the input.
        while !self.carry_in.is_empty() {
            match self.from.probe(&self.carry_in) {
                Probe::Complete(len) => {
                    debug_assert_eq!(len, self.carry_in.len());
                    let carry = core::mem::take(&mut self.carry_in);
                    match self.from.decode(&carry) {
                        Some(point) => match self.emit_point(point, output, &mut written) {
                            Ok(true) => converted += 1,
                            Ok(false) => {
                                return Ok(StepReport {
                                    converted: converted + 1,
                                    bytes_read: read,
                                    bytes_written: written,
                                    status: StepStatus::NeedMoreOutput,
                                });
                            }
                            Err(error) => {
                                self.carry_in = carry;
                                return self.fail(converted, read, written, error);
                            }
                        },
                        None => {
                            self.carry_in = carry;
                            return self.fail(
                                converted,
                                read,
                                written,
                                ConvertError::MalformedInput { offset: read },
                            );
                        }
                    }
                    break;
                }
                Probe::Incomplete => {
                    if self.carry_in.len() >= self.from.max_char_bytes() {
                        // The trait contract promises resolution within
                        // max_char_bytes; treat a violation as malformed.
                        return self.fail(
                            converted,
                            read,
                            written,
                            ConvertError::MalformedInput { offset: read },
                        );
                    }
                    let Some(&byte) = input.get(read) else {
                        return Ok(StepReport {
                            converted,
                            bytes_read: read,
                            bytes_written: written,
                            status: StepStatus::NeedMoreInput,
                        });
                    };
                    // Keep the carry a valid prefix: a byte that would
                    // poison it stays unconsumed in the input.
                    self.carry_in.push(byte);
                    if self.from.probe(&self.carry_in) == Probe::Invalid {
                        self.carry_in.pop();
                        return self.fail(
                            converted,
                            read,
                            written,
                            ConvertError::MalformedInput { offset: read },
                        );
                    }
                    read += 1;
                }
                Probe::Empty | Probe::Invalid => {
                    return self.fail(
                        converted,
                        read,
                        written,
                        ConvertError::MalformedInput { offset: read },
                    );
                }
            }
        }

        loop {
            if max_chars != 0 && converted >= max_chars {
                break;
            }
            match self.from.probe(&input[read..]) {
                Probe::Empty => break,
                Probe::Complete(len) => {
                    let Some(point) = self.from.decode(&input[read..read + len]) else {
                        return self.fail(
                            converted,
                            read,
                            written,
                            ConvertError::MalformedInput { offset: read },
                        );
                    };
                    match self.emit_point(point, output, &mut written) {
                        Ok(true) => {
                            read += len;
                            converted += 1;
                        }
                        Ok(false) => {
                            return Ok(StepReport {
                                converted: converted + 1,
                                bytes_read: read + len,
                                bytes_written: written,
                                status: StepStatus::NeedMoreOutput,
                            });
                        }
                        Err(error) => return self.fail(converted, read, written, error),
                    }
                }
                Probe::Incomplete => {
                    self.carry_in.extend_from_slice(&input[read..]);
                    return Ok(StepReport {
                        converted,
                        bytes_read: input.len(),
                        bytes_written: written,
                        status: StepStatus::NeedMoreInput,
                    });
                }
                Probe::Invalid => {
                    return self.fail(
                        converted,
                        read,
                        written,
                        ConvertError::MalformedInput { offset: read },
                    );
                }
            }
        }

        Ok(StepReport {
            converted,
            bytes_read: read,
            bytes_written: written,
            status: StepStatus::Ok,
        })
    }

    /// Declares end of input: drains any output carry and diagnoses a
    /// truncated stream. Repeat the call with fresh capacity while it
    /// reports [`StepStatus::NeedMoreOutput`].
    ///
    /// # Errors
    ///
    /// [`ConvertError::TruncatedStream`] when an incomplete character is
    /// still pending once the output carry has drained. The pending bytes
    /// move into the error; a second `finish` succeeds.
    pub fn finish(&mut self, output: &mut [u8]) -> Result<StepReport, ConvertError> {
        let written = self.drain_carry_out(output);
        if !self.carry_out.is_empty() {
            return Ok(StepReport {
                converted: 0,
                bytes_read: 0,
                bytes_written: written,
                status: StepStatus::NeedMoreOutput,
            });
        }
        if !self.carry_in.is_empty() {
            return Err(ConvertError::TruncatedStream {
                pending: core::mem::take(&mut self.carry_in),
            });
        }
        Ok(StepReport {
            converted: 0,
            bytes_read: 0,
            bytes_written: written,
            status: StepStatus::Ok,
        })
    }

    /// Moves as much of the output carry as fits into `output` and
    /// returns the byte count.
    fn drain_carry_out(&mut self, output: &mut [u8]) -> usize {
        let n = self.carry_out.len().min(output.len());
        output[..n].copy_from_slice(&self.carry_out[..n]);
        self.carry_out.drain(..n);
        n
    }

    /// Encodes one point into `output`, spilling into the output carry
    /// when capacity runs short. `Ok(true)` when fully delivered.
    fn emit_point(
        &mut self,
        point: CodePoint,
        output: &mut [u8],
        written: &mut usize,
    ) -> Result<bool, ConvertError> {
        let needed = self
            .to
            .encode(point, None)
            .ok_or_else(|| self.unrepresentable(point))?;
        let free = output.len() - *written;
        if needed <= free {
            let n = self
                .to
                .encode(point, Some(&mut output[*written..*written + needed]))
                .ok_or_else(|| self.unrepresentable(point))?;
            debug_assert_eq!(n, needed);
            *written += needed;
            Ok(true)
        } else {
            debug_assert!(self.carry_out.is_empty());
            let to = self.to;
            self.carry_out.resize(needed, 0);
            if to.encode(point, Some(&mut self.carry_out[..])).is_none() {
                self.carry_out.clear();
                return Err(self.unrepresentable(point));
            }
            output[*written..].copy_from_slice(&self.carry_out[..free]);
            self.carry_out.drain(..free);
            *written = output.len();
            Ok(false)
        }
    }

    fn unrepresentable(&self, point: CodePoint) -> ConvertError {
        ConvertError::Unrepresentable {
            point,
            encoding: self.to.name().into(),
        }
    }

    /// Reports already-made progress as a normal return, or surfaces the
    /// error when the call achieved nothing.
    fn fail(
        &self,
        converted: usize,
        read: usize,
        written: usize,
        error: ConvertError,
    ) -> Result<StepReport, ConvertError> {
        if converted > 0 || written > 0 {
            Ok(StepReport {
                converted,
                bytes_read: read,
                bytes_written: written,
                status: StepStatus::Ok,
            })
        } else {
            Err(error)
        }
    }
}

/// One-shot conversion of a complete in-memory buffer.
///
/// Drives a [`Converter`] to completion and returns the produced bytes.
/// The incremental `step` protocol produces byte-identical output for any
/// partitioning of `input`.
///
/// # Errors
///
/// Any [`ConvertError`] the underlying converter reports, including
/// [`ConvertError::TruncatedStream`] for input ending mid-character.
pub fn transcode(
    from: &dyn Encoding,
    to: &dyn Encoding,
    input: &[u8],
) -> Result<Vec<u8>, ConvertError> {
    let mut converter = Converter::bind(from, to);
    let mut produced = Vec::new();
    let mut chunk = [0u8; 64];
    let mut read = 0;
    loop {
        let report = converter.step(&input[read..], &mut chunk, 0)?;
        read += report.bytes_read;
        produced.extend_from_slice(&chunk[..report.bytes_written]);
        if report.status == StepStatus::Ok && read == input.len() {
            break;
        }
        if report.status == StepStatus::NeedMoreInput {
            break;
        }
    }
    loop {
        let report = converter.finish(&mut chunk)?;
        produced.extend_from_slice(&chunk[..report.bytes_written]);
        if report.status == StepStatus::Ok {
            return Ok(produced);
        }
    }
}
