use std::vec::Vec;

use rstest::rstest;

use super::{Converter, StepStatus, transcode};
use crate::encoding::Encoding;
use crate::encodings::{ASCII, UTF_8, UTF_16LE, UTF_32LE};
use crate::error::ConvertError;
use crate::point::CodePoint;

fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn utf32le(s: &str) -> Vec<u8> {
    s.chars().flat_map(|c| (c as u32).to_le_bytes()).collect()
}

#[test]
fn ascii_pass_through() {
    let mut conv = Converter::bind(&ASCII, &ASCII);
    let mut out = [0u8; 16];
    let report = conv.step(b"hello", &mut out, 0).unwrap();
    assert_eq!(report.converted, 5);
    assert_eq!(report.bytes_read, 5);
    assert_eq!(report.status, StepStatus::Ok);
    assert_eq!(&out[..report.bytes_written], b"hello");
    let report = conv.finish(&mut out).unwrap();
    assert_eq!(report.status, StepStatus::Ok);
}

#[test]
fn utf8_to_utf16_known_bytes() {
    let produced = transcode(&UTF_8, &UTF_16LE, "aé€🂡".as_bytes()).unwrap();
    assert_eq!(produced, utf16le("aé€🂡"));
}

#[test]
fn utf16_to_utf32_known_bytes() {
    let produced = transcode(&UTF_16LE, &UTF_32LE, &utf16le("π🂡")).unwrap();
    assert_eq!(produced, utf32le("π🂡"));
}

#[test]
fn empty_input_is_a_no_op() {
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut out = [0u8; 4];
    let report = conv.step(b"", &mut out, 0).unwrap();
    assert_eq!(report.converted, 0);
    assert_eq!(report.bytes_written, 0);
    assert_eq!(report.status, StepStatus::Ok);
}

// ── carry-over across input boundaries ─────────────────────────────────

#[rstest]
#[case(1)]
#[case(2)]
fn boundary_split_of_three_byte_character(#[case] cut: usize) {
    let euro = "€".as_bytes();
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut out = [0u8; 8];

    let first = conv.step(&euro[..cut], &mut out, 0).unwrap();
    assert_eq!(first.converted, 0);
    assert_eq!(first.bytes_read, cut);
    assert_eq!(first.status, StepStatus::NeedMoreInput);
    assert_eq!(conv.pending_input(), &euro[..cut]);

    let second = conv.step(&euro[cut..], &mut out, 0).unwrap();
    assert_eq!(second.converted, 1);
    assert_eq!(second.status, StepStatus::Ok);
    assert!(conv.pending_input().is_empty());
    assert_eq!(&out[..second.bytes_written], utf16le("€").as_slice());
}

#[test]
fn byte_at_a_time_feed_matches_one_shot() {
    let text = "x🂡é";
    let bytes = text.as_bytes();
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut produced = Vec::new();
    let mut out = [0u8; 8];
    for &b in bytes {
        let report = conv.step(&[b], &mut out, 0).unwrap();
        produced.extend_from_slice(&out[..report.bytes_written]);
    }
    let report = conv.finish(&mut out).unwrap();
    produced.extend_from_slice(&out[..report.bytes_written]);
    assert_eq!(report.status, StepStatus::Ok);
    assert_eq!(produced, utf16le(text));
}

#[test]
fn split_utf16_element_carries_across_calls() {
    // One byte of a 2-byte element is already an incomplete character.
    let bytes = utf16le("é");
    let mut conv = Converter::bind(&UTF_16LE, &UTF_8);
    let mut out = [0u8; 8];
    let first = conv.step(&bytes[..1], &mut out, 0).unwrap();
    assert_eq!(first.status, StepStatus::NeedMoreInput);
    let second = conv.step(&bytes[1..], &mut out, 0).unwrap();
    assert_eq!(second.converted, 1);
    assert_eq!(&out[..second.bytes_written], "é".as_bytes());
}

// ── output capacity ────────────────────────────────────────────────────

#[test]
fn capacity_split_resumes_byte_identical() {
    let text = "abc";
    let expected = utf32le(text);
    let mut conv = Converter::bind(&UTF_8, &UTF_32LE);
    let mut produced = Vec::new();

    // Room for two encoded characters only.
    let mut small = [0u8; 8];
    let first = conv.step(text.as_bytes(), &mut small, 0).unwrap();
    assert_eq!(first.status, StepStatus::NeedMoreOutput);
    assert!(conv.pending_output().len() <= UTF_32LE.max_char_bytes());
    produced.extend_from_slice(&small[..first.bytes_written]);

    let mut fresh = [0u8; 16];
    let second = conv
        .step(&text.as_bytes()[first.bytes_read..], &mut fresh, 0)
        .unwrap();
    assert_eq!(second.status, StepStatus::Ok);
    produced.extend_from_slice(&fresh[..second.bytes_written]);

    assert_eq!(produced, expected);
    assert_eq!(conv.finish(&mut fresh).unwrap().status, StepStatus::Ok);
}

#[test]
fn single_character_split_across_output_buffers() {
    // One é encodes to two UTF-16 bytes; give the converter one byte of
    // capacity at a time.
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut produced = Vec::new();
    let mut tiny = [0u8; 1];

    let first = conv.step("é".as_bytes(), &mut tiny, 0).unwrap();
    assert_eq!(first.converted, 1);
    assert_eq!(first.status, StepStatus::NeedMoreOutput);
    produced.extend_from_slice(&tiny[..first.bytes_written]);
    assert_eq!(conv.pending_output().len(), 1);

    let second = conv.step(b"", &mut tiny, 0).unwrap();
    assert_eq!(second.status, StepStatus::Ok);
    produced.extend_from_slice(&tiny[..second.bytes_written]);

    assert_eq!(produced, utf16le("é"));
}

#[test]
fn finish_drains_output_carry() {
    let mut conv = Converter::bind(&UTF_8, &UTF_32LE);
    let mut tiny = [0u8; 1];
    let report = conv.step("a".as_bytes(), &mut tiny, 0).unwrap();
    assert_eq!(report.status, StepStatus::NeedMoreOutput);

    let mut produced = Vec::from(&tiny[..report.bytes_written]);
    loop {
        let report = conv.finish(&mut tiny).unwrap();
        produced.extend_from_slice(&tiny[..report.bytes_written]);
        if report.status == StepStatus::Ok {
            break;
        }
    }
    assert_eq!(produced, utf32le("a"));
}

// ── character budget ───────────────────────────────────────────────────

#[test]
fn max_chars_caps_the_call() {
    let mut conv = Converter::bind(&ASCII, &ASCII);
    let mut out = [0u8; 16];
    let report = conv.step(b"abcd", &mut out, 2).unwrap();
    assert_eq!(report.converted, 2);
    assert_eq!(report.bytes_read, 2);
    assert_eq!(report.status, StepStatus::Ok);
    let report = conv.step(b"cd", &mut out, 0).unwrap();
    assert_eq!(report.converted, 2);
}

// ── failure surfacing ──────────────────────────────────────────────────

#[test]
fn malformed_input_is_not_consumed() {
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut out = [0u8; 8];
    let error = conv.step(b"\x80abc", &mut out, 0).unwrap_err();
    assert_eq!(error, ConvertError::MalformedInput { offset: 0 });
    assert!(conv.pending_input().is_empty());
}

#[test]
fn malformed_after_progress_surfaces_next_call() {
    let input = b"a\xFFz";
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut out = [0u8; 8];

    let first = conv.step(input, &mut out, 0).unwrap();
    assert_eq!(first.converted, 1);
    assert_eq!(first.bytes_read, 1);
    assert_eq!(first.status, StepStatus::Ok);

    let error = conv
        .step(&input[first.bytes_read..], &mut out, 0)
        .unwrap_err();
    assert_eq!(error, ConvertError::MalformedInput { offset: 0 });
}

#[test]
fn byte_that_poisons_the_carry_stays_unconsumed() {
    let euro = "€".as_bytes();
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut out = [0u8; 8];

    let report = conv.step(&euro[..1], &mut out, 0).unwrap();
    assert_eq!(report.status, StepStatus::NeedMoreInput);

    // b'(' is no continuation byte; the carry keeps its valid prefix.
    let error = conv.step(b"(x", &mut out, 0).unwrap_err();
    assert_eq!(error, ConvertError::MalformedInput { offset: 0 });
    assert_eq!(conv.pending_input(), &euro[..1]);
}

#[test]
fn unrepresentable_point_reports_destination() {
    let mut conv = Converter::bind(&UTF_8, &ASCII);
    let mut out = [0u8; 8];
    let error = conv.step("é".as_bytes(), &mut out, 0).unwrap_err();
    assert_eq!(
        error,
        ConvertError::Unrepresentable {
            point: CodePoint::from('é'),
            encoding: "ascii".into(),
        }
    );
}

#[test]
fn carry_then_unrepresentable_keeps_pending_bytes() {
    let bytes = "é".as_bytes();
    let mut conv = Converter::bind(&UTF_8, &ASCII);
    let mut out = [0u8; 8];
    let first = conv.step(&bytes[..1], &mut out, 0).unwrap();
    assert_eq!(first.status, StepStatus::NeedMoreInput);
    let error = conv.step(&bytes[1..], &mut out, 0).unwrap_err();
    assert!(matches!(error, ConvertError::Unrepresentable { .. }));
    // The completed-but-unconvertible character stays inspectable.
    assert_eq!(conv.pending_input(), bytes);
}

#[test]
fn truncated_stream_diagnosed_once_at_finish() {
    let euro = "€".as_bytes();
    let mut conv = Converter::bind(&UTF_8, &UTF_16LE);
    let mut out = [0u8; 8];

    let report = conv.step(&euro[..2], &mut out, 0).unwrap();
    assert_eq!(report.status, StepStatus::NeedMoreInput);

    let error = conv.finish(&mut out).unwrap_err();
    assert_eq!(
        error,
        ConvertError::TruncatedStream {
            pending: euro[..2].to_vec(),
        }
    );

    // Reported once; the converter is drained afterwards.
    assert_eq!(conv.finish(&mut out).unwrap().status, StepStatus::Ok);
}

#[test]
fn transcode_rejects_truncated_input() {
    let error = transcode(&UTF_8, &UTF_16LE, &"€".as_bytes()[..1]).unwrap_err();
    assert!(matches!(error, ConvertError::TruncatedStream { .. }));
}
