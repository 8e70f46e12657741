use alloc::{string::String, vec, vec::Vec};
use core::cmp::Ordering;

use quickcheck::QuickCheck;

use crate::encoding::Encoding;
use crate::encodings::{ASCII, UTF_8, UTF_16LE};

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Two-pass transform: size, allocate, write. Asserts the sizing
/// idempotence contract along the way.
fn transform_to_vec(enc: &dyn Encoding, buf: &[u8]) -> Vec<u8> {
    let needed = enc.transform(buf, None).expect("sizing query");
    let mut out = vec![0u8; needed];
    let written = enc.transform(buf, Some(&mut out)).expect("transform write");
    assert_eq!(written, needed, "sizing query must match the real write");
    out
}

/// Property: byte-wise comparison of transformed buffers orders them the
/// same way `compare` orders the originals.
#[test]
fn transform_preserves_order_utf8_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: String, b: String) -> bool {
        let ta = transform_to_vec(&UTF_8, a.as_bytes());
        let tb = transform_to_vec(&UTF_8, b.as_bytes());
        ta.cmp(&tb) == UTF_8.compare(a.as_bytes(), b.as_bytes())
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, String) -> bool);
}

#[test]
fn transform_preserves_order_utf16_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: String, b: String) -> bool {
        let wa: Vec<u8> = a.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let wb: Vec<u8> = b.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let ta = transform_to_vec(&UTF_16LE, &wa);
        let tb = transform_to_vec(&UTF_16LE, &wb);
        ta.cmp(&tb) == UTF_16LE.compare(&wa, &wb)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, String) -> bool);
}

/// Raw UTF-16 byte order disagrees with code-point order for astral
/// characters; the canonical transform must not.
#[test]
fn utf16_surrogate_order_is_corrected() {
    // U+FFFD sorts after U+1F600 in raw UTF-16LE bytes, but before it in
    // code-point order.
    let a: Vec<u8> = "\u{FFFD}".encode_utf16().flat_map(u16::to_le_bytes).collect();
    let b: Vec<u8> = "\u{1F600}".encode_utf16().flat_map(u16::to_le_bytes).collect();
    assert_eq!(UTF_16LE.compare(&a, &b), Ordering::Less);
    let ta = transform_to_vec(&UTF_16LE, &a);
    let tb = transform_to_vec(&UTF_16LE, &b);
    assert_eq!(ta.cmp(&tb), Ordering::Less);
}

/// A derived encoding must order the shared character range exactly as
/// its base does.
#[test]
fn utf8_agrees_with_its_ascii_base() {
    let cases = [
        (&b"apple"[..], &b"apricot"[..]),
        (b"Zebra", b"zebra"),
        (b"same", b"same"),
        (b"", b"x"),
    ];
    for (a, b) in cases {
        assert_eq!(UTF_8.compare(a, b), ASCII.compare(a, b), "{a:?} vs {b:?}");
    }
}

/// Comparison decodes characters pairwise, so a malformed tail ends its
/// side rather than poisoning the whole comparison.
#[test]
fn malformed_tail_compares_as_end_of_buffer() {
    let clean = b"abc";
    let dirty = b"abc\xFF\xFF";
    assert_eq!(UTF_8.compare(clean, dirty), Ordering::Equal);
    assert_eq!(
        transform_to_vec(&UTF_8, clean),
        transform_to_vec(&UTF_8, dirty)
    );
}
