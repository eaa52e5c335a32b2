//! Tests for the write-side encoder and the encode/join round trip.

use std::num::NonZeroUsize;

use proptest::prelude::*;

use crate::bundle::{encode_post, join_payloads};

fn size(n: usize) -> NonZeroUsize { NonZeroUsize::new(n).expect("non-zero chunk size") }

#[test]
fn encodes_a_post_without_digest_into_one_payload() {
    let payloads = encode_post("", "A", "B", &["s1", "s2"], size(4096));
    assert_eq!(payloads, ["next_address:A::previous_address:B::s1::s2"]);
}

#[test]
fn encodes_the_digest_segment_first() {
    let payloads = encode_post("d1", "A", "B", &["s1"], size(4096));
    assert_eq!(payloads, ["d1::next_address:A::previous_address:B::s1"]);
}

#[test]
fn respects_the_fragment_size() {
    let payloads = encode_post("", "A", "B", &["sample1", "sample2"], size(10));
    assert!(payloads.iter().all(|p| p.chars().count() <= 10));
    let total: usize = payloads.iter().map(String::len).sum();
    assert_eq!(total, "next_address:A::previous_address:B::sample1::sample2".len());
}

#[test]
fn a_post_with_no_samples_still_encodes_its_header() {
    let payloads = encode_post("", "A", "B", &[] as &[&str], size(4096));
    assert_eq!(join_payloads(&payloads).into_vec(), ["", "A", "B"]);
}

#[test]
fn trailing_empty_sample_round_trips_at_every_tear() {
    let samples = ["s1", ""];
    let whole = encode_post("", "A", "B", &samples, size(4096));
    let total = whole[0].len();
    for n in header_len("", "A", "B").max(1)..=total {
        let payloads = encode_post("", "A", "B", &samples, size(n));
        assert_eq!(
            join_payloads(&payloads).into_vec(),
            ["", "A", "B", "s1", ""],
            "fragment size {n}"
        );
    }
}

/// Character count of the reserved header prefix, through the previous
/// address. Fragment sizes below this would tear the address markers
/// themselves, which the wire format does not support: producers size
/// fragments well above the header.
fn header_len(digest: &str, next: &str, prev: &str) -> usize {
    let digest_len = if digest.is_empty() { 0 } else { digest.len() + 2 };
    digest_len + "next_address:".len() + next.len() + "::previous_address:".len() + prev.len()
}

fn wire_safe_sample() -> impl Strategy<Value = String> {
    "[a-z0-9 :]{1,8}".prop_filter("samples must not collide with the delimiter", |s| {
        !s.contains("::") && !s.starts_with(':') && !s.ends_with(':')
    })
}

proptest! {
    #[test]
    fn round_trip_recovers_the_field_list_at_every_tear(
        digest in "[a-z0-9]{0,6}",
        next in "[A-Z9]{0,10}",
        prev in "[A-Z9]{0,10}",
        samples in prop::collection::vec(wire_safe_sample(), 0..4),
    ) {
        let mut expected = vec![digest.clone(), next.clone(), prev.clone()];
        expected.extend(samples.iter().cloned());

        let whole = encode_post(&digest, &next, &prev, &samples, size(usize::MAX >> 1));
        prop_assert_eq!(whole.len(), 1);
        let total = whole[0].len();

        for n in header_len(&digest, &next, &prev).max(1)..=total {
            let payloads = encode_post(&digest, &next, &prev, &samples, size(n));
            let recovered = join_payloads(&payloads).into_vec();
            prop_assert_eq!(&recovered, &expected, "fragment size {}", n);
        }
    }

    #[test]
    fn join_never_panics_on_arbitrary_payload_sequences(
        payloads in prop::collection::vec("[a-z:]{0,12}", 0..6),
    ) {
        let first = join_payloads(&payloads);
        let second = join_payloads(&payloads);
        prop_assert_eq!(first, second);
    }
}
