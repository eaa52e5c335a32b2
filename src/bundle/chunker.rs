//! Write-side encoder producing fragment payloads for one post.
//!
//! Producers build a single `::`-delimited cleartext — digest segment, the
//! two link markers, then the samples — and cut it into fixed-size chunks,
//! one per transport fragment. [`join_payloads`](super::join_payloads) is the
//! exact inverse, which the round-trip tests rely on.

use std::num::NonZeroUsize;

use super::join::{FIELD_DELIMITER, NEXT_ADDRESS_MARKER, PREVIOUS_ADDRESS_MARKER};

/// Encode a post into fragment payloads of at most `fragment_size` characters.
///
/// An empty `digest` omits the digest segment entirely; the join engine
/// restores it as an empty leading field. Fields must not contain the
/// delimiter and must not end with a lone `:`, otherwise the wire format
/// cannot distinguish them from a delimiter boundary.
#[must_use]
pub fn encode_post<S: AsRef<str>>(
    digest: &str,
    next_address: &str,
    previous_address: &str,
    samples: &[S],
    fragment_size: NonZeroUsize,
) -> Vec<String> {
    let mut cleartext = String::new();
    if !digest.is_empty() {
        cleartext.push_str(digest);
        cleartext.push_str(FIELD_DELIMITER);
    }
    cleartext.push_str(NEXT_ADDRESS_MARKER);
    cleartext.push_str(next_address);
    cleartext.push_str(FIELD_DELIMITER);
    cleartext.push_str(PREVIOUS_ADDRESS_MARKER);
    cleartext.push_str(previous_address);
    for sample in samples {
        cleartext.push_str(FIELD_DELIMITER);
        cleartext.push_str(sample.as_ref());
    }

    chunk_chars(&cleartext, fragment_size)
}

/// Cut `text` into chunks of at most `size` characters, on char boundaries.
fn chunk_chars(text: &str, size: NonZeroUsize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size.get())
        .map(|chunk| chunk.iter().collect())
        .collect()
}
