//! Raw ledger records and their deterministic bundle ordering.

use super::join::{FieldSet, join_payloads};

/// One physical record retrieved from the ledger.
///
/// A fragment carries a fixed-size slice of a larger logical payload.
/// Instances are immutable once fetched; the connector only ever reorders
/// them, never rewrites them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportFragment {
    bundle_hash: String,
    sequence_index: u32,
    payload: String,
    timestamp: i64,
    attachment_timestamp: i64,
}

impl TransportFragment {
    /// Construct a fragment as fetched from a ledger backend.
    #[must_use]
    pub fn new(
        bundle_hash: impl Into<String>,
        sequence_index: u32,
        payload: impl Into<String>,
        timestamp: i64,
        attachment_timestamp: i64,
    ) -> Self {
        Self {
            bundle_hash: bundle_hash.into(),
            sequence_index,
            payload: payload.into(),
            timestamp,
            attachment_timestamp,
        }
    }

    /// Hash of the bundle this fragment belongs to.
    #[must_use]
    pub fn bundle_hash(&self) -> &str { &self.bundle_hash }

    /// Position within the bundle; index 0 is the header fragment.
    #[must_use]
    pub const fn sequence_index(&self) -> u32 { self.sequence_index }

    /// The opaque payload text carried by this fragment.
    #[must_use]
    pub fn payload(&self) -> &str { &self.payload }

    /// Epoch seconds at which the record was broadcast.
    #[must_use]
    pub const fn timestamp(&self) -> i64 { self.timestamp }

    /// Epoch milliseconds at which the record was attached to the ledger.
    #[must_use]
    pub const fn attachment_timestamp(&self) -> i64 { self.attachment_timestamp }
}

/// An ordered group of fragments that together encode one logical post.
///
/// Fragments are sorted by `sequence_index` with `timestamp` as the
/// ascending tie-break: the ledger does not guarantee index uniqueness under
/// retries, so the secondary key (applied with a stable sort) keeps
/// reconstruction deterministic. Bundles are materialized per fetch call and
/// discarded after reconstruction.
#[derive(Clone, Debug, Default)]
pub struct Bundle {
    fragments: Vec<TransportFragment>,
}

impl Bundle {
    /// Order `fragments` into a bundle.
    #[must_use]
    pub fn from_fragments(mut fragments: Vec<TransportFragment>) -> Self {
        fragments.sort_by(|a, b| {
            a.sequence_index
                .cmp(&b.sequence_index)
                .then(a.timestamp.cmp(&b.timestamp))
        });
        Self { fragments }
    }

    /// Fragments in reconstruction order.
    #[must_use]
    pub fn fragments(&self) -> &[TransportFragment] { &self.fragments }

    /// Number of fragments in the bundle.
    #[must_use]
    pub fn len(&self) -> usize { self.fragments.len() }

    /// Whether the bundle holds no fragments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.fragments.is_empty() }

    /// Recover the logical field set from the bundle's payloads.
    #[must_use]
    pub fn fields(&self) -> FieldSet {
        join_payloads(self.fragments.iter().map(TransportFragment::payload))
    }
}
