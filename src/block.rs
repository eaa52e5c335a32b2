//! Decoded logical units: blocks and the packets they carry.

use chrono::{DateTime, Utc};

/// Metadata recovered from a block's reserved header fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockMetadata {
    /// Digest segment of the header, verbatim as posted.
    pub digest: String,
}

/// The logical, application-level unit reconstructed from one bundle.
///
/// A block is immutable once constructed; the only population step is
/// [`attach_samples`](Block::attach_samples), which the connector performs
/// exactly once while decoding. Blocks are shared as `Arc<Block>` out of the
/// stream's address index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    address: String,
    next_link: String,
    previous_link: String,
    metadata: BlockMetadata,
    raw_samples: Vec<String>,
    samples: Vec<Packet>,
}

impl Block {
    /// Construct a block header with its undecoded sample strings.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        next_link: impl Into<String>,
        previous_link: impl Into<String>,
        metadata: BlockMetadata,
        raw_samples: Vec<String>,
    ) -> Self {
        Self {
            address: address.into(),
            next_link: next_link.into(),
            previous_link: previous_link.into(),
            metadata,
            raw_samples,
            samples: Vec::new(),
        }
    }

    /// Address the block was fetched from.
    #[must_use]
    pub fn address(&self) -> &str { &self.address }

    /// Address of the next block; empty when no further block is known.
    #[must_use]
    pub fn next_link(&self) -> &str { &self.next_link }

    /// Address of the previous block; empty at the start of the stream.
    #[must_use]
    pub fn previous_link(&self) -> &str { &self.previous_link }

    /// Header metadata, including the digest.
    #[must_use]
    pub fn metadata(&self) -> &BlockMetadata { &self.metadata }

    /// Sample strings exactly as recovered from the wire.
    #[must_use]
    pub fn raw_samples(&self) -> &[String] { &self.raw_samples }

    /// Decoded packets in field order.
    #[must_use]
    pub fn samples(&self) -> &[Packet] { &self.samples }

    /// Populate the decoded packets. Called once during parsing.
    pub(crate) fn attach_samples(&mut self, samples: Vec<Packet>) { self.samples = samples; }
}

/// One decoded data sample belonging to a block.
///
/// Packets reference their owning block by address only; they never keep the
/// block alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    raw: String,
    tag: String,
    tags: Vec<String>,
    timestamp: DateTime<Utc>,
    data: String,
    block_address: String,
}

impl Packet {
    #[must_use]
    pub fn new(
        raw: impl Into<String>,
        tag: impl Into<String>,
        tags: Vec<String>,
        timestamp: DateTime<Utc>,
        data: impl Into<String>,
        block_address: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            tag: tag.into(),
            tags,
            timestamp,
            data: data.into(),
            block_address: block_address.into(),
        }
    }

    /// The original field text the packet was decoded from.
    #[must_use]
    pub fn raw(&self) -> &str { &self.raw }

    /// Primary classifier tag.
    #[must_use]
    pub fn tag(&self) -> &str { &self.tag }

    /// Secondary tags, in wire order.
    #[must_use]
    pub fn tags(&self) -> &[String] { &self.tags }

    /// Sample timestamp, normalized to UTC.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> { self.timestamp }

    /// Opaque payload value.
    #[must_use]
    pub fn data(&self) -> &str { &self.data }

    /// Address of the owning block, for lookup through a stream's index.
    #[must_use]
    pub fn block_address(&self) -> &str { &self.block_address }
}
