//! Protocol parsing: field sets in, decoded blocks and packets out.
//!
//! Protocols form a closed set resolved once at stream construction; an
//! unknown protocol id is a configuration error, never a per-fetch one.

pub mod error;
mod plaintext;
pub mod timestamp;

use std::{fmt, str::FromStr};

pub use error::ProtocolError;
pub use timestamp::epoch_to_datetime;

use crate::{
    block::{Block, Packet},
    bundle::FieldSet,
};


/// Wire protocols a stream can be posted with.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// Space-separated cleartext samples, `::`-delimited on the wire.
    Plaintext,
}

impl Protocol {
    /// Decode a field set into a block header with undecoded sample strings.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidData`] when the set is shorter than
    /// the reserved header prefix plus one sample slot.
    pub fn parse_headers(self, address: &str, fields: &FieldSet) -> Result<Block, ProtocolError> {
        match self {
            Protocol::Plaintext => plaintext::parse_headers(address, fields),
        }
    }

    /// Decode a block's raw sample strings into packets.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidData`] when a sample does not split
    /// into its three space-separated parts or carries an unreadable
    /// timestamp.
    pub fn parse_data(self, block: &Block) -> Result<Vec<Packet>, ProtocolError> {
        match self {
            Protocol::Plaintext => plaintext::parse_data(block),
        }
    }

    /// Decode a field set all the way to a block with its packets attached.
    ///
    /// # Errors
    ///
    /// Propagates the [`parse_headers`](Self::parse_headers) and
    /// [`parse_data`](Self::parse_data) failures.
    pub fn decode(self, address: &str, fields: &FieldSet) -> Result<Block, ProtocolError> {
        let mut block = self.parse_headers(address, fields)?;
        let samples = self.parse_data(&block)?;
        block.attach_samples(samples);
        Ok(block)
    }
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        if id.eq_ignore_ascii_case("plaintext") {
            Ok(Protocol::Plaintext)
        } else {
            Err(ProtocolError::UnknownProtocol(id.to_owned()))
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Plaintext => f.write_str("plaintext"),
        }
    }
}
