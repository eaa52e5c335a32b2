//! Errors raised while decoding field sets into blocks and packets.

use thiserror::Error;

/// Failures produced by a [`Protocol`](crate::protocol::Protocol).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The payload does not conform to the protocol's framing or field rules.
    #[error("undecodable block at {address}: {detail}")]
    InvalidData {
        /// Address whose bundle failed to decode.
        address: String,
        /// What the decoder choked on.
        detail: String,
    },
    /// A protocol id outside the closed set was selected.
    #[error("unknown protocol id `{0}`")]
    UnknownProtocol(String),
}

impl ProtocolError {
    pub(crate) fn invalid(address: &str, detail: impl Into<String>) -> Self {
        Self::InvalidData {
            address: address.to_owned(),
            detail: detail.into(),
        }
    }
}
