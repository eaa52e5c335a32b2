//! Ledger backends and the fetch pipeline from address to decoded block.
//!
//! The actual "give me every record anchored at this address" capability is
//! behind the [`RecordSource`] trait; it is a network operation against an
//! external, eventually-consistent store and is the only suspension point in
//! the whole reconstruction path. Backends form a closed [`Network`] set
//! resolved at configuration time.

pub mod error;
mod iota;

use std::{fmt, str::FromStr};

use async_trait::async_trait;
pub use error::{ConnectorError, UnknownNetwork};
pub use iota::IotaConnector;

use crate::{block::Block, bundle::TransportFragment, protocol::Protocol};


/// Raw record retrieval for one ledger address.
///
/// Implementations talk to the backing store; everything above them is pure.
/// Transient backend failures surface as [`ConnectorError::Transient`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every transport fragment whose bundle is anchored at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Transient`] when the backend cannot be
    /// reached or answers with a failure.
    async fn records(&self, address: &str) -> Result<Vec<TransportFragment>, ConnectorError>;
}

/// Fetch-and-decode boundary consumed by a stream.
#[async_trait]
pub trait LedgerConnector: Send + Sync {
    /// Resolve `address` to a fully decoded block with its packets attached.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidAddress`] for an empty address,
    /// [`ConnectorError::NoDataFetched`] when the backend has nothing for a
    /// non-empty address yet, [`ConnectorError::InvalidData`] when the
    /// bundle cannot be decoded, and [`ConnectorError::Transient`] for
    /// backend failures.
    async fn fetch(&self, address: &str) -> Result<Block, ConnectorError>;
}

/// Ledger networks a stream can be anchored on.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// The IOTA tangle: bundles of fixed-size signature-message fragments.
    Iota,
}

impl Network {
    /// Build the connector for this network over `source`.
    #[must_use]
    pub fn connector<S: RecordSource>(self, source: S, protocol: Protocol) -> IotaConnector<S> {
        match self {
            Network::Iota => IotaConnector::new(source, protocol),
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        if id.eq_ignore_ascii_case("iota") {
            Ok(Network::Iota)
        } else {
            Err(UnknownNetwork(id.to_owned()))
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Iota => f.write_str("iota"),
        }
    }
}
