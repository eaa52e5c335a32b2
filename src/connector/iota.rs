//! Connector for streams anchored on the IOTA tangle.

use async_trait::async_trait;
use log::debug;

use super::{ConnectorError, LedgerConnector, RecordSource};
use crate::{block::Block, bundle::Bundle, protocol::Protocol};

/// Fetches a bundle's fragments from the tangle and decodes them into a
/// block.
///
/// The tangle has no block primitive of its own: what exists at an address
/// is a set of transactions, which the connector orders, joins, and parses
/// into one logical block.
#[derive(Clone, Debug)]
pub struct IotaConnector<S> {
    source: S,
    protocol: Protocol,
}

impl<S> IotaConnector<S> {
    /// Build a connector over a record source, decoding with `protocol`.
    #[must_use]
    pub fn new(source: S, protocol: Protocol) -> Self { Self { source, protocol } }

    /// Protocol this connector decodes with.
    #[must_use]
    pub const fn protocol(&self) -> Protocol { self.protocol }
}

#[async_trait]
impl<S: RecordSource> LedgerConnector for IotaConnector<S> {
    async fn fetch(&self, address: &str) -> Result<Block, ConnectorError> {
        if address.is_empty() {
            return Err(ConnectorError::InvalidAddress);
        }
        let records = self.source.records(address).await?;
        if records.is_empty() {
            return Err(ConnectorError::NoDataFetched(address.to_owned()));
        }
        let bundle = Bundle::from_fragments(records);
        debug!(
            "address {address} resolved to a bundle of {} fragments",
            bundle.len()
        );
        Ok(self.protocol.decode(address, &bundle.fields())?)
    }
}
