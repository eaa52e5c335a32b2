//! The stream: an address-indexed cache of blocks with lazy traversal.
//!
//! A stream materializes the bidirectionally-linked block sequence anchored
//! at a root address. Blocks are fetched on demand through the connector and
//! memoized in a per-instance index, so traversal over already-resolved
//! addresses performs no I/O. One follow task and one backfill task may
//! share a stream concurrently; the index is the only shared mutable state
//! and per-key writes are atomic and idempotent.

mod cursor;

use std::sync::{Arc, PoisonError, RwLock};

pub use cursor::{Blocks, Packets};
use dashmap::DashMap;
use log::{info, warn};

use crate::{block::Block, connector::LedgerConnector};

#[cfg(test)]
pub(crate) mod test_support;

/// Resolution state of one address in the index.
///
/// A missing key means the address was never attempted. Transient failures
/// leave no entry at all, which is what keeps them retryable.
#[derive(Clone, Debug)]
enum Slot {
    /// Fetch succeeded; the block is immutable from here on.
    Resolved(Arc<Block>),
    /// Fetch succeeded but the bundle can never decode. Cached so a
    /// permanently malformed address is not re-fetched forever.
    Undecodable,
}

/// A logical stream of blocks posted to a ledger.
///
/// The stream's length is only the currently known length; forward
/// exploration extends it. Created once per configured stream and shared
/// between traversal tasks behind an [`Arc`].
#[derive(Debug)]
pub struct Stream<C> {
    connector: C,
    root_address: String,
    latest_address: RwLock<String>,
    index: DashMap<String, Slot>,
}

impl<C> Stream<C> {
    /// Create a stream anchored at `root_address`.
    #[must_use]
    pub fn new(connector: C, root_address: impl Into<String>) -> Self {
        let root_address = root_address.into();
        Self {
            connector,
            latest_address: RwLock::new(root_address.clone()),
            root_address,
            index: DashMap::new(),
        }
    }

    /// Address the stream is anchored at.
    #[must_use]
    pub fn root_address(&self) -> &str { &self.root_address }

    /// Current frontier for forward exploration.
    ///
    /// Starts at the root and advances as forward traversal fetches new
    /// blocks; backward exploration starts here.
    #[must_use]
    pub fn latest_address(&self) -> String {
        self.latest_address
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of addresses currently resolved to a block.
    ///
    /// A lower bound on the true stream length, since forward exploration is
    /// incremental.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index
            .iter()
            .filter(|entry| matches!(entry.value(), Slot::Resolved(_)))
            .count()
    }

    /// Whether no address has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[cfg(test)]
    pub(crate) fn connector(&self) -> &C { &self.connector }

    fn advance_frontier(&self, address: &str) {
        let mut latest = self
            .latest_address
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *latest != address {
            address.clone_into(&mut latest);
        }
    }
}

impl<C: LedgerConnector> Stream<C> {
    /// Lazily traverse blocks in link order.
    ///
    /// Each call produces a fresh cursor starting at the root (forward) or
    /// the latest frontier (backward). Traversal over resolved addresses
    /// makes no fetch calls.
    #[must_use]
    pub fn iterate(&self, reverse: bool) -> Blocks<'_, C> { Blocks::new(self, reverse) }

    /// Lazily traverse packets across blocks.
    ///
    /// Forward order yields each block's samples in stored order; reverse
    /// order yields each block's samples reversed.
    #[must_use]
    pub fn data(&self, reverse: bool) -> Packets<'_, C> { Packets::new(self, reverse) }

    /// Resolve one address, fetching if it was never attempted.
    ///
    /// Returns `None` when the address is cached as undecodable or the fetch
    /// failed; transient failures record nothing, so a later call retries.
    async fn resolve(&self, address: &str, forward: bool) -> Option<Arc<Block>> {
        if let Some(slot) = self.index.get(address) {
            return match slot.value() {
                Slot::Resolved(block) => Some(Arc::clone(block)),
                Slot::Undecodable => None,
            };
        }

        match self.connector.fetch(address).await {
            Ok(block) => {
                let block = Arc::new(block);
                self.index
                    .insert(address.to_owned(), Slot::Resolved(Arc::clone(&block)));
                if forward {
                    self.advance_frontier(address);
                }
                info!("fetched block at address {address}");
                Some(block)
            }
            Err(err) if err.is_permanent() => {
                warn!("giving up on address {address}: {err}");
                self.index.insert(address.to_owned(), Slot::Undecodable);
                None
            }
            Err(err) => {
                warn!("could not fetch block at address {address}: {err}");
                None
            }
        }
    }
}
