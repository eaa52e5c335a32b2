//! Scripted connector double shared by the stream and driver tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{
    block::{Block, BlockMetadata},
    bundle::FieldSet,
    connector::{ConnectorError, LedgerConnector},
    protocol::Protocol,
};

/// Connector that replays scripted responses per address.
///
/// Each fetch pops the next scripted response for the address; an exhausted
/// or unscripted address answers `NoDataFetched`, which is what a ledger
/// that has not caught up yet looks like. Every call is recorded so tests
/// can assert that cached addresses are never re-fetched.
#[derive(Debug, Default)]
pub(crate) struct ScriptedConnector {
    responses: Mutex<HashMap<String, VecDeque<Result<Block, ConnectorError>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    pub(crate) fn new() -> Self { Self::default() }

    /// Queue `response` as the next answer for `address`.
    pub(crate) fn script(&self, address: &str, response: Result<Block, ConnectorError>) {
        self.responses
            .lock()
            .expect("responses lock")
            .entry(address.to_owned())
            .or_default()
            .push_back(response);
    }

    /// Number of fetch calls made for `address`.
    pub(crate) fn calls_for(&self, address: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|called| called.as_str() == address)
            .count()
    }

    /// Total number of fetch calls across all addresses.
    pub(crate) fn total_calls(&self) -> usize { self.calls.lock().expect("calls lock").len() }
}

#[async_trait]
impl LedgerConnector for ScriptedConnector {
    async fn fetch(&self, address: &str) -> Result<Block, ConnectorError> {
        self.calls.lock().expect("calls lock").push(address.to_owned());
        self.responses
            .lock()
            .expect("responses lock")
            .get_mut(address)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ConnectorError::NoDataFetched(address.to_owned())))
    }
}

/// Build a decoded block the way the connector would produce it.
///
/// Samples use the plaintext wire shape (`tags epoch data`); a block without
/// samples is assembled directly since the wire always reserves a sample
/// slot.
pub(crate) fn block(address: &str, next: &str, previous: &str, samples: &[&str]) -> Block {
    if samples.is_empty() {
        return Block::new(address, next, previous, BlockMetadata::default(), Vec::new());
    }
    let mut fields = vec![String::new(), next.to_owned(), previous.to_owned()];
    fields.extend(samples.iter().map(|&sample| sample.to_owned()));
    Protocol::Plaintext
        .decode(address, &FieldSet::new(fields))
        .expect("scripted block decodes")
}
