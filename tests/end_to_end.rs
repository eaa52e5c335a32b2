//! End-to-end reconstruction against an in-memory ledger backend.
//!
//! Posts are encoded with the real write-side chunker, served back as
//! transport fragments, and reassembled through the full connector, protocol
//! and stream pipeline.

use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::StreamExt;
use ledgerstream::{
    Config,
    ConnectorError,
    FollowOptions,
    Network,
    Protocol,
    RecordSource,
    Stream,
    TransportFragment,
    backfill_stream,
    encode_post,
    follow_stream,
};
use tokio_util::sync::CancellationToken;

/// In-memory ledger: a table of posts, each chunked into fragments.
#[derive(Debug, Default)]
struct PostTable {
    posts: HashMap<String, Vec<TransportFragment>>,
}

impl PostTable {
    fn post(&mut self, address: &str, next: &str, previous: &str, samples: &[&str]) {
        let size = NonZeroUsize::new(40).expect("non-zero fragment size");
        let fragments = encode_post("", next, previous, samples, size)
            .into_iter()
            .enumerate()
            .map(|(index, payload)| {
                let index = u32::try_from(index).expect("post fits in u32 indices");
                TransportFragment::new(address, index, payload, 1_609_459_200, 0)
            })
            .collect();
        self.posts.insert(address.to_owned(), fragments);
    }
}

#[async_trait]
impl RecordSource for PostTable {
    async fn records(&self, address: &str) -> Result<Vec<TransportFragment>, ConnectorError> {
        Ok(self.posts.get(address).cloned().unwrap_or_default())
    }
}

#[tokio::test]
async fn reconstructs_a_single_block_stream() {
    let mut table = PostTable::default();
    table.post("R", "", "P", &["tag1 1609459200 42"]);
    let stream = Stream::new(Network::Iota.connector(table, Protocol::Plaintext), "R");

    let mut data = stream.data(false);
    let packet = data.next().await.expect("one packet");
    assert_eq!(packet.tag(), "tag1");
    assert_eq!(
        packet.timestamp(),
        Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).single().expect("valid instant")
    );
    assert_eq!(packet.data(), "42");
    assert_eq!(packet.block_address(), "R");
    assert!(data.next().await.is_none());
    assert_eq!(stream.len(), 1);
}

#[tokio::test]
async fn backward_traversal_recovers_history_behind_the_root() {
    let mut table = PostTable::default();
    table.post("R", "", "P", &["recent 1609459200 2"]);
    table.post("P", "R", "", &["old 1609459100 1"]);
    let stream = Stream::new(Network::Iota.connector(table, Protocol::Plaintext), "R");

    let mut backward = stream.iterate(true);
    let mut addresses = Vec::new();
    while let Some(block) = backward.next().await {
        addresses.push(block.address().to_owned());
    }
    assert_eq!(addresses, ["R", "P"]);
    assert_eq!(stream.len(), 2);

    let tags: Vec<String> = stream
        .data(true)
        .into_stream()
        .map(|packet| packet.tag().to_owned())
        .collect()
        .await;
    assert_eq!(tags, ["recent", "old"]);
}

#[tokio::test]
async fn follow_and_backfill_cover_a_configured_stream() {
    let toml = r#"
        [[streams]]
        root_address = "A"
        network = "iota"
        protocol = "plaintext"
    "#;
    let config = Config::from_toml_str(toml).expect("config parses");
    let specs = config.resolve().expect("config resolves");
    let spec = &specs[0];

    let mut table = PostTable::default();
    table.post("A", "B", "", &["a1 1609459200 1"]);
    table.post("B", "", "A", &["b1 1609459260 2"]);
    let connector = spec.network.connector(table, spec.protocol);
    let stream = Arc::new(Stream::new(connector, spec.root_address.clone()));

    let options = FollowOptions {
        stop_at_end: true,
        ..FollowOptions::default()
    };
    follow_stream(Arc::clone(&stream), options, CancellationToken::new()).await;
    backfill_stream(Arc::clone(&stream)).await;

    assert_eq!(stream.len(), 2);
    assert_eq!(stream.latest_address(), "B");
    let tags: Vec<String> = stream
        .data(false)
        .into_stream()
        .map(|packet| packet.tag().to_owned())
        .collect()
        .await;
    assert_eq!(tags, ["a1", "b1"]);
}
