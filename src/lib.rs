//! Public API for the `ledgerstream` library.
//!
//! `ledgerstream` reconstructs logical data streams posted to append-only
//! ledgers: it fetches the fixed-size transport fragments anchored at an
//! address, joins their torn delimited fields back together, decodes the
//! result into blocks of data packets, and exposes lazy, cached,
//! bidirectional traversal over the linked block sequence.

pub mod block;
pub mod bundle;
pub mod config;
pub mod connector;
pub mod driver;
pub mod protocol;
pub mod stream;

pub use block::{Block, BlockMetadata, Packet};
pub use bundle::{Bundle, FieldSet, TransportFragment, encode_post, join_payloads};
pub use config::{Config, ConfigError, StreamDescriptor, StreamSpec};
pub use connector::{
    ConnectorError,
    IotaConnector,
    LedgerConnector,
    Network,
    RecordSource,
    UnknownNetwork,
};
pub use driver::{BackoffConfig, Driver, FollowOptions, backfill_stream, follow_stream};
pub use protocol::{Protocol, ProtocolError};
pub use stream::{Blocks, Packets, Stream};
