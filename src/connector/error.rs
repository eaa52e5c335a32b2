//! Errors raised while fetching and decoding blocks from a ledger.

use thiserror::Error;

use crate::protocol::ProtocolError;

/// Failures scoped to one address's resolution.
///
/// None of these are fatal to the process; the stream layer decides per
/// variant whether an address stays retryable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConnectorError {
    /// An empty address was handed to the connector. Caller error, never
    /// retried.
    #[error("empty ledger address")]
    InvalidAddress,
    /// The backend is reachable but holds no records for the address yet.
    #[error("no records fetched for address {0}")]
    NoDataFetched(String),
    /// The bundle at the address does not decode under the stream's
    /// protocol.
    #[error(transparent)]
    InvalidData(#[from] ProtocolError),
    /// The backend could not be reached or answered with a failure.
    #[error("transient ledger failure: {0}")]
    Transient(String),
}

impl ConnectorError {
    /// Whether retrying the same address can never succeed.
    ///
    /// Permanent failures are cached by the stream so a malformed bundle is
    /// not fetched over and over; everything else stays retryable.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::InvalidAddress | Self::InvalidData(_))
    }
}

/// A ledger network id outside the closed set was selected.
///
/// Raised at configuration time, never at fetch time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown ledger network `{0}`")]
pub struct UnknownNetwork(pub String);
