//! Stream descriptors and their fail-fast validation.
//!
//! Configuration names streams as `{root_address, network, protocol}`
//! tables. Descriptors are resolved into typed specs before any stream is
//! constructed, so an unknown network or protocol id aborts startup instead
//! of surfacing mid-fetch.

use serde::Deserialize;
use thiserror::Error;

use crate::{connector::Network, protocol::Protocol};

/// Top-level configuration: the list of streams to reconstruct.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Configured stream descriptors.
    #[serde(default)]
    pub streams: Vec<StreamDescriptor>,
}

/// One stream as named in the configuration file.
#[derive(Clone, Debug, Deserialize)]
pub struct StreamDescriptor {
    /// Address the stream is anchored at.
    pub root_address: String,
    /// Ledger network id, resolved against [`Network`].
    pub network: String,
    /// Protocol id, resolved against [`Protocol`].
    pub protocol: String,
}

/// A descriptor resolved into its typed parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamSpec {
    /// Address the stream is anchored at.
    pub root_address: String,
    /// Ledger network the stream lives on.
    pub network: Network,
    /// Protocol the stream is posted with.
    pub protocol: Protocol,
}

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is not valid TOML or misses required keys.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A stream was configured without a root address.
    #[error("stream root address must not be empty")]
    EmptyRootAddress,
    /// A network id outside the closed set.
    #[error("unknown ledger network `{0}`")]
    UnknownNetwork(String),
    /// A protocol id outside the closed set.
    #[error("unknown protocol id `{0}`")]
    UnknownProtocol(String),
}

impl Config {
    /// Parse a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document does not match the
    /// schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Resolve every descriptor, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Propagates the first [`StreamDescriptor::resolve`] failure.
    pub fn resolve(&self) -> Result<Vec<StreamSpec>, ConfigError> {
        self.streams.iter().map(StreamDescriptor::resolve).collect()
    }
}

impl StreamDescriptor {
    /// Validate the descriptor into a typed spec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRootAddress`],
    /// [`ConfigError::UnknownNetwork`], or [`ConfigError::UnknownProtocol`].
    pub fn resolve(&self) -> Result<StreamSpec, ConfigError> {
        if self.root_address.is_empty() {
            return Err(ConfigError::EmptyRootAddress);
        }
        let network = self
            .network
            .parse::<Network>()
            .map_err(|_| ConfigError::UnknownNetwork(self.network.clone()))?;
        let protocol = self
            .protocol
            .parse::<Protocol>()
            .map_err(|_| ConfigError::UnknownProtocol(self.protocol.clone()))?;
        Ok(StreamSpec {
            root_address: self.root_address.clone(),
            network,
            protocol,
        })
    }
}
