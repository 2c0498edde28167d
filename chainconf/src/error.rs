//! Error type shared by the resolver and the network directory.

use crate::chain::Chain;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while assembling chain configuration or looking up
/// directory entries. None of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required environment variable is unset or empty.
    #[error("required env var {0} does not exist")]
    MissingConfiguration(String),

    /// The network name is not one of the supported chains, or the chain has
    /// no entry in the network directory.
    #[error("network \"{0}\" is not supported")]
    UnknownNetwork(String),

    /// The token symbol is not listed for the given chain.
    #[error("token \"{symbol}\" is not supported on network \"{chain}\"")]
    UnknownToken {
        /// Chain that was searched.
        chain: Chain,
        /// Symbol that was requested.
        symbol: String,
    },
}
