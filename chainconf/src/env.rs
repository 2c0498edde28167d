//! Point-in-time capture of the environment variables the resolver reads.
//!
//! The process environment is read once, when the snapshot is taken. All
//! later resolution works against the captured values, so a resolver gives
//! the same answer for the same chain no matter how often it is asked.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Names of every environment variable the resolver may require.
///
/// Each one is required only when a chain that uses it is selected.
pub mod vars {
    /// Infura project key, used by chains on the default RPC template.
    pub const INFURA_API_KEY: &str = "INFURA_API_KEY";
    /// Alchemy key, used by Optimism, Base and Arbitrum RPC endpoints.
    pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";
    /// Etherscan key (Ethereum chains).
    pub const ETHERSCAN_API_KEY: &str = "ETHERSCAN_API_KEY";
    /// Optimistic Etherscan key.
    pub const OPTIMISTIC_ETHERSCAN_API_KEY: &str = "OPTIMISTIC_ETHERSCAN_API_KEY";
    /// Basescan key.
    pub const BASESCAN_API_KEY: &str = "BASESCAN_API_KEY";
    /// Arbiscan key.
    pub const ARBISCAN_API_KEY: &str = "ARBISCAN_API_KEY";
    /// Celoscan key.
    pub const CELOSCAN_API_KEY: &str = "CELOSCAN_API_KEY";
    /// Deployer mnemonic for every chain except Celo.
    pub const MNEMONIC: &str = "MNEMONIC";
    /// Deployer mnemonic for Celo, which derives on its own coin type.
    pub const MNEMONIC_CELO: &str = "MNEMONIC_CELO";
}

/// Every variable in [`vars`], in documentation order.
pub const KNOWN_VARIABLES: &[&str] = &[
    vars::INFURA_API_KEY,
    vars::ALCHEMY_API_KEY,
    vars::ETHERSCAN_API_KEY,
    vars::OPTIMISTIC_ETHERSCAN_API_KEY,
    vars::BASESCAN_API_KEY,
    vars::ARBISCAN_API_KEY,
    vars::CELOSCAN_API_KEY,
    vars::MNEMONIC,
    vars::MNEMONIC_CELO,
];

/// Captured environment values. Each value is wiped from memory on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    values: BTreeMap<String, Zeroizing<String>>,
}

impl EnvSnapshot {
    /// Read [`KNOWN_VARIABLES`] from the process environment.
    ///
    /// Variables that are unset or not valid UTF-8 are left out.
    #[must_use]
    pub fn capture() -> Self {
        let values = KNOWN_VARIABLES
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_owned(), Zeroizing::new(value)))
            })
            .collect::<BTreeMap<_, _>>();
        tracing::debug!(captured = values.len(), "environment snapshot taken");
        Self { values }
    }

    /// Build a snapshot from explicit name/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Zeroizing::new(v.into())))
                .collect(),
        }
    }

    /// Add the known variables from `pairs` that this snapshot lacks.
    ///
    /// Values already present, even empty ones, are kept. Names outside
    /// [`KNOWN_VARIABLES`] are ignored.
    #[must_use]
    pub fn or_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in pairs {
            let name = name.into();
            let value = Zeroizing::new(value.into());
            if KNOWN_VARIABLES.contains(&name.as_str()) {
                self.values.entry(name).or_insert(value);
            }
        }
        self
    }

    /// Return the value of `name` if it is set to a non-empty string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Return the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] if the variable is unset or
    /// empty.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| Error::MissingConfiguration(name.to_owned()))
    }

    /// Whether `name` is set to a non-empty string.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

// Values are secrets; only the names are printed.
impl std::fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
