//! Everything the deploy toolchain needs, in one serializable value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chain::Chain;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::types::{ConnectionDescriptor, CustomChainRegistration};

/// Verification registry section of a [`ToolchainBundle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSettings {
    /// Explorer API key per network.
    pub api_key: BTreeMap<Chain, String>,
    /// Explorers missing from the verifier's built-in registry.
    pub custom_chains: Vec<CustomChainRegistration>,
}

/// Network and verification settings for a set of chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainBundle {
    /// Connection settings per network.
    pub networks: BTreeMap<Chain, ConnectionDescriptor>,
    /// Explorer verification settings.
    pub etherscan: VerificationSettings,
}

impl ToolchainBundle {
    /// Resolve every setting for `chains`.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::Error::MissingConfiguration`] met while
    /// resolving connections or explorer keys. No partial bundle is produced.
    pub fn build(resolver: &Resolver, chains: &[Chain], secret: &str) -> Result<Self> {
        let mut networks = BTreeMap::new();
        for chain in chains {
            networks.insert(*chain, resolver.resolve(*chain, secret)?);
        }

        let api_key = resolver
            .explorer_configs(chains.iter().copied())?
            .into_iter()
            .map(|(chain, explorer)| (chain, explorer.api_key))
            .collect();

        let custom_chains = resolver
            .all_custom_chains()
            .into_iter()
            .filter(|c| chains.contains(&c.network))
            .collect();

        tracing::info!(networks = networks.len(), "toolchain bundle resolved");

        Ok(Self {
            networks,
            etherscan: VerificationSettings {
                api_key,
                custom_chains,
            },
        })
    }

    /// A copy with every mnemonic replaced by a placeholder.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            networks: self
                .networks
                .iter()
                .map(|(chain, conn)| (*chain, conn.redacted()))
                .collect(),
            etherscan: self.etherscan.clone(),
        }
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
