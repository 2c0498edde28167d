//! Optional settings loaded from `chainconf.toml`.
//!
//! ```toml
//! account_count = 5
//!
//! [chains.sepolia]
//! rpc = "http://127.0.0.1:8545"
//! ```
//!
//! When no config file is present the built-in rules are used unchanged.
//!
//! Variables can also come from a `.env` file. Values already in the
//! process environment take precedence over the file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chainconf::{Chain, EnvSnapshot, Resolver};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of deployer accounts to derive on every chain.
    #[serde(default)]
    pub account_count: Option<u32>,
    /// Per-chain settings, keyed by network name.
    #[serde(default)]
    pub chains: BTreeMap<Chain, ChainSettings>,
}

/// Settings for a single chain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainSettings {
    /// RPC URL replacing the provider template.
    pub rpc: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns [`Config::default`] if the file does not exist,
    /// allowing the binary to work without any config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply these settings to `resolver`.
    #[must_use]
    pub fn apply(&self, mut resolver: Resolver) -> Resolver {
        if let Some(count) = self.account_count {
            resolver = resolver.with_account_count(count);
        }
        for (chain, settings) in &self.chains {
            if let Some(rpc) = settings.rpc.as_deref().filter(|r| !r.is_empty()) {
                tracing::debug!(%chain, "rpc override from config");
                resolver = resolver.with_rpc_override(*chain, rpc);
            }
        }
        resolver
    }
}

/// Fill variables missing from `env` with those in the dotenv file at `path`.
///
/// A missing file leaves `env` unchanged.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn with_dotenv(env: EnvSnapshot, path: &Path) -> Result<EnvSnapshot> {
    if !path.exists() {
        return Ok(env);
    }
    let pairs = dotenvy::from_path_iter(path)
        .with_context(|| format!("reading {}", path.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), entries = pairs.len(), "dotenv file loaded");
    Ok(env.or_pairs(pairs))
}
