//! Turns a [`Chain`] plus captured environment into deploy-tool settings.

use std::collections::BTreeMap;

use crate::chain::Chain;
use crate::env::{EnvSnapshot, vars};
use crate::error::{Error, Result};
use crate::rules::{self, ChainRules, SecretSource};
use crate::types::{
    AccountDerivation, ConnectionDescriptor, CustomChainRegistration, ExplorerDescriptor,
    ExplorerUrls, Mnemonic,
};

/// Resolves connection, explorer and custom-chain settings per chain.
///
/// Every call builds its descriptors from scratch. A required variable that
/// is missing fails the call before anything is returned.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    env: EnvSnapshot,
    account_count: Option<u32>,
    rpc_overrides: BTreeMap<Chain, String>,
}

impl Resolver {
    /// Create a resolver over an explicit snapshot.
    #[must_use]
    pub fn new(env: EnvSnapshot) -> Self {
        Self {
            env,
            account_count: None,
            rpc_overrides: BTreeMap::new(),
        }
    }

    /// Create a resolver over the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(EnvSnapshot::capture())
    }

    /// Derive `count` accounts instead of the default.
    #[must_use]
    pub fn with_account_count(mut self, count: u32) -> Self {
        self.account_count = Some(count);
        self
    }

    /// Use `url` as the RPC endpoint for `chain`. The provider key for that
    /// chain is then no longer required.
    #[must_use]
    pub fn with_rpc_override(mut self, chain: Chain, url: impl Into<String>) -> Self {
        self.rpc_overrides.insert(chain, url.into());
        self
    }

    /// The environment this resolver reads from.
    #[must_use]
    pub const fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// The merged rules for `chain`, with this resolver's account count.
    #[must_use]
    pub fn rules(&self, chain: Chain) -> ChainRules {
        let mut r = rules::rules(chain);
        if let Some(count) = self.account_count {
            r.account_count = count;
        }
        r
    }

    /// Build the connection settings for `chain`.
    ///
    /// `secret` is the deployer mnemonic. Chains that source their own
    /// mnemonic from the environment ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] naming the first required
    /// variable that is unset or empty. An empty `secret` is reported as a
    /// missing `MNEMONIC`.
    pub fn resolve(&self, chain: Chain, secret: &str) -> Result<ConnectionDescriptor> {
        let rules = self.rules(chain);

        let (url, rpc_key) = match self.rpc_overrides.get(&chain) {
            Some(url) => (url.clone(), None),
            None => match rules.rpc.key_var() {
                Some(var) => {
                    let key = self.env.require(var)?;
                    (rules.rpc.render(chain, key), Some(key))
                }
                None => (rules.rpc.render(chain, ""), None),
            },
        };

        let mnemonic = match rules.secret {
            SecretSource::Caller if secret.is_empty() => {
                return Err(Error::MissingConfiguration(vars::MNEMONIC.to_owned()));
            }
            SecretSource::Caller => secret,
            SecretSource::Env(var) => self.env.require(var)?,
        };

        tracing::debug!(%chain, chain_id = chain.chain_id(), "resolved connection");

        let conn = ConnectionDescriptor::new(
            chain.chain_id(),
            url,
            AccountDerivation {
                count: rules.account_count,
                mnemonic: Mnemonic::new(mnemonic),
                path: rules.hd_path.to_owned(),
            },
            rules.gas_price,
        );
        Ok(match rpc_key {
            Some(key) => conn.with_rpc_key(key),
            None => conn,
        })
    }

    /// Build the explorer verification settings for `chain`.
    ///
    /// Returns `Ok(None)` for chains without an explorer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] if the chain's explorer key
    /// variable is unset or empty.
    pub fn resolve_explorer(&self, chain: Chain) -> Result<Option<ExplorerDescriptor>> {
        let Some(rule) = self.rules(chain).explorer else {
            return Ok(None);
        };
        let api_key = self.env.require(rule.api_key_var)?;
        Ok(Some(ExplorerDescriptor {
            api_key: api_key.to_owned(),
            api_url: rule.urls.map(|u| u.api_url.to_owned()),
            browser_url: rule.urls.map(|u| u.browser_url.to_owned()),
        }))
    }

    /// The custom-chain registration for `chain`, if its explorer is not in
    /// the verifier's built-in registry. Needs no environment.
    #[must_use]
    pub fn resolve_custom_chain(&self, chain: Chain) -> Option<CustomChainRegistration> {
        let urls = self.rules(chain).explorer?.urls?;
        Some(CustomChainRegistration {
            network: chain,
            chain_id: chain.chain_id(),
            urls: ExplorerUrls {
                api_url: urls.api_url.to_owned(),
                browser_url: urls.browser_url.to_owned(),
            },
        })
    }

    /// Explorer settings for every chain that has an explorer.
    ///
    /// # Errors
    ///
    /// Fails on the first chain whose explorer key is missing.
    pub fn all_explorer_configs(&self) -> Result<BTreeMap<Chain, ExplorerDescriptor>> {
        self.explorer_configs(Chain::ALL.iter().copied())
    }

    /// Explorer settings for the chains in `chains` that have an explorer.
    ///
    /// # Errors
    ///
    /// Fails on the first chain whose explorer key is missing.
    pub fn explorer_configs<I>(&self, chains: I) -> Result<BTreeMap<Chain, ExplorerDescriptor>>
    where
        I: IntoIterator<Item = Chain>,
    {
        let mut out = BTreeMap::new();
        for chain in chains {
            if let Some(explorer) = self.resolve_explorer(chain)? {
                out.insert(chain, explorer);
            }
        }
        Ok(out)
    }

    /// Custom-chain registrations for every chain that needs one, in
    /// [`Chain::ALL`] order.
    #[must_use]
    pub fn all_custom_chains(&self) -> Vec<CustomChainRegistration> {
        Chain::ALL
            .iter()
            .filter_map(|c| self.resolve_custom_chain(*c))
            .collect()
    }

    /// Connection settings for every chain.
    ///
    /// # Errors
    ///
    /// Fails on the first chain with a missing variable.
    pub fn all_connections(&self, secret: &str) -> Result<BTreeMap<Chain, ConnectionDescriptor>> {
        Chain::ALL
            .iter()
            .map(|c| self.resolve(*c, secret).map(|d| (*c, d)))
            .collect()
    }

    /// The variables `chain` needs that are currently unset or empty.
    ///
    /// Chains taking the caller's mnemonic count `MNEMONIC` as required,
    /// matching callers that read the secret from the environment.
    #[must_use]
    pub fn missing_vars(&self, chain: Chain) -> Vec<&'static str> {
        let mut required = self.rules(chain).required_vars();
        if self.rpc_overrides.contains_key(&chain) {
            let rpc_key = self.rules(chain).rpc.key_var();
            required.retain(|v| Some(*v) != rpc_key);
        }
        required.retain(|v| !self.env.is_set(v));
        required
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "test assertions")]
mod tests {
    use super::*;

    const SECRET: &str = "test test test test test test test test test test test junk";

    fn resolver(pairs: &[(&str, &str)]) -> Resolver {
        Resolver::new(EnvSnapshot::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn base_sepolia_scenario() {
        let r = resolver(&[
            (vars::ALCHEMY_API_KEY, "abc123"),
            (vars::BASESCAN_API_KEY, "def456"),
        ]);

        let conn = r
            .resolve(Chain::BaseSepolia, SECRET)
            .expect("base-sepolia resolves with both keys set");
        assert_eq!(conn.chain_id, 84532);
        assert_eq!(conn.url, "https://base-sepolia.g.alchemy.com/v2/abc123");
        assert_eq!(conn.gas_price, Some(1_000_000_000));
        assert_eq!(conn.accounts.count, 10);
        assert_eq!(conn.accounts.path, "m/44'/60'/0'/0");
        assert_eq!(conn.accounts.mnemonic.expose(), SECRET);

        let explorer = r.resolve_explorer(Chain::BaseSepolia);
        assert_eq!(
            explorer,
            Ok(Some(ExplorerDescriptor {
                api_key: "def456".to_owned(),
                api_url: Some("https://api-sepolia.basescan.org/api".to_owned()),
                browser_url: Some("https://sepolia.basescan.org".to_owned()),
            }))
        );
    }

    #[test]
    fn missing_rpc_key_names_the_variable() {
        let r = resolver(&[]);
        assert_eq!(
            r.resolve(Chain::Sepolia, SECRET),
            Err(Error::MissingConfiguration("INFURA_API_KEY".to_owned()))
        );
        assert_eq!(
            r.resolve(Chain::ArbitrumOne, SECRET),
            Err(Error::MissingConfiguration("ALCHEMY_API_KEY".to_owned()))
        );
    }

    #[test]
    fn celo_takes_mnemonic_from_environment() {
        let r = resolver(&[
            (vars::INFURA_API_KEY, "inf"),
            (vars::MNEMONIC_CELO, "celo words"),
        ]);
        let conn = r.resolve(Chain::CeloMainnet, SECRET);
        assert!(
            matches!(&conn, Ok(c) if c.accounts.mnemonic.expose() == "celo words"
                && c.accounts.path == "m/44'/52752'/0'/0"
                && c.url == "https://celo-mainnet.infura.io/v3/inf"),
            "{conn:?}"
        );

        let without = resolver(&[(vars::INFURA_API_KEY, "inf")]);
        assert_eq!(
            without.resolve(Chain::CeloMainnet, SECRET),
            Err(Error::MissingConfiguration("MNEMONIC_CELO".to_owned()))
        );
    }

    #[test]
    fn filecoin_needs_no_environment() {
        let r = resolver(&[]);
        let conn = r.resolve(Chain::FilecoinMainnet, SECRET);
        assert!(
            matches!(&conn, Ok(c) if c.url == "https://filecoin.chainup.net/rpc/v1" && c.chain_id == 314),
            "{conn:?}"
        );
        assert_eq!(r.resolve_explorer(Chain::FilecoinCalibration), Ok(None));
    }

    #[test]
    fn empty_secret_is_missing_mnemonic() {
        let r = resolver(&[(vars::INFURA_API_KEY, "inf")]);
        assert_eq!(
            r.resolve(Chain::Hardhat, ""),
            Err(Error::MissingConfiguration("MNEMONIC".to_owned()))
        );
    }

    #[test]
    fn arbitrum_one_explorer_key_comes_from_environment() {
        let r = resolver(&[]);
        assert_eq!(
            r.resolve_explorer(Chain::ArbitrumOne),
            Err(Error::MissingConfiguration("ARBISCAN_API_KEY".to_owned()))
        );
    }

    #[test]
    fn rpc_override_skips_provider_key() {
        let r = resolver(&[]).with_rpc_override(Chain::Sepolia, "http://localhost:8545");
        let conn = r.resolve(Chain::Sepolia, SECRET);
        assert!(
            matches!(&conn, Ok(c) if c.url == "http://localhost:8545"),
            "{conn:?}"
        );
        assert_eq!(
            r.missing_vars(Chain::Sepolia),
            vec![vars::MNEMONIC, vars::ETHERSCAN_API_KEY]
        );
    }

    #[test]
    fn account_count_override() {
        let r = resolver(&[]).with_account_count(3);
        let conn = r.resolve(Chain::FilecoinCalibration, SECRET);
        assert!(matches!(&conn, Ok(c) if c.accounts.count == 3), "{conn:?}");
    }

    #[test]
    fn custom_chains_need_no_environment() {
        let r = resolver(&[]);
        let chains: Vec<Chain> = r.all_custom_chains().iter().map(|c| c.network).collect();
        assert_eq!(
            chains,
            vec![Chain::CeloMainnet, Chain::BaseSepolia, Chain::ArbSepolia]
        );
        assert_eq!(r.resolve_custom_chain(Chain::BaseMainnet), None);
    }

    #[test]
    fn missing_vars_agrees_with_resolution_from_environment() {
        let r = resolver(&[]);
        assert_eq!(r.missing_vars(Chain::FilecoinMainnet), vec![vars::MNEMONIC]);
        let secret = r.env().get(vars::MNEMONIC).unwrap_or_default();
        assert_eq!(
            r.resolve(Chain::FilecoinMainnet, secret),
            Err(Error::MissingConfiguration("MNEMONIC".to_owned()))
        );

        let ready = resolver(&[(vars::MNEMONIC, SECRET)]);
        assert!(ready.missing_vars(Chain::FilecoinMainnet).is_empty(), "mnemonic is set");
    }

    #[test]
    fn redacted_connection_hides_provider_key() {
        let r = resolver(&[(vars::ALCHEMY_API_KEY, "SECRET_ALCHEMY_KEY")]);
        let conn = r
            .resolve(Chain::BaseSepolia, SECRET)
            .expect("alchemy key is set");
        assert!(conn.url.ends_with("/SECRET_ALCHEMY_KEY"), "real url keeps the key");

        let json = serde_json::to_string(&conn.redacted()).expect("serializes");
        assert!(!json.contains("SECRET_ALCHEMY_KEY"), "{json}");
        assert!(!json.contains("junk"), "{json}");
        assert!(json.contains("https://base-sepolia.g.alchemy.com/v2/"), "{json}");

        let debug = format!("{conn:?}");
        assert!(!debug.contains("SECRET_ALCHEMY_KEY"), "{debug}");
    }
}
