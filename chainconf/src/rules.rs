//! Per-chain resolution rules.
//!
//! There is one [`BASE`] record describing the common case and, per chain,
//! a [`RuleOverride`] listing only the fields that differ. [`rules`] merges
//! the two field by field. Both tables are `const`, so the merged rules of
//! every chain are fixed at compile time.

use crate::chain::Chain;
use crate::env::vars;

/// Gas price forced on chains whose fee estimation misbehaves (1 gwei).
pub const GAS_PRICE_FLOOR: u64 = 1_000_000_000;

/// Standard Ethereum BIP-44 derivation path.
pub const ETHEREUM_HD_PATH: &str = "m/44'/60'/0'/0";

/// Celo's BIP-44 derivation path (coin type 52752).
pub const CELO_HD_PATH: &str = "m/44'/52752'/0'/0";

/// Where a chain's JSON-RPC endpoint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcEndpoint {
    /// `https://{network-name}.infura.io/v3/{INFURA_API_KEY}`.
    Infura,
    /// `https://{subdomain}.g.alchemy.com/v2/{ALCHEMY_API_KEY}`.
    Alchemy(&'static str),
    /// A fixed public URL; no key needed.
    Public(&'static str),
}

impl RpcEndpoint {
    /// The environment variable holding the provider key, if any.
    #[must_use]
    pub const fn key_var(self) -> Option<&'static str> {
        match self {
            Self::Infura => Some(vars::INFURA_API_KEY),
            Self::Alchemy(_) => Some(vars::ALCHEMY_API_KEY),
            Self::Public(_) => None,
        }
    }

    /// Render the URL for `chain` with the provider key substituted.
    ///
    /// `key` is ignored for [`RpcEndpoint::Public`].
    #[must_use]
    pub fn render(self, chain: Chain, key: &str) -> String {
        match self {
            Self::Infura => format!("https://{}.infura.io/v3/{key}", chain.name()),
            Self::Alchemy(subdomain) => format!("https://{subdomain}.g.alchemy.com/v2/{key}"),
            Self::Public(url) => url.to_owned(),
        }
    }
}

/// Where the deployer mnemonic comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// The secret handed to [`Resolver::resolve`](crate::Resolver::resolve),
    /// conventionally read from `MNEMONIC`.
    Caller,
    /// A dedicated environment variable.
    Env(&'static str),
}

impl SecretSource {
    /// The environment variable the mnemonic is read from.
    #[must_use]
    pub const fn var(self) -> &'static str {
        match self {
            Self::Caller => vars::MNEMONIC,
            Self::Env(var) => var,
        }
    }
}

/// Explorer endpoints known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticExplorerUrls {
    /// Verification API endpoint.
    pub api_url: &'static str,
    /// Human-facing explorer URL.
    pub browser_url: &'static str,
}

/// How a chain's explorer verification is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerRule {
    /// Environment variable holding the API key.
    pub api_key_var: &'static str,
    /// Endpoints for explorers the verifier does not know; `None` for
    /// explorers it already ships with.
    pub urls: Option<StaticExplorerUrls>,
}

/// Fully merged rules for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainRules {
    /// RPC endpoint template.
    pub rpc: RpcEndpoint,
    /// Mnemonic source.
    pub secret: SecretSource,
    /// Derivation path prefix.
    pub hd_path: &'static str,
    /// Number of accounts to derive.
    pub account_count: u32,
    /// Fixed gas price, if any.
    pub gas_price: Option<u64>,
    /// Explorer verification, if the chain has one.
    pub explorer: Option<ExplorerRule>,
}

/// Explorer part of a [`RuleOverride`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerOverride {
    /// Keep the base explorer rule.
    Inherit,
    /// The chain has no explorer verification.
    Disabled,
    /// Replace the base explorer rule.
    Replace(ExplorerRule),
}

/// Per-chain deltas against [`BASE`]. `None` means "inherit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOverride {
    /// RPC endpoint.
    pub rpc: Option<RpcEndpoint>,
    /// Mnemonic source.
    pub secret: Option<SecretSource>,
    /// Derivation path.
    pub hd_path: Option<&'static str>,
    /// Number of accounts to derive.
    pub account_count: Option<u32>,
    /// Fixed gas price.
    pub gas_price: Option<u64>,
    /// Explorer verification.
    pub explorer: ExplorerOverride,
}

impl RuleOverride {
    /// An override that changes nothing.
    pub const INHERIT: Self = Self {
        rpc: None,
        secret: None,
        hd_path: None,
        account_count: None,
        gas_price: None,
        explorer: ExplorerOverride::Inherit,
    };
}

/// Rules shared by every chain unless overridden.
pub const BASE: ChainRules = ChainRules {
    rpc: RpcEndpoint::Infura,
    secret: SecretSource::Caller,
    hd_path: ETHEREUM_HD_PATH,
    account_count: 10,
    gas_price: None,
    explorer: Some(ExplorerRule {
        api_key_var: vars::ETHERSCAN_API_KEY,
        urls: None,
    }),
};

/// The deltas for `chain`.
#[must_use]
pub const fn overrides(chain: Chain) -> RuleOverride {
    match chain {
        Chain::Hardhat | Chain::Sepolia => RuleOverride::INHERIT,
        Chain::OptimismMainnet => RuleOverride {
            rpc: Some(RpcEndpoint::Alchemy("opt-mainnet")),
            explorer: ExplorerOverride::Replace(ExplorerRule {
                api_key_var: vars::OPTIMISTIC_ETHERSCAN_API_KEY,
                urls: None,
            }),
            ..RuleOverride::INHERIT
        },
        Chain::CeloMainnet => RuleOverride {
            secret: Some(SecretSource::Env(vars::MNEMONIC_CELO)),
            hd_path: Some(CELO_HD_PATH),
            explorer: ExplorerOverride::Replace(ExplorerRule {
                api_key_var: vars::CELOSCAN_API_KEY,
                urls: Some(StaticExplorerUrls {
                    api_url: "https://api.celoscan.io/api",
                    browser_url: "https://celoscan.io/",
                }),
            }),
            ..RuleOverride::INHERIT
        },
        Chain::BaseSepolia => RuleOverride {
            rpc: Some(RpcEndpoint::Alchemy("base-sepolia")),
            gas_price: Some(GAS_PRICE_FLOOR),
            explorer: ExplorerOverride::Replace(ExplorerRule {
                api_key_var: vars::BASESCAN_API_KEY,
                urls: Some(StaticExplorerUrls {
                    api_url: "https://api-sepolia.basescan.org/api",
                    browser_url: "https://sepolia.basescan.org",
                }),
            }),
            ..RuleOverride::INHERIT
        },
        Chain::BaseMainnet => RuleOverride {
            rpc: Some(RpcEndpoint::Alchemy("base-mainnet")),
            gas_price: Some(GAS_PRICE_FLOOR),
            explorer: ExplorerOverride::Replace(ExplorerRule {
                api_key_var: vars::BASESCAN_API_KEY,
                urls: None,
            }),
            ..RuleOverride::INHERIT
        },
        Chain::ArbSepolia => RuleOverride {
            rpc: Some(RpcEndpoint::Alchemy("arb-sepolia")),
            explorer: ExplorerOverride::Replace(ExplorerRule {
                api_key_var: vars::ARBISCAN_API_KEY,
                urls: Some(StaticExplorerUrls {
                    api_url: "https://api-sepolia.arbiscan.io/api",
                    browser_url: "https://sepolia.arbiscan.io/",
                }),
            }),
            ..RuleOverride::INHERIT
        },
        Chain::ArbitrumOne => RuleOverride {
            rpc: Some(RpcEndpoint::Alchemy("arb-mainnet")),
            explorer: ExplorerOverride::Replace(ExplorerRule {
                api_key_var: vars::ARBISCAN_API_KEY,
                urls: None,
            }),
            ..RuleOverride::INHERIT
        },
        Chain::FilecoinCalibration => RuleOverride {
            rpc: Some(RpcEndpoint::Public(
                "https://filecoin-calibration.chainup.net/rpc/v1",
            )),
            explorer: ExplorerOverride::Disabled,
            ..RuleOverride::INHERIT
        },
        Chain::FilecoinMainnet => RuleOverride {
            rpc: Some(RpcEndpoint::Public("https://filecoin.chainup.net/rpc/v1")),
            explorer: ExplorerOverride::Disabled,
            ..RuleOverride::INHERIT
        },
    }
}

impl ChainRules {
    /// Apply `delta` on top of `self`.
    #[must_use]
    pub const fn merge(self, delta: RuleOverride) -> Self {
        Self {
            rpc: match delta.rpc {
                Some(rpc) => rpc,
                None => self.rpc,
            },
            secret: match delta.secret {
                Some(secret) => secret,
                None => self.secret,
            },
            hd_path: match delta.hd_path {
                Some(path) => path,
                None => self.hd_path,
            },
            account_count: match delta.account_count {
                Some(count) => count,
                None => self.account_count,
            },
            gas_price: match delta.gas_price {
                Some(price) => Some(price),
                None => self.gas_price,
            },
            explorer: match delta.explorer {
                ExplorerOverride::Inherit => self.explorer,
                ExplorerOverride::Disabled => None,
                ExplorerOverride::Replace(rule) => Some(rule),
            },
        }
    }

    /// Every environment variable these rules read, in the order the
    /// resolver checks them. Chains taking the caller's mnemonic list
    /// `MNEMONIC`, where the CLI reads it from.
    #[must_use]
    pub fn required_vars(&self) -> Vec<&'static str> {
        self.rpc
            .key_var()
            .into_iter()
            .chain(Some(self.secret.var()))
            .chain(self.explorer.map(|e| e.api_key_var))
            .collect()
    }
}

/// The merged rules for `chain`.
#[must_use]
pub const fn rules(chain: Chain) -> ChainRules {
    BASE.merge(overrides(chain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_celo_uses_a_non_ethereum_path() {
        for chain in Chain::ALL {
            let expected = if *chain == Chain::CeloMainnet {
                CELO_HD_PATH
            } else {
                ETHEREUM_HD_PATH
            };
            assert_eq!(rules(*chain).hd_path, expected, "{chain}");
        }
    }

    #[test]
    fn gas_floor_applies_to_base_chains_only() {
        let floored: Vec<Chain> = Chain::ALL
            .iter()
            .copied()
            .filter(|c| rules(*c).gas_price.is_some())
            .collect();
        assert_eq!(floored, vec![Chain::BaseSepolia, Chain::BaseMainnet]);
        assert_eq!(rules(Chain::BaseMainnet).gas_price, Some(GAS_PRICE_FLOOR));
    }

    #[test]
    fn filecoin_chains_have_no_explorer_and_public_rpc() {
        for chain in [Chain::FilecoinCalibration, Chain::FilecoinMainnet] {
            let r = rules(chain);
            assert!(r.explorer.is_none(), "{chain} should have no explorer");
            assert!(r.rpc.key_var().is_none(), "{chain} should need no RPC key");
        }
    }

    #[test]
    fn account_count_merges_like_other_fields() {
        let merged = BASE.merge(RuleOverride {
            account_count: Some(2),
            ..RuleOverride::INHERIT
        });
        assert_eq!(merged.account_count, 2);
        assert_eq!(merged.hd_path, BASE.hd_path, "untouched fields inherit");
        assert_eq!(rules(Chain::Sepolia).account_count, 10);
    }

    #[test]
    fn caller_secret_chains_require_mnemonic() {
        assert_eq!(
            rules(Chain::FilecoinMainnet).required_vars(),
            vec![vars::MNEMONIC]
        );
        assert_eq!(
            rules(Chain::BaseSepolia).required_vars(),
            vec![vars::ALCHEMY_API_KEY, vars::MNEMONIC, vars::BASESCAN_API_KEY]
        );
    }

    #[test]
    fn inherit_override_keeps_base() {
        assert_eq!(BASE.merge(RuleOverride::INHERIT), BASE);
    }

    #[test]
    fn celo_requires_its_own_mnemonic() {
        assert_eq!(
            rules(Chain::CeloMainnet).required_vars(),
            vec![vars::INFURA_API_KEY, vars::MNEMONIC_CELO, vars::CELOSCAN_API_KEY]
        );
    }

    #[test]
    fn render_templates() {
        assert_eq!(
            RpcEndpoint::Infura.render(Chain::Sepolia, "k"),
            "https://sepolia.infura.io/v3/k"
        );
        assert_eq!(
            RpcEndpoint::Alchemy("opt-mainnet").render(Chain::OptimismMainnet, "k"),
            "https://opt-mainnet.g.alchemy.com/v2/k"
        );
    }
}
