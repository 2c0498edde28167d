//! The closed set of chains the marketplace contracts are deployed to.
//!
//! Every other table in this crate (resolver rules, the token directory) is
//! keyed by [`Chain`], so adding a network means adding a variant here and
//! letting the compiler point at every `match` that needs a new arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Supported deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chain {
    /// Local Hardhat node (chain ID 31337).
    Hardhat,
    /// Ethereum Sepolia testnet (chain ID 11155111).
    Sepolia,
    /// OP Mainnet (chain ID 10).
    OptimismMainnet,
    /// Celo Mainnet (chain ID 42220).
    CeloMainnet,
    /// Base Sepolia testnet (chain ID 84532).
    BaseSepolia,
    /// Base Mainnet (chain ID 8453).
    BaseMainnet,
    /// Arbitrum Sepolia testnet (chain ID 421614).
    ArbSepolia,
    /// Arbitrum One (chain ID 42161).
    ArbitrumOne,
    /// Filecoin Calibration testnet (chain ID 314159).
    FilecoinCalibration,
    /// Filecoin Mainnet (chain ID 314).
    FilecoinMainnet,
}

impl Chain {
    /// All chains, in the order aggregate operations visit them.
    pub const ALL: &[Self] = &[
        Self::Hardhat,
        Self::Sepolia,
        Self::OptimismMainnet,
        Self::CeloMainnet,
        Self::BaseSepolia,
        Self::BaseMainnet,
        Self::ArbSepolia,
        Self::ArbitrumOne,
        Self::FilecoinCalibration,
        Self::FilecoinMainnet,
    ];

    /// Returns the EIP-155 chain ID for this chain.
    #[must_use]
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Hardhat => 31337,
            Self::Sepolia => 11_155_111,
            Self::OptimismMainnet => 10,
            Self::CeloMainnet => 42220,
            Self::BaseSepolia => 84532,
            Self::BaseMainnet => 8453,
            Self::ArbSepolia => 421_614,
            Self::ArbitrumOne => 42161,
            Self::FilecoinCalibration => 314_159,
            Self::FilecoinMainnet => 314,
        }
    }

    /// The network name used by the deploy toolchain (`--network <name>`).
    ///
    /// The spelling is inherited from existing deployment scripts, which is
    /// why some names are kebab-case and others camelCase.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hardhat => "hardhat",
            Self::Sepolia => "sepolia",
            Self::OptimismMainnet => "optimism-mainnet",
            Self::CeloMainnet => "celo-mainnet",
            Self::BaseSepolia => "base-sepolia",
            Self::BaseMainnet => "base-mainnet",
            Self::ArbSepolia => "arb-sepolia",
            Self::ArbitrumOne => "arbitrumOne",
            Self::FilecoinCalibration => "filecoinCalibration",
            Self::FilecoinMainnet => "filecoin-mainnet",
        }
    }

    /// Whether this is a test network (including the local Hardhat node).
    #[must_use]
    pub const fn is_testnet(self) -> bool {
        matches!(
            self,
            Self::Hardhat
                | Self::Sepolia
                | Self::BaseSepolia
                | Self::ArbSepolia
                | Self::FilecoinCalibration
        )
    }

    /// Look up a [`Chain`] by its EIP-155 chain ID.
    ///
    /// Returns [`None`] if the chain ID is not a supported deployment target.
    #[must_use]
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.iter().find(|c| c.chain_id() == chain_id).copied()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownNetwork(s.to_owned()))
    }
}

impl Serialize for Chain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
