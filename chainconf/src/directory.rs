//! Token and operator addresses per network.
//!
//! The zero address stands for the chain's native token, except on Celo where
//! CELO is listed by its ERC-20 contract: the marketplace cannot wrap a native
//! token there.

use alloy::primitives::{Address, address};
use serde::Serialize;

use crate::chain::Chain;
use crate::error::{Error, Result};

/// A token the marketplace accepts on a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
    /// Ticker symbol, unique within one network.
    pub symbol: &'static str,
    /// Token contract address; zero for the native token.
    pub address: Address,
    /// Where test tokens can be obtained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faucet_url: Option<&'static str>,
}

/// Directory entry for one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    /// Accepted tokens in display order.
    pub tokens: &'static [TokenEntry],
    /// Marketplace admin account.
    pub admin_account: Address,
    /// Protocol fee recipient.
    pub fee_recipient: Address,
}

const fn token(symbol: &'static str, address: Address) -> TokenEntry {
    TokenEntry {
        symbol,
        address,
        faucet_url: None,
    }
}

const fn token_with_faucet(symbol: &'static str, address: Address, faucet: &'static str) -> TokenEntry {
    TokenEntry {
        symbol,
        address,
        faucet_url: Some(faucet),
    }
}

const NATIVE: Address = Address::ZERO;

const SEPOLIA_ADMIN: Address = address!("4f37308832c6eFE5A74737955cBa96257d76De17");
const MAINNET_FEE_RECIPIENT: Address = address!("E7C4531ad8828794904D332a12702beC8ff1A498");
const MAINNET_ADMIN: Address = address!("14ae502FEF3843fF3a1735B3209D39B320130af9");

const HARDHAT: NetworkRecord = NetworkRecord {
    tokens: &[token("ETH", NATIVE)],
    admin_account: SEPOLIA_ADMIN,
    fee_recipient: SEPOLIA_ADMIN,
};

const SEPOLIA: NetworkRecord = NetworkRecord {
    tokens: &[
        token("ETH", NATIVE),
        token("WETH", address!("7b79995e5f793A07Bc00c21412e50Ecae098E7f9")),
        token_with_faucet(
            "DAI",
            address!("779877A7B0D9E8603169DdbD7836e478b4624789"),
            "https://faucets.chain.link/",
        ),
        token_with_faucet(
            "USDC",
            address!("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
            "https://faucet.circle.com/",
        ),
    ],
    admin_account: SEPOLIA_ADMIN,
    fee_recipient: SEPOLIA_ADMIN,
};

const OPTIMISM_MAINNET: NetworkRecord = NetworkRecord {
    tokens: &[
        token("ETH", NATIVE),
        token("WETH", address!("4200000000000000000000000000000000000006")),
        token("DAI", address!("da10009cbd5d07dd0cecc66161fc93d7c9000da1")),
        token("USDC", address!("0b2C639c533813f4Aa9D7837CAf62653d097Ff85")),
    ],
    admin_account: address!("560adA72a80b4707e493cA8c3B7B7528930E7Be5"),
    fee_recipient: MAINNET_FEE_RECIPIENT,
};

const BASE_SEPOLIA: NetworkRecord = NetworkRecord {
    tokens: &[
        token("ETH", NATIVE),
        token("WETH", address!("4200000000000000000000000000000000000006")),
        token("DAI", address!("E4aB69C077896252FAFBD49EFD26B5D171A32410")),
        token("USDC", address!("036CbD53842c5426634e7929541eC2318f3dCF7e")),
    ],
    admin_account: address!("A2Cb9D926b090577AD45fC0F40C753BF369B82Ff"),
    fee_recipient: address!("e518aED97D9d45174a06bB8EF663B4fB51330725"),
};

const ARB_SEPOLIA: NetworkRecord = NetworkRecord {
    tokens: &[
        token("ETH", NATIVE),
        token("WETH", address!("3031a6D5D9648BA5f50f656Cd4a1672E1167a34A")),
        token("DAI", address!("b1D4538B4571d411F07960EF2838Ce337FE1E80E")),
        token("USDC", address!("75faf114eafb1BDbe2F0316DF893fd58CE46AA4d")),
    ],
    admin_account: address!("5d36971451AE593685Cab8815d644f9B4B66Ec99"),
    fee_recipient: address!("5d36971451AE593685Cab8815d644f9B4B66Ec99"),
};

const ARBITRUM_ONE: NetworkRecord = NetworkRecord {
    tokens: &[
        token("ETH", NATIVE),
        token("WETH", address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1")),
        token("DAI", address!("DA10009cBd5D07dd0CeCc66161FC93D7c9000da1")),
        token("USDC", address!("af88d065e77c8cC2239327C5EDb3A432268e5831")),
    ],
    admin_account: MAINNET_ADMIN,
    fee_recipient: MAINNET_FEE_RECIPIENT,
};

const CELO_MAINNET: NetworkRecord = NetworkRecord {
    tokens: &[
        token("CELO", address!("471EcE3750Da237f93B8E339c536989b8978a438")),
        token("cUSD", address!("765DE816845861e75A25fCA122bb6898B8B1282a")),
        token("USDC", address!("cebA9300f2b948710d2653dD7B07f33A8B32118C")),
        token("USDT", address!("48065fbBE25f71C9282ddf5e1cD6D6A887483D5e")),
    ],
    admin_account: MAINNET_ADMIN,
    fee_recipient: MAINNET_FEE_RECIPIENT,
};

const FILECOIN_MAINNET: NetworkRecord = NetworkRecord {
    tokens: &[],
    admin_account: address!("ee849dAf7A549DC0Fd89658F570d21b61ae88bf8"),
    fee_recipient: address!("F2403Fdb4cEb27Be833153d8c4f5885a81c3a7B4"),
};

/// The directory entry for `chain`, if the marketplace is deployed there.
#[must_use]
pub const fn lookup(chain: Chain) -> Option<&'static NetworkRecord> {
    match chain {
        Chain::Hardhat => Some(&HARDHAT),
        Chain::Sepolia => Some(&SEPOLIA),
        Chain::OptimismMainnet => Some(&OPTIMISM_MAINNET),
        Chain::BaseSepolia => Some(&BASE_SEPOLIA),
        Chain::ArbSepolia => Some(&ARB_SEPOLIA),
        Chain::ArbitrumOne => Some(&ARBITRUM_ONE),
        Chain::CeloMainnet => Some(&CELO_MAINNET),
        Chain::FilecoinMainnet => Some(&FILECOIN_MAINNET),
        Chain::BaseMainnet | Chain::FilecoinCalibration => None,
    }
}

const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    match (a, b) {
        ([], []) => true,
        ([x, ra @ ..], [y, rb @ ..]) => *x == *y && bytes_eq(ra, rb),
        _ => false,
    }
}

const fn contains_symbol(tokens: &[TokenEntry], symbol: &str) -> bool {
    match tokens {
        [] => false,
        [first, rest @ ..] => {
            bytes_eq(first.symbol.as_bytes(), symbol.as_bytes()) || contains_symbol(rest, symbol)
        }
    }
}

const fn symbols_unique(tokens: &[TokenEntry]) -> bool {
    match tokens {
        [] => true,
        [first, rest @ ..] => !contains_symbol(rest, first.symbol) && symbols_unique(rest),
    }
}

const fn all_records_unique(chains: &[Chain]) -> bool {
    match chains {
        [] => true,
        [first, rest @ ..] => {
            let ok = match lookup(*first) {
                Some(record) => symbols_unique(record.tokens),
                None => true,
            };
            ok && all_records_unique(rest)
        }
    }
}

// A symbol appearing twice on one network would make `token_address`
// ambiguous; reject such a table at build time.
const _: () = assert!(
    all_records_unique(Chain::ALL),
    "duplicate token symbol in network directory"
);

/// The directory entry for `chain`.
///
/// # Errors
///
/// Returns [`Error::UnknownNetwork`] if the chain has no entry.
pub fn record(chain: Chain) -> Result<&'static NetworkRecord> {
    lookup(chain).ok_or_else(|| Error::UnknownNetwork(chain.name().to_owned()))
}

/// Accepted tokens on `chain`, in display order.
///
/// # Errors
///
/// Returns [`Error::UnknownNetwork`] if the chain has no entry.
pub fn tokens_of(chain: Chain) -> Result<&'static [TokenEntry]> {
    Ok(record(chain)?.tokens)
}

/// Address of the token `symbol` on `chain`. Symbols match exactly.
///
/// # Errors
///
/// Returns [`Error::UnknownNetwork`] if the chain has no entry, or
/// [`Error::UnknownToken`] if the symbol is not listed for it.
pub fn token_address(chain: Chain, symbol: &str) -> Result<Address> {
    tokens_of(chain)?
        .iter()
        .find(|t| t.symbol == symbol)
        .map(|t| t.address)
        .ok_or_else(|| Error::UnknownToken {
            chain,
            symbol: symbol.to_owned(),
        })
}

/// Marketplace admin account on `chain`.
///
/// # Errors
///
/// Returns [`Error::UnknownNetwork`] if the chain has no entry.
pub fn admin_account_of(chain: Chain) -> Result<Address> {
    Ok(record(chain)?.admin_account)
}

/// Protocol fee recipient on `chain`.
///
/// # Errors
///
/// Returns [`Error::UnknownNetwork`] if the chain has no entry.
pub fn fee_recipient_of(chain: Chain) -> Result<Address> {
    Ok(record(chain)?.fee_recipient)
}

/// Chains that have a directory entry, in [`Chain::ALL`] order.
pub fn supported_chains() -> impl Iterator<Item = Chain> {
    Chain::ALL.iter().copied().filter(|c| lookup(*c).is_some())
}

/// Method-style access to the directory, for callers that prefer to pass a
/// handle around.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkDirectory;

impl NetworkDirectory {
    /// See [`tokens_of`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNetwork`] if the chain has no entry.
    pub fn tokens_of(self, chain: Chain) -> Result<&'static [TokenEntry]> {
        tokens_of(chain)
    }

    /// See [`token_address`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNetwork`] or [`Error::UnknownToken`].
    pub fn token_address(self, chain: Chain, symbol: &str) -> Result<Address> {
        token_address(chain, symbol)
    }

    /// See [`admin_account_of`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNetwork`] if the chain has no entry.
    pub fn admin_account_of(self, chain: Chain) -> Result<Address> {
        admin_account_of(chain)
    }

    /// See [`fee_recipient_of`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNetwork`] if the chain has no entry.
    pub fn fee_recipient_of(self, chain: Chain) -> Result<Address> {
        fee_recipient_of(chain)
    }
}
