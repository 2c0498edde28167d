//! Descriptors produced by the resolver.
//!
//! Field names follow the JSON shape the deploy toolchain reads from its
//! network and verification settings, so the serialized form can be handed
//! over unchanged.

use serde::{Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::chain::Chain;

/// A deployer mnemonic phrase.
///
/// `Debug` never prints the phrase. Serialization writes it verbatim because
/// the deploy tool has to derive accounts from it. The phrase is wiped from
/// memory when the value is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Placeholder written by [`Mnemonic::redacted`].
    pub const REDACTED: &'static str = "<redacted>";

    /// Wrap a phrase.
    #[must_use]
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    /// The raw phrase.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// A copy holding [`Mnemonic::REDACTED`] instead of the phrase.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self(Self::REDACTED.to_owned())
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Mnemonic(..)")
    }
}

impl Serialize for Mnemonic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// HD account derivation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDerivation {
    /// Number of accounts to derive.
    pub count: u32,

    /// Mnemonic the accounts are derived from.
    pub mnemonic: Mnemonic,

    /// BIP-44 derivation path prefix, e.g. `m/44'/60'/0'/0`.
    pub path: String,
}

/// Everything the deploy tool needs to connect to one chain.
///
/// `Debug` masks the provider key embedded in `url`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
    /// EIP-155 chain ID.
    pub chain_id: u64,

    /// JSON-RPC endpoint.
    pub url: String,

    /// Deployer account derivation.
    pub accounts: AccountDerivation,

    /// Fixed gas price in wei, when dynamic estimation must be bypassed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,

    /// Provider key substituted into `url`, kept to mask it again.
    #[serde(skip)]
    rpc_key: Option<Zeroizing<String>>,
}

impl ConnectionDescriptor {
    /// Create a descriptor whose `url` carries no secret.
    #[must_use]
    pub const fn new(
        chain_id: u64,
        url: String,
        accounts: AccountDerivation,
        gas_price: Option<u64>,
    ) -> Self {
        Self {
            chain_id,
            url,
            accounts,
            gas_price,
            rpc_key: None,
        }
    }

    /// Record that `key` appears in `url` and must be masked when printed.
    #[must_use]
    pub fn with_rpc_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.rpc_key = (!key.is_empty()).then(|| Zeroizing::new(key));
        self
    }

    /// `url` with the provider key replaced by [`Mnemonic::REDACTED`].
    #[must_use]
    pub fn masked_url(&self) -> String {
        match &self.rpc_key {
            Some(key) => self.url.replace(key.as_str(), Mnemonic::REDACTED),
            None => self.url.clone(),
        }
    }

    /// A copy safe to print: the mnemonic and the provider key in the URL
    /// are replaced by placeholders.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            chain_id: self.chain_id,
            url: self.masked_url(),
            accounts: AccountDerivation {
                count: self.accounts.count,
                mnemonic: self.accounts.mnemonic.redacted(),
                path: self.accounts.path.clone(),
            },
            gas_price: self.gas_price,
            rpc_key: None,
        }
    }
}

impl std::fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("chain_id", &self.chain_id)
            .field("url", &self.masked_url())
            .field("accounts", &self.accounts)
            .field("gas_price", &self.gas_price)
            .finish_non_exhaustive()
    }
}

/// Block-explorer settings used for contract source verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerDescriptor {
    /// Explorer API key.
    #[serde(rename = "apiKey")]
    pub api_key: String,

    /// Verification API endpoint, for explorers the verifier does not know.
    #[serde(rename = "apiURL", default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Human-facing explorer URL, for explorers the verifier does not know.
    #[serde(
        rename = "browserURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub browser_url: Option<String>,
}

/// Explorer endpoints of a custom chain registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerUrls {
    /// Verification API endpoint.
    #[serde(rename = "apiURL")]
    pub api_url: String,

    /// Human-facing explorer URL.
    #[serde(rename = "browserURL")]
    pub browser_url: String,
}

/// Registration for a chain whose explorer is missing from the verifier's
/// built-in registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomChainRegistration {
    /// Network name the registration applies to.
    pub network: Chain,

    /// EIP-155 chain ID.
    pub chain_id: u64,

    /// Explorer endpoints.
    pub urls: ExplorerUrls,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ConnectionDescriptor {
        ConnectionDescriptor::new(
            84532,
            "https://base-sepolia.g.alchemy.com/v2/abc123".to_owned(),
            AccountDerivation {
                count: 10,
                mnemonic: Mnemonic::new("test test test test test test test test test test test junk"),
                path: "m/44'/60'/0'/0".to_owned(),
            },
            Some(1_000_000_000),
        )
        .with_rpc_key("abc123")
    }

    #[test]
    fn connection_serializes_in_toolchain_shape() {
        let value = serde_json::to_value(descriptor()).unwrap_or_default();
        assert_eq!(value["chainId"], 84532);
        assert_eq!(value["gasPrice"], 1_000_000_000_u64);
        assert_eq!(value["accounts"]["path"], "m/44'/60'/0'/0");
        assert_eq!(
            value["accounts"]["mnemonic"],
            "test test test test test test test test test test test junk"
        );
    }

    #[test]
    fn gas_price_is_omitted_when_absent() {
        let mut d = descriptor();
        d.gas_price = None;
        let value = serde_json::to_value(d).unwrap_or_default();
        assert!(value.get("gasPrice").is_none(), "{value}");
    }

    #[test]
    fn debug_and_redacted_hide_mnemonic() {
        let d = descriptor();
        assert!(!format!("{d:?}").contains("junk"), "Debug leaked the phrase");
        let redacted = d.redacted();
        assert_eq!(redacted.accounts.mnemonic.expose(), Mnemonic::REDACTED);
        assert_eq!(redacted.chain_id, d.chain_id);
    }

    #[test]
    fn redacted_and_debug_mask_provider_key() {
        let d = descriptor();
        assert_eq!(
            d.redacted().url,
            "https://base-sepolia.g.alchemy.com/v2/<redacted>"
        );
        assert!(!format!("{d:?}").contains("abc123"), "Debug leaked the key");
        let json = serde_json::to_string(&d).unwrap_or_default();
        assert!(json.contains("abc123"), "serialized form keeps the real url");
        assert!(!json.contains("rpcKey"), "{json}");
    }

    #[test]
    fn url_without_key_is_unchanged() {
        let mut d = descriptor().with_rpc_key("");
        d.url = "https://filecoin.chainup.net/rpc/v1".to_owned();
        assert_eq!(d.redacted().url, d.url);
    }

    #[test]
    fn mnemonic_zeroize_clears_phrase() {
        let mut m = Mnemonic::new("word word word");
        m.zeroize();
        assert_eq!(m.expose(), "", "zeroize empties the phrase");
    }

    #[test]
    fn explorer_optional_urls_are_skipped() {
        let explorer = ExplorerDescriptor {
            api_key: "k".to_owned(),
            api_url: None,
            browser_url: None,
        };
        let json = serde_json::to_string(&explorer).unwrap_or_default();
        assert_eq!(json, r#"{"apiKey":"k"}"#);
    }
}
