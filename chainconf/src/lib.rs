//! Deployment configuration for the marketplace contracts.
//!
//! Two pieces, both keyed by the closed [`Chain`] set:
//!
//! - [`Resolver`] builds per-chain connection settings (RPC URL, account
//!   derivation, gas price) and explorer verification settings from a
//!   captured [`EnvSnapshot`].
//! - [`directory`] is a static table of accepted tokens and operator
//!   accounts per network.
//!
//! ```no_run
//! use chainconf::{Chain, Resolver, directory};
//!
//! let resolver = Resolver::from_env();
//! let conn = resolver.resolve(Chain::BaseSepolia, "my mnemonic")?;
//! let usdc = directory::token_address(Chain::BaseSepolia, "USDC")?;
//! # Ok::<(), chainconf::Error>(())
//! ```

pub mod chain;
pub mod directory;
pub mod env;
pub mod error;
pub mod export;
pub mod resolver;
pub mod rules;
pub mod types;

pub use chain::Chain;
pub use directory::{NetworkDirectory, NetworkRecord, TokenEntry};
pub use env::EnvSnapshot;
pub use error::{Error, Result};
pub use export::ToolchainBundle;
pub use resolver::Resolver;
pub use types::{
    AccountDerivation, ConnectionDescriptor, CustomChainRegistration, ExplorerDescriptor,
    ExplorerUrls, Mnemonic,
};
