//! Plain-text tables printed by the CLI.

use std::fmt::Write as _;

use chainconf::rules::{RpcEndpoint, SecretSource};
use chainconf::{Chain, Resolver, directory};

fn rpc_kind(rpc: RpcEndpoint) -> &'static str {
    match rpc {
        RpcEndpoint::Infura => "infura",
        RpcEndpoint::Alchemy(_) => "alchemy",
        RpcEndpoint::Public(_) => "public",
    }
}

/// One line per chain: ID, name, type, RPC provider, explorer key, secret.
#[must_use]
pub fn chain_table(resolver: &Resolver) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:<6} {:<8} {:<30} {:<14} Directory\n",
        "Chain ID", "Name", "Type", "RPC", "Explorer key", "Mnemonic"
    );
    out.push_str(&"-".repeat(100));
    out.push('\n');

    for chain in Chain::ALL {
        let rules = resolver.rules(*chain);
        let net_type = if chain.is_testnet() { "test" } else { "main" };
        let explorer = rules.explorer.map_or("-", |e| e.api_key_var);
        let secret = match rules.secret {
            SecretSource::Caller => "MNEMONIC",
            SecretSource::Env(var) => var,
        };
        let listed = if directory::lookup(*chain).is_some() { "yes" } else { "no" };
        let _ = writeln!(
            out,
            "{:<10} {:<20} {:<6} {:<8} {:<30} {:<14} {}",
            chain.chain_id(),
            chain.name(),
            net_type,
            rpc_kind(rules.rpc),
            explorer,
            secret,
            listed,
        );
    }
    out
}

/// Token list and operator accounts for `chain`.
///
/// # Errors
///
/// Returns [`chainconf::Error::UnknownNetwork`] if the chain has no
/// directory entry.
pub fn token_table(chain: Chain) -> chainconf::Result<String> {
    let record = directory::record(chain)?;
    let mut out = format!("{chain} (chain ID {})\n", chain.chain_id());
    let _ = writeln!(out, "  admin account:  {}", record.admin_account);
    let _ = writeln!(out, "  fee recipient:  {}", record.fee_recipient);
    if record.tokens.is_empty() {
        out.push_str("  no tokens listed\n");
    }
    for token in record.tokens {
        let _ = write!(out, "  {:<6} {}", token.symbol, token.address);
        if let Some(faucet) = token.faucet_url {
            let _ = write!(out, "  faucet: {faucet}");
        }
        out.push('\n');
    }
    Ok(out)
}

/// Which variables are set and, per chain, which ones are still missing.
/// Values are never printed.
#[must_use]
pub fn env_report(resolver: &Resolver) -> String {
    let mut out = String::from("Variables:\n");
    for name in chainconf::env::KNOWN_VARIABLES {
        let state = if resolver.env().is_set(name) { "set" } else { "missing" };
        let _ = writeln!(out, "  {name:<30} {state}");
    }
    out.push_str("\nChains:\n");
    for chain in Chain::ALL {
        let missing = resolver.missing_vars(*chain);
        let state = if missing.is_empty() {
            "ready".to_owned()
        } else {
            format!("needs {}", missing.join(", "))
        };
        let _ = writeln!(out, "  {:<20} {state}", chain.name());
    }
    out
}
