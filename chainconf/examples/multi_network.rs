#![allow(clippy::print_stdout)]
//! Resolve connection and explorer settings for several chains at once.
//!
//! Usage:
//!   `ALCHEMY_API_KEY`=... `BASESCAN_API_KEY`=... cargo run --example `multi_network`
//!
//! Chains whose variables are missing are reported instead of aborting the
//! whole run.

use chainconf::{Chain, Resolver, directory};

fn main() {
    let resolver = Resolver::from_env();
    let secret = "test test test test test test test test test test test junk";

    for chain in [Chain::BaseSepolia, Chain::BaseMainnet, Chain::FilecoinMainnet] {
        match resolver.resolve(chain, secret) {
            Ok(conn) => println!(
                "[{chain}] chain_id={}, url={}, gas_price={:?}",
                conn.chain_id, conn.masked_url(), conn.gas_price
            ),
            Err(e) => println!("[{chain}] {e}"),
        }
        match directory::tokens_of(chain) {
            Ok(tokens) => {
                let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol).collect();
                println!("[{chain}] tokens: {}", symbols.join(", "));
            }
            Err(e) => println!("[{chain}] {e}"),
        }
    }
}
