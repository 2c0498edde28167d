//! Chain configuration CLI.
//!
//! Resolves per-chain deploy settings from the environment and prints them
//! in the shape the deploy toolchain consumes.
//!
//! # Usage
//!
//! ```bash
//! # Overview of every supported chain
//! chainconf list
//!
//! # Connection settings for one chain (mnemonic redacted)
//! chainconf network base-sepolia
//!
//! # Which variables are still missing
//! chainconf env
//!
//! # Full bundle for two chains, written to a file (mnemonics included)
//! chainconf export --chain base-sepolia --chain celo-mainnet --out networks.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chainconf::env::vars;
use chainconf::{Chain, EnvSnapshot, Resolver, ToolchainBundle, directory};
use chainconf_cli::config::{Config, with_dotenv};
use chainconf_cli::report;
use clap::{Parser, Subcommand};

/// Per-chain deploy configuration resolver.
#[derive(Debug, Parser)]
#[command(name = "chainconf", version, about)]
struct Cli {
    /// Optional settings file.
    #[arg(long, global = true, default_value = "chainconf.toml", env = "CHAINCONF_CONFIG")]
    config: PathBuf,

    /// Dotenv file consulted for variables not set in the environment.
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List all supported chains and where their settings come from.
    List,

    /// Print the connection settings for one chain.
    Network {
        /// Network name, e.g. `base-sepolia`.
        chain: Chain,

        /// Print the mnemonic instead of a placeholder.
        #[arg(long)]
        reveal: bool,
    },

    /// Print explorer verification settings for every chain that has one.
    Explorers,

    /// Print registrations for explorers the verifier does not know.
    CustomChains,

    /// Print accepted tokens and operator accounts for one chain.
    Tokens {
        /// Network name.
        chain: Chain,
    },

    /// Print the address of one token.
    Token {
        /// Network name.
        chain: Chain,
        /// Token symbol (case-sensitive).
        symbol: String,
    },

    /// Resolve everything for a set of chains into one JSON document.
    Export {
        /// Chains to include. All chains when omitted.
        #[arg(long = "chain")]
        chains: Vec<Chain>,

        /// Write to this file instead of stdout. The file always contains
        /// the mnemonics.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print mnemonics when writing to stdout.
        #[arg(long)]
        reveal: bool,
    },

    /// Report which environment variables are set and what each chain lacks.
    Env,
}

fn main() -> Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let env = with_dotenv(EnvSnapshot::capture(), &cli.env_file)?;
    let resolver = config.apply(Resolver::new(env));

    match cli.command {
        Command::List => print(&report::chain_table(&resolver)),
        Command::Network { chain, reveal } => cmd_network(&resolver, chain, reveal)?,
        Command::Explorers => print_json(&resolver.all_explorer_configs()?)?,
        Command::CustomChains => print_json(&resolver.all_custom_chains())?,
        Command::Tokens { chain } => print(&report::token_table(chain)?),
        Command::Token { chain, symbol } => {
            print(&format!("{}\n", directory::token_address(chain, &symbol)?));
        }
        Command::Export {
            chains,
            out,
            reveal,
        } => cmd_export(&resolver, &chains, out, reveal)?,
        Command::Env => print(&report::env_report(&resolver)),
    }

    Ok(())
}

/// The caller-side mnemonic; empty when unset so the resolver reports it.
fn secret(resolver: &Resolver) -> &str {
    resolver.env().get(vars::MNEMONIC).unwrap_or_default()
}

/// Execute the `network` subcommand.
fn cmd_network(resolver: &Resolver, chain: Chain, reveal: bool) -> Result<()> {
    let conn = resolver
        .resolve(chain, secret(resolver))
        .with_context(|| format!("resolving {chain}"))?;
    if reveal {
        print_json(&conn)
    } else {
        print_json(&conn.redacted())
    }
}

/// Execute the `export` subcommand.
fn cmd_export(
    resolver: &Resolver,
    chains: &[Chain],
    out: Option<PathBuf>,
    reveal: bool,
) -> Result<()> {
    let chains = if chains.is_empty() { Chain::ALL } else { chains };
    let bundle = ToolchainBundle::build(resolver, chains, secret(resolver))
        .context("resolving toolchain bundle")?;

    match out {
        Some(path) => {
            std::fs::write(&path, bundle.to_json()?)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), networks = bundle.networks.len(), "bundle written");
            Ok(())
        }
        None if reveal => print_json(&bundle),
        None => print_json(&bundle.redacted()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    print(&format!("{json}\n"));
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print(text: &str) {
    print!("{text}");
}
