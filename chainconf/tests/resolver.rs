//! Whole-chain-set properties of the resolver and the directory.

use chainconf::env::{KNOWN_VARIABLES, vars};
use chainconf::{Chain, EnvSnapshot, Error, NetworkDirectory, Resolver, directory};

const SECRET: &str = "test test test test test test test test test test test junk";

fn full_env() -> EnvSnapshot {
    EnvSnapshot::from_pairs(
        KNOWN_VARIABLES
            .iter()
            .map(|name| (*name, format!("value-of-{name}"))),
    )
}

#[test]
fn every_chain_resolves_with_full_environment() {
    let resolver = Resolver::new(full_env());
    for chain in Chain::ALL {
        match resolver.resolve(*chain, SECRET) {
            Ok(conn) => {
                assert!(!conn.url.is_empty(), "{chain}: empty url");
                assert_eq!(conn.chain_id, chain.chain_id(), "{chain}: chain id");
            }
            Err(e) => panic!("{chain}: {e}"),
        }
    }
}

#[test]
fn every_chain_fails_naming_exactly_the_missing_variable() {
    let full = full_env();
    for chain in Chain::ALL {
        let required = Resolver::new(full.clone()).rules(*chain).required_vars();
        for missing in &required {
            let env = EnvSnapshot::from_pairs(
                KNOWN_VARIABLES
                    .iter()
                    .filter(|name| *name != missing)
                    .map(|name| (*name, "set")),
            );
            let resolver = Resolver::new(env);
            let secret = resolver.env().get(vars::MNEMONIC).unwrap_or_default();
            let conn = resolver.resolve(*chain, secret);
            let explorer = resolver.resolve_explorer(*chain);
            let expected = Error::MissingConfiguration((*missing).to_owned());
            assert!(
                conn.as_ref().err() == Some(&expected) || explorer.as_ref().err() == Some(&expected),
                "{chain} without {missing}: {conn:?} / {explorer:?}"
            );
        }
    }
}

#[test]
fn explorer_absent_for_exactly_two_chains() {
    let resolver = Resolver::new(full_env());
    let mut absent = Vec::new();
    for chain in Chain::ALL {
        match resolver.resolve_explorer(*chain) {
            Ok(Some(explorer)) => assert!(!explorer.api_key.is_empty(), "{chain}"),
            Ok(None) => absent.push(*chain),
            Err(e) => panic!("{chain}: {e}"),
        }
    }
    assert_eq!(absent, vec![Chain::FilecoinCalibration, Chain::FilecoinMainnet]);
}

#[test]
fn all_explorer_configs_skips_chains_without_explorer() {
    let configs = Resolver::new(full_env()).all_explorer_configs();
    let configs = configs.unwrap_or_default();
    assert_eq!(configs.len(), Chain::ALL.len() - 2);
    assert!(!configs.contains_key(&Chain::FilecoinMainnet), "filecoin has no explorer");
    assert_eq!(
        configs.get(&Chain::OptimismMainnet).map(|e| e.api_key.as_str()),
        Some("value-of-OPTIMISTIC_ETHERSCAN_API_KEY")
    );
}

#[test]
fn all_explorer_configs_fails_when_any_key_is_missing() {
    let env = EnvSnapshot::from_pairs(
        KNOWN_VARIABLES
            .iter()
            .filter(|name| **name != vars::CELOSCAN_API_KEY)
            .map(|name| (*name, "set")),
    );
    assert_eq!(
        Resolver::new(env).all_explorer_configs().err(),
        Some(Error::MissingConfiguration("CELOSCAN_API_KEY".to_owned()))
    );
}

#[test]
fn custom_chain_urls_are_non_empty() {
    let resolver = Resolver::default();
    let customs = resolver.all_custom_chains();
    assert_eq!(customs.len(), 3);
    for custom in customs {
        assert!(!custom.urls.api_url.is_empty(), "{}", custom.network);
        assert!(!custom.urls.browser_url.is_empty(), "{}", custom.network);
        assert_eq!(custom.chain_id, custom.network.chain_id());
    }
}

#[test]
fn resolution_is_idempotent() {
    let resolver = Resolver::new(full_env());
    let a = resolver.all_connections(SECRET);
    let b = resolver.all_connections(SECRET);
    assert!(a.is_ok(), "{a:?}");
    assert_eq!(a, b);
}

#[test]
fn directory_round_trip_through_facade() {
    let dir = NetworkDirectory;
    for chain in directory::supported_chains() {
        for entry in dir.tokens_of(chain).unwrap_or_default() {
            assert_eq!(dir.token_address(chain, entry.symbol), Ok(entry.address));
        }
        assert!(
            matches!(dir.token_address(chain, "NONEXISTENT"), Err(Error::UnknownToken { .. })),
            "{chain}"
        );
    }
}
