//! Registry persistence and listing through the public API.

use alloy::primitives::{Address, TxHash};
use chrono::{TimeZone, Utc};

use zora_coins::config::LinkConfig;
use zora_coins::registry::render::render_in;
use zora_coins::registry::{append, render, CoinRecord, Registry, RegistryError, RegistryStore};

fn record(n: u8, address: Option<Address>) -> CoinRecord {
    CoinRecord {
        address,
        name: format!("Post {}", n),
        symbol: format!("P{}", n),
        tx_hash: TxHash::repeat_byte(n),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, n as u32, 30, 0).unwrap(),
        metadata_uri: format!("ipfs://bafy{}", n),
        explorer_url: format!("https://basescan.org/tx/{}", TxHash::repeat_byte(n)),
    }
}

#[test]
fn test_load_save_append_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = RegistryStore::new(dir.path().join("coins-registry.json"));

    let base = Registry {
        coins: vec![record(1, None), record(2, Some(Address::repeat_byte(2)))],
    };
    store.save(&base).unwrap();

    let next = record(3, Some(Address::repeat_byte(3)));
    let loaded = store.load().unwrap();
    store.save(&append(loaded, next.clone())).unwrap();

    let mut expected = base.coins.clone();
    expected.push(next);
    assert_eq!(store.load().unwrap().coins, expected);
}

#[test]
fn test_absent_file_lists_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = RegistryStore::new(dir.path().join("never-written.json"));

    let registry = store.load().unwrap();
    assert_eq!(registry, Registry { coins: vec![] });

    let out = render(&registry, &LinkConfig::default());
    assert!(out.contains("No coins created yet."));
    assert!(out.contains("zora-coins create"));
    // loading does not create the file
    assert!(!store.path().exists());
}

#[test]
fn test_tampered_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coins-registry.json");
    std::fs::write(&path, r#"{"coins": [{"address": "not-an-address"}]}"#).unwrap();

    let err = RegistryStore::new(&path).load().unwrap_err();
    assert!(matches!(err, RegistryError::Parse { .. }));
    assert!(err.to_string().contains("malformed"));
}

#[test]
fn test_listing_follows_insertion_order() {
    let mut registry = Registry::default();
    for n in [5u8, 1, 3] {
        registry = append(registry, record(n, Some(Address::repeat_byte(n))));
    }

    let out = render_in(&registry, &LinkConfig::default(), &Utc);
    let positions: Vec<usize> = ["Post 5 ($P5)", "Post 1 ($P1)", "Post 3 ($P3)"]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(out.contains("Created: Jun 1, 2025, 05:30 AM"));
    assert_eq!(out.matches("Zora: https://zora.co/coin/base:").count(), 3);
}
