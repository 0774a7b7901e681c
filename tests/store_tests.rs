// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use muneem::models::{Asset, LedgerRecord, PendingTransaction};
use muneem::store::{JsonFileStore, LedgerStore, MemoryStore};

#[test]
fn absent_file_yields_default_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("user_data.json"));
    let rec = store.load().unwrap();
    assert!(!rec.profile_complete);
    assert_eq!(rec.net_worth(), 0);
    assert_eq!(rec.full_name, "User");
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("user_data.json"));
    let mut rec = LedgerRecord::default();
    rec.profile_complete = true;
    rec.full_name = "Rahul Verma".to_string();
    rec.balance_liquid = 1000;
    rec.pending_transaction = Some(PendingTransaction {
        amount: 250,
        asset: Asset::Gold,
    });
    store.save(&rec).unwrap();

    let back = store.load().unwrap();
    assert!(back.profile_complete);
    assert_eq!(back.full_name, "Rahul Verma");
    assert_eq!(back.balance_liquid, 1000);
    assert_eq!(
        back.pending_transaction,
        Some(PendingTransaction {
            amount: 250,
            asset: Asset::Gold
        })
    );
}

#[test]
fn save_replaces_prior_content_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user_data.json");
    let store = JsonFileStore::new(&path);

    let mut rec = LedgerRecord::default();
    rec.balance_liquid = 1;
    store.save(&rec).unwrap();
    rec.balance_liquid = 2;
    store.save(&rec).unwrap();

    assert_eq!(store.load().unwrap().balance_liquid, 2);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("user_data.json")]);
}

#[test]
fn corrupt_file_is_an_error_not_a_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user_data.json");
    std::fs::write(&path, "not json {").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(store.load().is_err());
}

#[test]
fn stored_json_uses_the_shared_schema_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user_data.json");
    let store = JsonFileStore::new(&path);
    store.save(&LedgerRecord::default()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    for key in [
        "profile_complete",
        "full_name",
        "balance_liquid",
        "balance_gold",
        "balance_mutual_funds",
        "income_history",
        "alerts",
        "pending_transaction",
    ] {
        assert!(raw.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn memory_store_round_trips() {
    let store = MemoryStore::new();
    assert_eq!(store.load().unwrap().net_worth(), 0);
    let mut rec = LedgerRecord::default();
    rec.balance_gold = 42;
    store.save(&rec).unwrap();
    assert_eq!(store.load().unwrap().balance_gold, 42);
}
