// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use muneem::models::Asset;
use muneem::store::{LedgerStore, MemoryStore};
use muneem::{cli, commands};

fn run(store: &MemoryStore, argv: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(argv);
    let (name, sub) = matches.subcommand().expect("subcommand parsed");
    match name {
        "onboard" => commands::profile::onboard(store, sub),
        "reset" => commands::profile::reset(store, sub),
        "deposit" => commands::wallet::deposit(store, sub),
        "spend" => commands::wallet::spend(store, sub),
        "invest" => commands::wallet::invest(store, sub),
        "propose" => commands::wallet::propose(store, sub),
        "confirm" => commands::wallet::confirm(store, sub),
        "cancel" => commands::wallet::cancel(store, sub),
        "transfer" => commands::wallet::transfer(store, sub),
        "status" => commands::wallet::status(store, sub),
        "history" => commands::wallet::history(store, sub),
        "alerts" => commands::wallet::alerts(store, sub),
        other => panic!("unexpected subcommand {other}"),
    }
}

fn onboard(store: &MemoryStore) {
    run(
        store,
        &[
            "muneem", "onboard", "--name", "Rahul Verma", "--mobile", "9876543210", "--job",
            "Delivery rider", "--pan", "ABCDE1234F", "--bank", "HDFC Bank", "--account",
            "1234567890", "--ifsc", "HDFC0001234", "--goals", "Buy a bike", "--debt",
            "Laptop EMI 2000",
        ],
    )
    .unwrap();
}

#[test]
fn onboarding_activates_the_wallet_with_a_bonus() {
    let store = MemoryStore::new();
    onboard(&store);
    let rec = store.load().unwrap();
    assert!(rec.profile_complete);
    assert_eq!(rec.full_name, "Rahul Verma");
    assert_eq!(rec.balance_liquid, 1000);
    assert_eq!(rec.alerts.len(), 1);
    assert!(rec.pending_transaction.is_none());
}

#[test]
fn onboarding_twice_is_rejected() {
    let store = MemoryStore::new();
    onboard(&store);
    let matches = cli::build_cli().get_matches_from([
        "muneem", "onboard", "--name", "X", "--mobile", "1", "--job", "j", "--pan", "p",
        "--bank", "b", "--account", "a", "--ifsc", "i",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(commands::profile::onboard(&store, sub).is_err());
}

#[test]
fn deposit_invest_transfer_flow_via_cli() {
    let store = MemoryStore::new();
    onboard(&store);

    run(
        &store,
        &["muneem", "deposit", "--amount", "500", "--source", "gig"],
    )
    .unwrap();
    assert_eq!(store.load().unwrap().balance_liquid, 1500);

    run(&store, &["muneem", "invest", "--amount", "500", "--asset", "gold"]).unwrap();
    let rec = store.load().unwrap();
    assert_eq!(rec.balance_liquid, 1000);
    assert_eq!(rec.balance_gold, 500);

    run(
        &store,
        &["muneem", "transfer", "--amount", "200", "--from", "gold", "--to", "mutual funds"],
    )
    .unwrap();
    let rec = store.load().unwrap();
    assert_eq!(rec.balance_gold, 300);
    assert_eq!(rec.balance_mutual_funds, 200);
    assert_eq!(rec.net_worth(), 1500);
}

#[test]
fn amounts_with_currency_noise_are_accepted() {
    let store = MemoryStore::new();
    run(
        &store,
        &["muneem", "deposit", "--amount", "₹1,500", "--source", "salary"],
    )
    .unwrap();
    assert_eq!(store.load().unwrap().balance_liquid, 1500);
}

#[test]
fn overspending_fails_and_preserves_state() {
    let store = MemoryStore::new();
    onboard(&store);
    let err = run(
        &store,
        &["muneem", "spend", "--amount", "5000", "--note", "rent"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Insufficient funds"));
    assert_eq!(store.load().unwrap().balance_liquid, 1000);
}

#[test]
fn unknown_asset_label_is_rejected() {
    let store = MemoryStore::new();
    onboard(&store);
    let err = run(
        &store,
        &["muneem", "invest", "--amount", "100", "--asset", "crypto"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unrecognized asset"));
    assert_eq!(store.load().unwrap().net_worth(), 1000);
}

#[test]
fn propose_confirm_cycle_via_cli() {
    let store = MemoryStore::new();
    onboard(&store);
    run(
        &store,
        &["muneem", "propose", "--amount", "400", "--asset", "funds"],
    )
    .unwrap();
    let rec = store.load().unwrap();
    assert_eq!(rec.balance_liquid, 1000);
    assert_eq!(rec.pending_transaction.as_ref().unwrap().asset, Asset::Funds);

    run(&store, &["muneem", "confirm"]).unwrap();
    let rec = store.load().unwrap();
    assert_eq!(rec.balance_liquid, 600);
    assert_eq!(rec.balance_mutual_funds, 400);
    assert!(rec.pending_transaction.is_none());

    assert!(run(&store, &["muneem", "confirm"]).is_err());
}

#[test]
fn reset_requires_confirmation_flag() {
    let store = MemoryStore::new();
    onboard(&store);
    assert!(run(&store, &["muneem", "reset"]).is_err());
    assert!(store.load().unwrap().profile_complete);

    run(&store, &["muneem", "reset", "--yes"]).unwrap();
    let rec = store.load().unwrap();
    assert!(!rec.profile_complete);
    assert_eq!(rec.net_worth(), 0);
}
