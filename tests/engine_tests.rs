// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use muneem::engine::{OperationRequest, execute};
use muneem::models::{Asset, LedgerRecord};
use muneem::store::{LedgerStore, MemoryStore};

fn store_with_cash(cash: i64) -> MemoryStore {
    MemoryStore::with_record(LedgerRecord {
        balance_liquid: cash,
        ..LedgerRecord::default()
    })
}

#[test]
fn successful_operation_persists() {
    let store = store_with_cash(0);
    let msg = execute(
        &store,
        &OperationRequest::DepositIncome {
            amount: 500,
            source: "gig".to_string(),
        },
    )
    .unwrap();
    assert!(msg.contains("₹500"));
    assert_eq!(store.load().unwrap().balance_liquid, 500);
}

#[test]
fn declared_failure_becomes_reply_text_and_nothing_is_saved() {
    let store = store_with_cash(300);
    let msg = execute(
        &store,
        &OperationRequest::RecordExpense {
            amount: 500,
            description: "rent".to_string(),
        },
    )
    .unwrap();
    assert!(msg.contains("Insufficient funds"));
    assert_eq!(store.load().unwrap().balance_liquid, 300);
    assert!(store.load().unwrap().alerts.is_empty());
}

#[test]
fn read_only_requests_do_not_write() {
    let store = MemoryStore::new();
    let msg = execute(&store, &OperationRequest::CheckBalance).unwrap();
    assert!(msg.contains("Net Worth"));
    let sentiment = execute(&store, &OperationRequest::MarketSentiment).unwrap();
    assert!(sentiment.contains("Gold"));
}

#[test]
fn propose_then_confirm_through_the_engine() {
    let store = store_with_cash(1000);
    execute(
        &store,
        &OperationRequest::ProposeInvestment {
            amount: 400,
            asset: Asset::Funds,
        },
    )
    .unwrap();
    let mid = store.load().unwrap();
    assert_eq!(mid.balance_liquid, 1000);
    assert!(mid.pending_transaction.is_some());

    execute(&store, &OperationRequest::ConfirmTransaction).unwrap();
    let done = store.load().unwrap();
    assert_eq!(done.balance_liquid, 600);
    assert_eq!(done.balance_mutual_funds, 400);
    assert!(done.pending_transaction.is_none());

    let again = execute(&store, &OperationRequest::ConfirmTransaction).unwrap();
    assert!(again.contains("no pending transaction"));
}

#[test]
fn read_only_classification() {
    assert!(OperationRequest::CheckBalance.is_read_only());
    assert!(OperationRequest::MarketSentiment.is_read_only());
    assert!(!OperationRequest::ConfirmTransaction.is_read_only());
}
