// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance operations over a loaded [`LedgerRecord`].
//!
//! Each operation validates its preconditions before touching the record, so
//! a failure never leaves a partial mutation behind. Money is conserved across
//! the three buckets by every operation except `deposit_income` (new money in)
//! and `record_expense` (money out to an external payee).

use crate::models::{Asset, IncomeEntry, LedgerRecord, PendingTransaction};
use chrono::Local;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Amount must be a positive whole number of rupees, got {0}")]
    InvalidAmount(i64),
    #[error("Insufficient funds: {bucket} holds ₹{available}, need ₹{needed}")]
    InsufficientFunds {
        bucket: &'static str,
        needed: i64,
        available: i64,
    },
    #[error("There is no pending transaction to act on")]
    NoPendingTransaction,
    #[error("Unrecognized asset '{0}'; known assets are cash, gold and mutual funds")]
    UnrecognizedAsset(String),
}

pub type OpResult = Result<String, LedgerError>;

fn check_amount(amount: i64) -> Result<(), LedgerError> {
    if amount <= 0 {
        Err(LedgerError::InvalidAmount(amount))
    } else {
        Ok(())
    }
}

fn check_funds(record: &LedgerRecord, bucket: Asset, needed: i64) -> Result<(), LedgerError> {
    let available = record.balance(bucket);
    if available < needed {
        Err(LedgerError::InsufficientFunds {
            bucket: bucket.label(),
            needed,
            available,
        })
    } else {
        Ok(())
    }
}

/// Read-only wallet summary.
pub fn check_balance(record: &LedgerRecord) -> String {
    format!(
        "Liquid Cash: ₹{}, Gold: ₹{}, Mutual Funds: ₹{}. Total Net Worth: ₹{}",
        record.balance_liquid,
        record.balance_gold,
        record.balance_mutual_funds,
        record.net_worth()
    )
}

/// Advisory market read-out; static in this build.
pub fn market_sentiment() -> &'static str {
    "Market status: Gold is stable (safe haven). Mutual funds are volatile but have high return."
}

pub fn deposit_income(record: &mut LedgerRecord, amount: i64, source: &str) -> OpResult {
    check_amount(amount)?;
    record.balance_liquid += amount;
    record.income_history.push(IncomeEntry {
        amount,
        source: source.to_string(),
        date: Local::now().date_naive(),
    });
    record.push_alert(format!("Income of ₹{amount} recorded from {source}"));
    Ok(format!(
        "Added ₹{amount} from {source}. Current cash: ₹{}",
        record.balance_liquid
    ))
}

pub fn record_expense(record: &mut LedgerRecord, amount: i64, description: &str) -> OpResult {
    check_amount(amount)?;
    check_funds(record, Asset::Cash, amount)?;
    record.balance_liquid -= amount;
    Ok(format!(
        "Spent ₹{amount} on {description}. Remaining cash: ₹{}",
        record.balance_liquid
    ))
}

pub fn invest_direct(record: &mut LedgerRecord, amount: i64, asset: Asset) -> OpResult {
    check_amount(amount)?;
    check_funds(record, Asset::Cash, amount)?;
    record.balance_liquid -= amount;
    *record.balance_mut(asset) += amount;
    Ok(format!(
        "Invested ₹{amount} in {asset}. {} now holds ₹{}",
        asset_title(asset),
        record.balance(asset)
    ))
}

/// Records the intent without moving money. A new proposal overwrites any
/// outstanding one; at most one pending transaction exists.
pub fn propose_investment(record: &mut LedgerRecord, amount: i64, asset: Asset) -> OpResult {
    check_amount(amount)?;
    check_funds(record, Asset::Cash, amount)?;
    record.pending_transaction = Some(PendingTransaction { amount, asset });
    Ok(format!(
        "Proposed investing ₹{amount} in {asset}. Reply YES to confirm or NO to cancel."
    ))
}

/// Executes the pending proposal as a direct investment. Cash is re-checked
/// here: the wallet may have been drained since the proposal was made, in
/// which case the proposal is kept and the caller told to top up or cancel.
pub fn confirm_transaction(record: &mut LedgerRecord) -> OpResult {
    let pending = record
        .pending_transaction
        .clone()
        .ok_or(LedgerError::NoPendingTransaction)?;
    check_funds(record, Asset::Cash, pending.amount)?;
    record.balance_liquid -= pending.amount;
    *record.balance_mut(pending.asset) += pending.amount;
    record.pending_transaction = None;
    record.push_alert(format!(
        "Approved investment of ₹{} in {}",
        pending.amount, pending.asset
    ));
    Ok(format!(
        "Confirmed: invested ₹{} in {}. Remaining cash: ₹{}",
        pending.amount, pending.asset, record.balance_liquid
    ))
}

pub fn cancel_transaction(record: &mut LedgerRecord) -> OpResult {
    let pending = record
        .pending_transaction
        .take()
        .ok_or(LedgerError::NoPendingTransaction)?;
    record.push_alert(format!(
        "Cancelled proposed investment of ₹{} in {}",
        pending.amount, pending.asset
    ));
    Ok(format!(
        "Cancelled the proposed investment of ₹{} in {}. No money moved.",
        pending.amount, pending.asset
    ))
}

pub fn transfer_asset(record: &mut LedgerRecord, amount: i64, from: Asset, to: Asset) -> OpResult {
    check_amount(amount)?;
    check_funds(record, from, amount)?;
    if from == to {
        return Ok(format!("That money is already in {from}; nothing to move."));
    }
    *record.balance_mut(from) -= amount;
    *record.balance_mut(to) += amount;
    Ok(format!(
        "Moved ₹{amount} from {from} to {to}. {}: ₹{}, {}: ₹{}",
        asset_title(from),
        record.balance(from),
        asset_title(to),
        record.balance(to)
    ))
}

fn asset_title(asset: Asset) -> &'static str {
    match asset {
        Asset::Cash => "Liquid cash",
        Asset::Gold => "Gold",
        Asset::Funds => "Mutual funds",
    }
}
