// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Deterministic keyword driver. Maps an utterance to at most one typed
//! operation; no network, no model. Investments go through the propose /
//! confirm handshake so the user always approves before money moves.

use crate::driver::{ConversationDriver, Turn};
use crate::engine::{self, OperationRequest};
use crate::models::Asset;
use crate::ops::LedgerError;
use crate::store::LedgerStore;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d[\d,]*)").unwrap());
static CONFIRM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(yes|y|confirm|approve|ok(ay)?|do it)\b").unwrap());
static CANCEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(no|n|cancel|drop it|forget it)\b").unwrap());
static DEPOSIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(earned|made|received|got paid|salary|income|deposit)\b").unwrap());
static EXPENSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(spent|spend|paid|bought|expense)\b").unwrap());
static TRANSFER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfrom\s+([a-z ]+?)\s+(?:to|into)\s+([a-z ]+)").unwrap());
static SOURCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfrom\s+([a-z][a-z ]*)").unwrap());
static EXPENSE_DESC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:on|for)\s+(\S[\S ]*)").unwrap());

const HELP: &str = "I can help with your wallet. Try: 'balance', 'I made 500 from gig work', \
'spent 200 on food', 'invest 500 in gold', 'move 300 from gold to mutual funds', \
'market trends', or reply YES / NO to a pending investment.";

#[derive(Default)]
pub struct RulesDriver;

impl RulesDriver {
    pub fn new() -> Self {
        RulesDriver
    }

    /// Map free text to a typed operation. `Ok(None)` means no intent was
    /// recognized; `Err` carries a declared ledger failure (bad asset label,
    /// missing amount) to be surfaced verbatim.
    pub fn parse(input: &str) -> Result<Option<OperationRequest>, LedgerError> {
        let text = input.trim();
        let lower = text.to_lowercase();

        if CONFIRM_RE.is_match(text) {
            return Ok(Some(OperationRequest::ConfirmTransaction));
        }
        if CANCEL_RE.is_match(text) {
            return Ok(Some(OperationRequest::CancelTransaction));
        }
        if lower.contains("market") || lower.contains("sentiment") || lower.contains("trend") {
            return Ok(Some(OperationRequest::MarketSentiment));
        }

        if (lower.contains("move") || lower.contains("transfer")) && TRANSFER_RE.is_match(text) {
            let Some(amount) = amount_of(text) else {
                return Ok(None);
            };
            let caps = TRANSFER_RE.captures(text).expect("checked above");
            let from = resolve(caps.get(1).map_or("", |m| m.as_str()))?;
            let to = resolve(caps.get(2).map_or("", |m| m.as_str()))?;
            return Ok(Some(OperationRequest::TransferAsset { amount, from, to }));
        }

        if lower.contains("invest") || (lower.contains("put") && lower.contains(" in ")) {
            let Some(amount) = amount_of(text) else {
                return Ok(None);
            };
            let after_in = lower
                .split_once(" in ")
                .map(|(_, rest)| rest.trim())
                .unwrap_or(lower.as_str());
            let asset = resolve(after_in)?;
            return Ok(Some(OperationRequest::ProposeInvestment { amount, asset }));
        }

        if DEPOSIT_RE.is_match(text) {
            let Some(amount) = amount_of(text) else {
                return Ok(None);
            };
            let source = SOURCE_RE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_else(|| "Gig work".to_string());
            return Ok(Some(OperationRequest::DepositIncome { amount, source }));
        }

        if EXPENSE_RE.is_match(text) {
            let Some(amount) = amount_of(text) else {
                return Ok(None);
            };
            let description = EXPENSE_DESC_RE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_else(|| "an expense".to_string());
            return Ok(Some(OperationRequest::RecordExpense {
                amount,
                description,
            }));
        }

        if lower.contains("balance")
            || lower.contains("net worth")
            || lower.contains("how much")
            || lower.contains("afford")
            || lower.contains("wallet")
        {
            return Ok(Some(OperationRequest::CheckBalance));
        }

        Ok(None)
    }
}

fn resolve(label: &str) -> Result<Asset, LedgerError> {
    Asset::resolve(label).ok_or_else(|| LedgerError::UnrecognizedAsset(label.trim().to_string()))
}

fn amount_of(text: &str) -> Option<i64> {
    AMOUNT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().replace(',', ""))
        .and_then(|digits| digits.parse::<i64>().ok())
}

#[async_trait]
impl ConversationDriver for RulesDriver {
    async fn reply(
        &self,
        store: &dyn LedgerStore,
        _history: &[Turn],
        input: &str,
    ) -> Result<String> {
        match Self::parse(input) {
            Ok(Some(req)) => engine::execute(store, &req),
            Ok(None) => Ok(HELP.to_string()),
            Err(e) => Ok(e.to_string()),
        }
    }
}
