// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed dispatch over the fixed operation set.
//!
//! Conversation drivers select an [`OperationRequest`]; `execute` performs the
//! load / apply / persist cycle against an injected store. Declared ledger
//! failures are recovered into reply text here and never escape the operation
//! boundary; only storage faults propagate as errors.

use crate::models::Asset;
use crate::ops;
use crate::store::LedgerStore;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    CheckBalance,
    MarketSentiment,
    DepositIncome { amount: i64, source: String },
    RecordExpense { amount: i64, description: String },
    InvestDirect { amount: i64, asset: Asset },
    ProposeInvestment { amount: i64, asset: Asset },
    ConfirmTransaction,
    CancelTransaction,
    TransferAsset { amount: i64, from: Asset, to: Asset },
}

impl OperationRequest {
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            OperationRequest::CheckBalance | OperationRequest::MarketSentiment
        )
    }
}

/// Run one operation against the stored record. On success the updated record
/// is persisted before returning; on a declared failure the stored state is
/// left untouched and the failure message is returned as the outcome.
pub fn execute(store: &dyn LedgerStore, req: &OperationRequest) -> Result<String> {
    let mut record = store.load()?;
    let outcome = match req {
        OperationRequest::CheckBalance => return Ok(ops::check_balance(&record)),
        OperationRequest::MarketSentiment => return Ok(ops::market_sentiment().to_string()),
        OperationRequest::DepositIncome { amount, source } => {
            ops::deposit_income(&mut record, *amount, source)
        }
        OperationRequest::RecordExpense {
            amount,
            description,
        } => ops::record_expense(&mut record, *amount, description),
        OperationRequest::InvestDirect { amount, asset } => {
            ops::invest_direct(&mut record, *amount, *asset)
        }
        OperationRequest::ProposeInvestment { amount, asset } => {
            ops::propose_investment(&mut record, *amount, *asset)
        }
        OperationRequest::ConfirmTransaction => ops::confirm_transaction(&mut record),
        OperationRequest::CancelTransaction => ops::cancel_transaction(&mut record),
        OperationRequest::TransferAsset { amount, from, to } => {
            ops::transfer_asset(&mut record, *amount, *from, *to)
        }
    };
    match outcome {
        Ok(message) => {
            store.save(&record)?;
            Ok(message)
        }
        Err(e) => Ok(e.to_string()),
    }
}
