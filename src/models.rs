// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the three buckets money can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    Cash,
    Gold,
    Funds,
}

impl Asset {
    /// Normalize a free-text label ("gold", "mutual fund", "liquid cash")
    /// into a bucket. Unmatched labels return `None`; callers must surface
    /// that as an error, never as a silent no-op.
    pub fn resolve(label: &str) -> Option<Asset> {
        let l = label.to_lowercase();
        if l.contains("gold") {
            Some(Asset::Gold)
        } else if l.contains("mutual") || l.contains("fund") {
            Some(Asset::Funds)
        } else if l.contains("cash") || l.contains("liquid") || l.contains("wallet") {
            Some(Asset::Cash)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Asset::Cash => "liquid cash",
            Asset::Gold => "gold",
            Asset::Funds => "mutual funds",
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub amount: i64,
    pub source: String,
    pub date: NaiveDate,
}

/// A proposed but unexecuted investment awaiting explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub amount: i64,
    pub asset: Asset,
}

/// The persisted snapshot of one user's balances, profile, and pending state.
/// Key names are the shared schema between the agent, the webhook server, and
/// the dashboard; do not rename fields without migrating the stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub profile_complete: bool,
    pub full_name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub pan_card: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
    #[serde(default)]
    pub financial_goals: String,
    #[serde(default)]
    pub current_debt: String,
    pub balance_liquid: i64,
    pub balance_gold: i64,
    pub balance_mutual_funds: i64,
    #[serde(default)]
    pub income_history: Vec<IncomeEntry>,
    #[serde(default)]
    pub alerts: Vec<String>,
    #[serde(default)]
    pub pending_transaction: Option<PendingTransaction>,
}

impl Default for LedgerRecord {
    fn default() -> Self {
        LedgerRecord {
            profile_complete: false,
            full_name: "User".to_string(),
            mobile: String::new(),
            job: String::new(),
            pan_card: String::new(),
            bank_name: String::new(),
            account_number: String::new(),
            ifsc_code: String::new(),
            financial_goals: String::new(),
            current_debt: String::new(),
            balance_liquid: 0,
            balance_gold: 0,
            balance_mutual_funds: 0,
            income_history: Vec::new(),
            alerts: Vec::new(),
            pending_transaction: None,
        }
    }
}

impl LedgerRecord {
    pub fn balance(&self, asset: Asset) -> i64 {
        match asset {
            Asset::Cash => self.balance_liquid,
            Asset::Gold => self.balance_gold,
            Asset::Funds => self.balance_mutual_funds,
        }
    }

    pub fn balance_mut(&mut self, asset: Asset) -> &mut i64 {
        match asset {
            Asset::Cash => &mut self.balance_liquid,
            Asset::Gold => &mut self.balance_gold,
            Asset::Funds => &mut self.balance_mutual_funds,
        }
    }

    pub fn net_worth(&self) -> i64 {
        self.balance_liquid + self.balance_gold + self.balance_mutual_funds
    }

    /// Alerts are kept most-recent-first; the dashboard shows the top few.
    pub fn push_alert(&mut self, message: impl Into<String>) {
        self.alerts.insert(0, message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_matches_known_labels() {
        assert_eq!(Asset::resolve("Gold"), Some(Asset::Gold));
        assert_eq!(Asset::resolve("digital gold"), Some(Asset::Gold));
        assert_eq!(Asset::resolve("mutual funds"), Some(Asset::Funds));
        assert_eq!(Asset::resolve("Mutual Fund"), Some(Asset::Funds));
        assert_eq!(Asset::resolve("liquid cash"), Some(Asset::Cash));
        assert_eq!(Asset::resolve("CASH"), Some(Asset::Cash));
    }

    #[test]
    fn resolve_rejects_unknown_labels() {
        assert_eq!(Asset::resolve("crypto"), None);
        assert_eq!(Asset::resolve(""), None);
    }

    #[test]
    fn alerts_are_most_recent_first() {
        let mut rec = LedgerRecord::default();
        rec.push_alert("first");
        rec.push_alert("second");
        assert_eq!(rec.alerts, vec!["second", "first"]);
    }

    #[test]
    fn record_round_trips_with_stable_keys() {
        let rec = LedgerRecord::default();
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("profile_complete").is_some());
        assert!(json.get("balance_liquid").is_some());
        assert!(json.get("balance_mutual_funds").is_some());
        assert!(json.get("pending_transaction").is_some());
        let back: LedgerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.net_worth(), 0);
    }
}
