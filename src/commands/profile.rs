// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::LedgerRecord;
use crate::store::LedgerStore;
use crate::utils::blocking_http_client;
use anyhow::{Result, bail};

/// Starting bonus credited when the wallet is activated.
const WELCOME_BONUS: i64 = 1000;

pub fn onboard(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    if store.load()?.profile_complete {
        bail!("Profile is already complete. Run 'muneem reset --yes' first.");
    }

    let mut record = LedgerRecord {
        profile_complete: true,
        full_name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        mobile: sub.get_one::<String>("mobile").unwrap().trim().to_string(),
        job: sub.get_one::<String>("job").unwrap().trim().to_string(),
        pan_card: sub.get_one::<String>("pan").unwrap().trim().to_string(),
        bank_name: sub.get_one::<String>("bank").unwrap().trim().to_string(),
        account_number: sub.get_one::<String>("account").unwrap().trim().to_string(),
        ifsc_code: sub.get_one::<String>("ifsc").unwrap().trim().to_string(),
        financial_goals: sub
            .get_one::<String>("goals")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        current_debt: sub
            .get_one::<String>("debt")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        balance_liquid: WELCOME_BONUS,
        ..LedgerRecord::default()
    };
    record.push_alert(format!(
        "Account created successfully, ₹{WELCOME_BONUS} starting bonus credited"
    ));
    store.save(&record)?;
    println!(
        "Welcome {}! Wallet active with a ₹{WELCOME_BONUS} starting bonus.",
        record.full_name
    );

    if let Some(base) = sub.get_one::<String>("notify") {
        let url = format!("{}/trigger-welcome", base.trim_end_matches('/'));
        let payload =
            serde_json::json!({ "mobile": record.mobile, "name": record.full_name });
        match blocking_http_client()?.post(&url).json(&payload).send() {
            Ok(resp) if resp.status().is_success() => {
                println!("Welcome message sent to WhatsApp.");
            }
            Ok(resp) => eprintln!("Could not send welcome message: server returned {}", resp.status()),
            Err(e) => eprintln!("Could not send welcome message: {e}"),
        }
    }
    Ok(())
}

pub fn reset(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("This wipes the wallet. Re-run with --yes to proceed.");
    }
    store.save(&LedgerRecord::default())?;
    println!("Factory reset complete. Run 'muneem onboard' to start again.");
    Ok(())
}
