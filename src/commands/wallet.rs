// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Asset;
use crate::ops::{self, LedgerError};
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;

fn resolve_asset(label: &str) -> Result<Asset> {
    Asset::resolve(label)
        .ok_or_else(|| LedgerError::UnrecognizedAsset(label.to_string()).into())
}

pub fn status(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let record = store.load()?;
    if maybe_print_json(sub.get_flag("json"), &record)? {
        return Ok(());
    }
    if record.profile_complete {
        println!("{} | {} | {}", record.full_name, record.job, record.bank_name);
    } else {
        println!("Profile incomplete. Run 'muneem onboard' to activate the wallet.");
    }
    if let Some(pt) = &record.pending_transaction {
        println!(
            "ACTION REQUIRED: approve investment of {} in {}? Run 'muneem confirm' or 'muneem cancel'.",
            fmt_money(pt.amount),
            pt.asset
        );
    }
    println!(
        "{}",
        pretty_table(
            &["Bucket", "Balance"],
            vec![
                vec!["Liquid cash".into(), fmt_money(record.balance_liquid)],
                vec!["Gold".into(), fmt_money(record.balance_gold)],
                vec!["Mutual funds".into(), fmt_money(record.balance_mutual_funds)],
                vec!["Net worth".into(), fmt_money(record.net_worth())],
            ],
        )
    );
    println!("{}", ops::market_sentiment());
    for alert in record.alerts.iter().take(5) {
        println!("  * {alert}");
    }
    Ok(())
}

pub fn deposit(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let source = sub.get_one::<String>("source").unwrap();
    let mut record = store.load()?;
    let msg = ops::deposit_income(&mut record, amount, source)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn spend(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let note = sub.get_one::<String>("note").unwrap();
    let mut record = store.load()?;
    let msg = ops::record_expense(&mut record, amount, note)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn invest(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let asset = resolve_asset(sub.get_one::<String>("asset").unwrap())?;
    let mut record = store.load()?;
    let msg = ops::invest_direct(&mut record, amount, asset)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn propose(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let asset = resolve_asset(sub.get_one::<String>("asset").unwrap())?;
    let mut record = store.load()?;
    let msg = ops::propose_investment(&mut record, amount, asset)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn confirm(store: &dyn LedgerStore, _sub: &clap::ArgMatches) -> Result<()> {
    let mut record = store.load()?;
    let msg = ops::confirm_transaction(&mut record)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn cancel(store: &dyn LedgerStore, _sub: &clap::ArgMatches) -> Result<()> {
    let mut record = store.load()?;
    let msg = ops::cancel_transaction(&mut record)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn transfer(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let from = resolve_asset(sub.get_one::<String>("from").unwrap())?;
    let to = resolve_asset(sub.get_one::<String>("to").unwrap())?;
    let mut record = store.load()?;
    let msg = ops::transfer_asset(&mut record, amount, from, to)?;
    store.save(&record)?;
    println!("{msg}");
    Ok(())
}

pub fn history(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let record = store.load()?;
    let entries: Vec<_> = record.income_history.iter().rev().take(limit).collect();
    if maybe_print_json(sub.get_flag("json"), &entries)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.date.to_string(),
                e.source.clone(),
                fmt_money(e.amount),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Source", "Amount"], rows));
    Ok(())
}

pub fn alerts(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let record = store.load()?;
    if record.alerts.is_empty() {
        println!("No alerts.");
        return Ok(());
    }
    for alert in record.alerts.iter().take(limit) {
        println!("* {alert}");
    }
    Ok(())
}
