// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::driver::{self, HISTORY_TURNS, Turn};
use crate::store::LedgerStore;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub fn handle(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Start async runtime")?;
    let (drv, label) = driver::pick_driver(sub.get_flag("offline"))?;

    if let Some(message) = sub.get_one::<String>("message") {
        let reply = rt.block_on(drv.reply(store, &[], message))?;
        println!("{reply}");
        return Ok(());
    }

    println!("Muneem chat ({label} driver). Type 'exit' to quit.");
    let stdin = io::stdin();
    let mut history: Vec<Turn> = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        match rt.block_on(drv.reply(store, &history, line)) {
            Ok(reply) => {
                println!("{reply}");
                history.push(Turn {
                    user: line.to_string(),
                    bot: reply,
                });
                if history.len() > HISTORY_TURNS {
                    history.remove(0);
                }
            }
            Err(e) => eprintln!("advisor unavailable: {e:#}"),
        }
    }
    Ok(())
}
