// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use muneem::{cli, commands, store};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    match matches.subcommand() {
        Some(("serve", sub)) => commands::serve::handle(sub)?,
        Some(("init", _)) => {
            let s = store::JsonFileStore::open_default()?;
            println!("Ledger data file at {}", s.path().display());
        }
        Some((name, sub)) => {
            let store = store::JsonFileStore::open_default()?;
            match name {
                "onboard" => commands::profile::onboard(&store, sub)?,
                "reset" => commands::profile::reset(&store, sub)?,
                "status" => commands::wallet::status(&store, sub)?,
                "deposit" => commands::wallet::deposit(&store, sub)?,
                "spend" => commands::wallet::spend(&store, sub)?,
                "invest" => commands::wallet::invest(&store, sub)?,
                "propose" => commands::wallet::propose(&store, sub)?,
                "confirm" => commands::wallet::confirm(&store, sub)?,
                "cancel" => commands::wallet::cancel(&store, sub)?,
                "transfer" => commands::wallet::transfer(&store, sub)?,
                "history" => commands::wallet::history(&store, sub)?,
                "alerts" => commands::wallet::alerts(&store, sub)?,
                "chat" => commands::chat::handle(&store, sub)?,
                _ => {
                    cli::build_cli().print_help()?;
                    println!();
                }
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
