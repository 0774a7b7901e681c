// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print machine-readable JSON instead of a table")
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(true)
        .help("Whole rupees, positive")
}

pub fn build_cli() -> Command {
    Command::new("muneem")
        .about("WhatsApp financial-advisor wallet: JSON ledger, agent drivers, webhook server")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Show (and create) the ledger data file location"))
        .subcommand(
            Command::new("onboard")
                .about("Complete KYC onboarding and activate the wallet")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("mobile").long("mobile").required(true))
                .arg(Arg::new("job").long("job").required(true))
                .arg(Arg::new("pan").long("pan").required(true).help("PAN card number"))
                .arg(Arg::new("bank").long("bank").required(true))
                .arg(Arg::new("account").long("account").required(true))
                .arg(Arg::new("ifsc").long("ifsc").required(true))
                .arg(Arg::new("goals").long("goals").help("Free-text financial goals"))
                .arg(Arg::new("debt").long("debt").help("Free-text current debt/EMI"))
                .arg(
                    Arg::new("notify")
                        .long("notify")
                        .help("Base URL of a running muneem server to push the welcome message through"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Wallet balances, pending transaction and recent alerts")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("deposit")
                .about("Record earned income into liquid cash")
                .arg(amount_arg())
                .arg(
                    Arg::new("source")
                        .long("source")
                        .default_value("Gig work")
                        .help("Where the money came from"),
                ),
        )
        .subcommand(
            Command::new("spend")
                .about("Record an expense paid from liquid cash")
                .arg(amount_arg())
                .arg(Arg::new("note").long("note").required(true).help("What it was for")),
        )
        .subcommand(
            Command::new("invest")
                .about("Move cash into an asset immediately")
                .arg(amount_arg())
                .arg(Arg::new("asset").long("asset").required(true).help("gold or mutual funds")),
        )
        .subcommand(
            Command::new("propose")
                .about("Propose an investment; nothing moves until confirmed")
                .arg(amount_arg())
                .arg(Arg::new("asset").long("asset").required(true).help("gold or mutual funds")),
        )
        .subcommand(Command::new("confirm").about("Execute the pending proposed investment"))
        .subcommand(Command::new("cancel").about("Discard the pending proposed investment"))
        .subcommand(
            Command::new("transfer")
                .about("Move money between cash, gold and mutual funds")
                .arg(amount_arg())
                .arg(Arg::new("from").long("from").required(true))
                .arg(Arg::new("to").long("to").required(true)),
        )
        .subcommand(
            Command::new("history")
                .about("Income history, most recent first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("20"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("alerts").about("Recent alerts, most recent first").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("5"),
            ),
        )
        .subcommand(
            Command::new("reset")
                .about("Factory reset: replace the ledger with a fresh incomplete record")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Actually do it"),
                ),
        )
        .subcommand(
            Command::new("chat")
                .about("Talk to the advisor from the terminal")
                .arg(Arg::new("message").long("message").help("One-shot message; omit for a REPL"))
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Force the deterministic rules driver even if GEMINI_API_KEY is set"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the WhatsApp webhook server")
                .arg(Arg::new("host").long("host").default_value("127.0.0.1"))
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("8000"),
                )
                .arg(Arg::new("data").long("data").help("Path to the ledger JSON file"))
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Force the deterministic rules driver"),
                ),
        )
}
