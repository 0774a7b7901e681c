// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

const UA: &str = concat!(
    "muneem/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/muneem)"
);

pub fn http_client() -> Result<reqwest::Client> {
    let c = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn blocking_http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Whole rupee amounts only; "1,500" and "₹1500" are accepted.
pub fn parse_amount(s: &str) -> Result<i64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    cleaned
        .parse::<i64>()
        .with_context(|| format!("Invalid amount '{}', expected a whole number of rupees", s))
}

pub fn fmt_money(amount: i64) -> String {
    format!("₹{amount}")
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_strips_currency_noise() {
        assert_eq!(parse_amount("1500").unwrap(), 1500);
        assert_eq!(parse_amount("₹1,500").unwrap(), 1500);
        assert_eq!(parse_amount(" 2,00,000 ").unwrap(), 200_000);
        assert!(parse_amount("lots").is_err());
    }
}
