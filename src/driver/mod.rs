// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Conversation drivers: free text in, reply text out.
//!
//! A driver selects zero or one ledger operation per utterance and invokes it
//! through [`crate::engine::execute`]. The selection mechanism is pluggable:
//! `RulesDriver` is deterministic and offline, `GeminiDriver` delegates to a
//! remote tool-calling model.

use crate::store::LedgerStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

pub mod gemini;
pub mod rules;

pub use gemini::GeminiDriver;
pub use rules::RulesDriver;

/// Conversation history is bounded per sender and held in process memory
/// only; it does not survive a restart.
pub const HISTORY_TURNS: usize = 10;

#[derive(Debug, Clone)]
pub struct Turn {
    pub user: String,
    pub bot: String,
}

#[async_trait]
pub trait ConversationDriver: Send + Sync {
    async fn reply(
        &self,
        store: &dyn LedgerStore,
        history: &[Turn],
        input: &str,
    ) -> Result<String>;
}

/// Recent turns keyed by sender identifier.
pub struct History {
    cap: usize,
    turns: HashMap<String, VecDeque<Turn>>,
}

impl History {
    pub fn new(cap: usize) -> Self {
        History {
            cap,
            turns: HashMap::new(),
        }
    }

    pub fn recent(&self, sender: &str) -> Vec<Turn> {
        self.turns
            .get(sender)
            .map(|q| q.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn record(&mut self, sender: &str, user: String, bot: String) {
        let q = self.turns.entry(sender.to_string()).or_default();
        q.push_back(Turn { user, bot });
        while q.len() > self.cap {
            q.pop_front();
        }
    }
}

/// Gemini when credentials are present and not forced offline, otherwise the
/// deterministic rules driver. Returns the driver and a label for logs.
pub fn pick_driver(offline: bool) -> Result<(Arc<dyn ConversationDriver>, &'static str)> {
    if !offline {
        if let Some(g) = GeminiDriver::from_env()? {
            return Ok((Arc::new(g), "gemini"));
        }
    }
    Ok((Arc::new(RulesDriver::new()), "rules"))
}
