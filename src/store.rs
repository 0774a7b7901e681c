// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::LedgerRecord;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Muneem", "muneem"));

/// Access to the persisted ledger record. A missing record is a valid initial
/// state (fresh install), not a fault; `load` returns the default record then.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> Result<LedgerRecord>;
    fn save(&self, record: &LedgerRecord) -> Result<()>;
}

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("user_data.json"))
}

/// Single-document JSON store. Writes go through a temp file in the same
/// directory followed by a rename, so a reader never observes a partial
/// record. Concurrent writers are out of scope (one user, one conversation).
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(JsonFileStore::new(data_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<LedgerRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LedgerRecord::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Read ledger at {}", self.path.display()));
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Parse ledger at {}", self.path.display()))
    }

    fn save(&self, record: &LedgerRecord) -> Result<()> {
        let json = serde_json::to_vec_pretty(record).context("Serialize ledger record")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).with_context(|| format!("Write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Replace {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and the chat REPL's dry-run mode.
#[derive(Default)]
pub struct MemoryStore {
    cell: Mutex<Option<LedgerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_record(record: LedgerRecord) -> Self {
        MemoryStore {
            cell: Mutex::new(Some(record)),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<LedgerRecord> {
        let cell = self.cell.lock().expect("ledger cell poisoned");
        Ok(cell.clone().unwrap_or_default())
    }

    fn save(&self, record: &LedgerRecord) -> Result<()> {
        let mut cell = self.cell.lock().expect("ledger cell poisoned");
        *cell = Some(record.clone());
        Ok(())
    }
}
