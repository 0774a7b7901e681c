// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::driver;
use crate::server::{AppState, WelcomeNotifier, create_router};
use crate::store::{JsonFileStore, LedgerStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("muneem=info")),
        )
        .init();

    let host = sub.get_one::<String>("host").unwrap().clone();
    let port = *sub.get_one::<u16>("port").unwrap();

    let store: Arc<dyn LedgerStore> = match sub.get_one::<String>("data") {
        Some(path) => Arc::new(JsonFileStore::new(path)),
        None => Arc::new(JsonFileStore::open_default()?),
    };
    let (drv, label) = driver::pick_driver(sub.get_flag("offline"))?;
    let notifier = WelcomeNotifier::from_env()?.map(Arc::new);
    if notifier.is_none() {
        tracing::warn!("no Twilio credentials; welcome pushes will be skipped");
    }

    let app = create_router(AppState::new(store, drv, notifier));
    let rt = tokio::runtime::Runtime::new().context("Start async runtime")?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("Bind {host}:{port}"))?;
        tracing::info!(%host, port, driver = label, "muneem webhook listening");
        axum::serve(listener, app).await.context("Serve webhook")?;
        Ok(())
    })
}
