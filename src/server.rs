// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Messaging transport adapter: Twilio WhatsApp webhook in, TwiML out, plus a
//! one-shot welcome push used by the onboarding flow. Driver failures become a
//! generic apology reply and leave the ledger unchanged. The handlers assume a
//! single user and a single writer; concurrent webhook deliveries are not
//! guarded against, which is the documented scaling limit of this design.

use crate::driver::{ConversationDriver, HISTORY_TURNS, History};
use crate::store::LedgerStore;
use crate::utils;
use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

const APOLOGY: &str =
    "Sorry, I could not process that right now. Please try again in a moment.";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub driver: Arc<dyn ConversationDriver>,
    pub history: Arc<Mutex<History>>,
    pub notifier: Option<Arc<WelcomeNotifier>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        driver: Arc<dyn ConversationDriver>,
        notifier: Option<Arc<WelcomeNotifier>>,
    ) -> Self {
        AppState {
            store,
            driver,
            history: Arc::new(Mutex::new(History::new(HISTORY_TURNS))),
            notifier,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/whatsapp", post(whatsapp_webhook))
        .route("/trigger-welcome", post(trigger_welcome))
        .with_state(state)
}

#[derive(Deserialize)]
struct WhatsappForm {
    #[serde(rename = "From", default)]
    from: String,
    #[serde(rename = "Body", default)]
    body: String,
}

async fn whatsapp_webhook(
    State(state): State<AppState>,
    Form(form): Form<WhatsappForm>,
) -> Response {
    let input = form.body.trim().to_string();
    tracing::info!(sender = %form.from, "inbound message");

    let recent = state.history.lock().await.recent(&form.from);
    let reply = match state
        .driver
        .reply(state.store.as_ref(), &recent, &input)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "conversation driver failed");
            APOLOGY.to_string()
        }
    };
    state
        .history
        .lock()
        .await
        .record(&form.from, input, reply.clone());
    tracing::info!(sender = %form.from, "reply sent");

    (
        [(header::CONTENT_TYPE, "application/xml")],
        twiml(&reply),
    )
        .into_response()
}

/// Messaging-markup document Twilio expects back from the webhook.
pub fn twiml(message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        xml_escape(message)
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[derive(Debug, Deserialize)]
pub struct WelcomeRequest {
    pub mobile: String,
    pub name: String,
}

#[derive(Serialize)]
struct WelcomeResponse {
    ok: bool,
    detail: String,
}

async fn trigger_welcome(
    State(state): State<AppState>,
    Json(req): Json<WelcomeRequest>,
) -> impl IntoResponse {
    match &state.notifier {
        Some(notifier) => match notifier.send_welcome(&req.mobile, &req.name).await {
            Ok(()) => (
                StatusCode::OK,
                Json(WelcomeResponse {
                    ok: true,
                    detail: "welcome message sent".to_string(),
                }),
            ),
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), mobile = %req.mobile, "welcome push failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(WelcomeResponse {
                        ok: false,
                        detail: format!("{e:#}"),
                    }),
                )
            }
        },
        None => {
            tracing::info!(mobile = %req.mobile, "welcome push skipped, no messaging credentials");
            (
                StatusCode::OK,
                Json(WelcomeResponse {
                    ok: true,
                    detail: "messaging provider not configured; skipped".to_string(),
                }),
            )
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Outbound push through the Twilio messaging API, configured from
/// `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and `TWILIO_WHATSAPP_FROM`.
pub struct WelcomeNotifier {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl WelcomeNotifier {
    pub fn from_env() -> Result<Option<Self>> {
        let (Ok(sid), Ok(token), Ok(from)) = (
            std::env::var("TWILIO_ACCOUNT_SID"),
            std::env::var("TWILIO_AUTH_TOKEN"),
            std::env::var("TWILIO_WHATSAPP_FROM"),
        ) else {
            return Ok(None);
        };
        Ok(Some(WelcomeNotifier {
            client: utils::http_client()?,
            account_sid: sid,
            auth_token: token,
            from,
        }))
    }

    pub async fn send_welcome(&self, mobile: &str, name: &str) -> Result<()> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );
        let to = if mobile.starts_with("whatsapp:") {
            mobile.to_string()
        } else {
            format!("whatsapp:{mobile}")
        };
        let body = format!(
            "Hi {name}! Your Muneem wallet is active. Say 'balance' any time to see where your money is."
        );
        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to.as_str()),
                ("From", self.from.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .await
            .context("Send welcome message")?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("Twilio returned {status}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twiml_escapes_markup() {
        let doc = twiml("cash < 500 & rising");
        assert!(doc.contains("<Message>cash &lt; 500 &amp; rising</Message>"));
        assert!(doc.starts_with("<?xml"));
    }
}
