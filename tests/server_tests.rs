// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use muneem::driver::RulesDriver;
use muneem::models::LedgerRecord;
use muneem::server::{AppState, create_router};
use muneem::store::{LedgerStore, MemoryStore};
use std::sync::Arc;
use tower::ServiceExt;

fn test_state(cash: i64) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_record(LedgerRecord {
        balance_liquid: cash,
        ..LedgerRecord::default()
    }));
    let state = AppState::new(
        store.clone(),
        Arc::new(RulesDriver::new()),
        None,
    );
    (state, store)
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/whatsapp")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn webhook_replies_with_twiml() {
    let (state, store) = test_state(0);
    let app = create_router(state);

    let resp = app
        .oneshot(form_request(
            "From=whatsapp%3A%2B919876543210&Body=I+made+500+from+gig+work",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let xml = body_string(resp).await;
    assert!(xml.contains("<Response><Message>"));
    assert!(xml.contains("₹500"));
    assert_eq!(store.load().unwrap().balance_liquid, 500);
}

#[tokio::test]
async fn webhook_turns_ledger_failures_into_replies() {
    let (state, store) = test_state(300);
    let app = create_router(state);

    let resp = app
        .oneshot(form_request("From=u&Body=spent+500+on+rent"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let xml = body_string(resp).await;
    assert!(xml.contains("Insufficient funds"));
    assert_eq!(store.load().unwrap().balance_liquid, 300);
}

#[tokio::test]
async fn webhook_keeps_per_sender_history() {
    let (state, _store) = test_state(1000);
    let app = create_router(state);

    // two turns from the same sender must both succeed
    let r1 = app
        .clone()
        .oneshot(form_request("From=u&Body=invest+400+in+gold"))
        .await
        .unwrap();
    assert_eq!(r1.status(), StatusCode::OK);
    let r2 = app
        .oneshot(form_request("From=u&Body=yes"))
        .await
        .unwrap();
    let xml = body_string(r2).await;
    assert!(xml.contains("Confirmed"));
}

#[tokio::test]
async fn trigger_welcome_without_credentials_is_a_skip_not_an_error() {
    let (state, _store) = test_state(0);
    let app = create_router(state);

    let req = Request::builder()
        .method("POST")
        .uri("/trigger-welcome")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"mobile":"9876543210","name":"Rahul"}"#,
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("skipped"));
}

#[tokio::test]
async fn health_reports_ok() {
    let (state, _store) = test_state(0);
    let app = create_router(state);
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("ok"));
}
