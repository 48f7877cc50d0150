//! Fake upstream holiday provider shared by the integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start the fake upstream and return its base URL
///
/// Data set:
/// - 2025/US: 2025-01-01, 2025-01-20, 2025-07-04, 2025-12-25 (all weekdays)
/// - 2025/IN: 2025-01-01, 2025-01-26 (Sunday), 2025-08-15, 2025-12-25
/// - 2024/US: 2024-11-28, 2024-12-25
/// - DOWN: 200 with a body that is not JSON
/// - anything else: 404
pub async fn spawn_upstream() -> String {
    let router = Router::new().route("/{year}/{country}", get(upstream_holidays));
    format!("http://{}", spawn(router).await)
}

async fn upstream_holidays(Path((year, country)): Path<(i32, String)>) -> impl IntoResponse {
    let entries = match (year, country.as_str()) {
        (2025, "US") => json!([
            {"date": "2025-01-01", "localName": "New Year's Day", "name": "New Year's Day", "countryCode": "US"},
            {"date": "2025-01-20", "localName": "Martin Luther King, Jr. Day", "countryCode": "US"},
            {"date": "2025-07-04", "localName": "Independence Day", "countryCode": "US"},
            {"date": "2025-12-25", "localName": "Christmas Day", "countryCode": "US"},
            {"date": null, "localName": "Broken entry"}
        ]),
        (2025, "IN") => json!([
            {"date": "2025-01-01", "localName": "Naya Saal"},
            {"date": "2025-01-26", "localName": "Republic Day"},
            {"date": "2025-08-15", "localName": "Independence Day"},
            {"date": "2025-12-25", "localName": "Christmas"}
        ]),
        (2024, "US") => json!([
            {"date": "2024-11-28", "localName": "Thanksgiving Day"},
            {"date": "2024-12-25", "localName": "Christmas Day"}
        ]),
        (_, "DOWN") => {
            return (StatusCode::OK, "<html>maintenance</html>".to_string()).into_response();
        }
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    (StatusCode::OK, entries.to_string()).into_response()
}

/// Requests seen by a recording upstream, as path and query
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start an upstream that answers 404 to everything and records each request
pub async fn spawn_recording_upstream() -> (String, RequestLog) {
    let log = RequestLog::default();
    let router = Router::new()
        .fallback(record_request)
        .with_state(log.clone());
    (format!("http://{}", spawn(router).await), log)
}

async fn record_request(State(log): State<RequestLog>, uri: Uri) -> StatusCode {
    log.lock().unwrap().push(uri.to_string());
    StatusCode::NOT_FOUND
}
