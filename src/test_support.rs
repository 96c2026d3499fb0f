//! Helpers for tests that need a live relay and a fake Discord endpoint.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use reqwest::Url;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::app_state::build_app_state;
use crate::config::{ChangePolicy, RelayConfig};
use crate::routes;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Stands in for a Discord webhook: records every POST to `/hook` and answers
/// with a fixed status.
pub struct StubDiscord {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubDiscord {
    pub async fn start(status: StatusCode) -> Self {
        Self::start_with_delay(status, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, delay: Duration) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);

        let app = Router::new().route(
            "/hook",
            post(move |headers: HeaderMap, body: Bytes| {
                let recorded = Arc::clone(&recorded);
                async move {
                    tokio::time::sleep(delay).await;
                    recorded.lock().unwrap().push(RecordedCall {
                        content_type: headers
                            .get(header::CONTENT_TYPE)
                            .and_then(|v| v.to_str().ok())
                            .map(String::from),
                        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
                    });
                    status
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, calls }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/hook", self.addr)).unwrap()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn test_config(stub: &StubDiscord) -> RelayConfig {
    RelayConfig {
        discord_webhook_url: stub.url(),
        bind_address: "127.0.0.1:0".to_string(),
        inbound_timeout: Duration::from_secs(5),
        outbound_timeout: Duration::from_secs(5),
        change_policy: ChangePolicy::FirstOnly,
    }
}

/// Serves the relay on an ephemeral port and returns its base URL.
pub async fn spawn_relay(config: RelayConfig) -> String {
    let state = build_app_state(config).unwrap();
    let app = routes::router(Arc::new(state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
