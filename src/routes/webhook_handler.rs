use crate::app_state::AppState;
use crate::bitbucket::models::{CommitSummary, PushNotification};
use crate::config::ChangePolicy;
use crate::discord::message::OutboundMessage;
use crate::error::{RelayError, Result};

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Largest push payload we are willing to buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const SUCCESS_BODY: &str = "Webhook processed and sent to Discord";

pub async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
) -> Result<(StatusCode, &'static str)> {
    let delivery_id = Uuid::new_v4();

    async move {
        let result = relay_push(&state, req.into_body()).await;

        if let Err(e) = &result {
            if e.status_code().is_server_error() {
                error!("❌ {}", e);
            } else {
                warn!("❌ Rejected webhook: {}", e);
            }
        }

        result
    }
    .instrument(info_span!("webhook", %delivery_id))
    .await
}

async fn relay_push(state: &AppState, body: Body) -> Result<(StatusCode, &'static str)> {
    let body_bytes = timeout(state.config.inbound_timeout, to_bytes(body, MAX_BODY_BYTES))
        .await
        .map_err(|_| RelayError::UnreadableBody("timed out waiting for body".to_string()))?
        .map_err(|e| RelayError::UnreadableBody(e.to_string()))?;

    let event = PushNotification::from_slice(&body_bytes)?;

    let commits: Vec<CommitSummary<'_>> = match state.config.change_policy {
        ChangePolicy::FirstOnly => event.first_commit().into_iter().collect(),
        ChangePolicy::EachChange => event.commits().collect(),
    };

    if commits.is_empty() {
        return Err(RelayError::NoChanges);
    }

    for commit in &commits {
        info!("📦 Push to {} ({})", commit.repository, commit.hash);
        state
            .notifier
            .send(&OutboundMessage::from_commit(commit))
            .await?;
    }

    Ok((StatusCode::OK, SUCCESS_BODY))
}
