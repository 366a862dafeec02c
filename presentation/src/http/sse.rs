//! Server-sent events for streamed council turns
//!
//! The turn runs on its own task and feeds a channel. A client that goes
//! away only stops receiving: the turn still runs to completion, so the
//! conversation log stays complete.

use super::error::ApiError;
use super::handlers::{MessageRequest, parse_question};
use super::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::header,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use council_domain::CouncilEvent;
use futures::StreamExt;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tracing::{debug, info};

const CHANNEL_CAPACITY: usize = 32;

/// `POST /api/conversations/{id}/message/stream`
pub async fn send_message_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let question = parse_question(body)?;
    let mut events = state.messages.stream(&id, question).await?;
    info!("Streaming council turn for conversation {}", id);

    let (tx, mut rx) = mpsc::channel::<CouncilEvent>(CHANNEL_CAPACITY);
    tokio::spawn(async move {
        let mut client_gone = false;
        while let Some(event) = events.next().await {
            if !client_gone && tx.send(event).await.is_err() {
                debug!("Client disconnected from conversation {}; finishing turn", id);
                client_gone = true;
            }
        }
    });

    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            yield Ok::<_, Infallible>(to_sse_event(&event));
        }
    };

    Ok((
        [(header::CACHE_CONTROL, "no-cache")],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    ))
}

/// `data: <json>` frame for one event
pub(crate) fn to_sse_event(event: &CouncilEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_default();
    Event::default().data(data)
}
