//! Request handlers for the conversation API

use super::error::{ApiError, CONTENT_REQUIRED};
use super::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use council_domain::{Conversation, ConversationMetadata, CouncilOutcome, Question};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Body of both message endpoints
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Turn a message body into a question.
///
/// Malformed JSON, a missing or non-string `content`, and an empty string
/// all yield the same 400.
pub(crate) fn parse_question(
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Question, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        debug!("Rejected message body: {}", rejection);
        ApiError::bad_request(CONTENT_REQUIRED)
    })?;
    request
        .content
        .and_then(Question::try_new)
        .ok_or_else(|| ApiError::bad_request(CONTENT_REQUIRED))
}

/// `GET /`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "LLM Council API" }))
}

/// `GET /api/conversations`
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversationMetadata>>, ApiError> {
    Ok(Json(state.conversations.list().await?))
}

/// `POST /api/conversations`
pub async fn create_conversation(
    State(state): State<AppState>,
) -> Result<Json<Conversation>, ApiError> {
    Ok(Json(state.conversations.create().await?))
}

/// `GET /api/conversations/{id}`
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
    state
        .conversations
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// `DELETE /api/conversations/{id}`
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.conversations.delete(&id).await?;
    Ok(Json(json!({ "ok": true })))
}

/// `POST /api/conversations/{id}/message`
///
/// The turn runs on its own task, so a client that disconnects mid-turn
/// does not leave a question without its answer.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<CouncilOutcome>, ApiError> {
    let question = parse_question(body)?;
    info!("Council request for conversation {}", id);

    let messages = Arc::clone(&state.messages);
    let turn = tokio::spawn(async move { messages.execute(&id, &question).await });
    let outcome = turn.await.map_err(|e| {
        error!("Council turn task failed: {}", e);
        ApiError::internal()
    })??;
    Ok(Json(outcome))
}
