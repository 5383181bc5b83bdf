//! Chat API handlers

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{SendMessageInput, StringUuid};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Send a chat message. Whitespace-only content is a silent no-op.
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SendMessageInput>,
) -> Result<Response> {
    match state.message_service.send(&auth, input).await? {
        Some(message) => {
            Ok((StatusCode::CREATED, Json(SuccessResponse::new(message))).into_response())
        }
        None => Ok(Json(MessageResponse::new("Empty message dropped")).into_response()),
    }
}

/// List the conversation with one client, oldest first
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(client_id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let messages = state.message_service.conversation(&auth, client_id).await?;
    Ok(Json(SuccessResponse::new(messages)))
}
