use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, warn};
use uuid::Uuid;

use bazaar_types::api::{NewMessage, SendMessageRequest};
use bazaar_types::models::Message;

use crate::convert;
use crate::state::AppState;

const MAX_CONTENT_LEN: usize = 4000;

pub async fn send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.content.trim().is_empty() || req.content.len() > MAX_CONTENT_LEN {
        warn!("Rejected message of length {} for conversation {}", req.content.len(), conversation_id);
        return Err(StatusCode::BAD_REQUEST);
    }

    let message_id = Uuid::new_v4();
    let id = message_id.to_string();
    let new_message = NewMessage {
        conversation_id,
        user_id: req.user_id,
        content: req.content,
    };

    let row = state
        .with_db(move |db| {
            if db.get_conversation_by_id(&new_message.conversation_id.to_string())?.is_none()
                || db.get_user_by_id(&new_message.user_id.to_string())?.is_none()
            {
                return Ok(None);
            }
            db.create_message(&id, &new_message).map(Some)
        })
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    debug!("Message {} posted to conversation {}", message_id, conversation_id);
    Ok((StatusCode::CREATED, Json(convert::message(row))))
}

pub async fn get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = conversation_id.to_string();
    let rows = state
        .with_db(move |db| {
            if db.get_conversation_by_id(&id)?.is_none() {
                return Ok(None);
            }
            db.get_messages_by_conversation_id(&id).map(Some)
        })
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    let messages: Vec<Message> = rows.into_iter().map(convert::message).collect();
    Ok(Json(messages))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = message_id.to_string();
    let row = state
        .with_db(move |db| db.get_message_by_id(&id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(convert::message(row)))
}
