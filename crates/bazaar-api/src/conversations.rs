use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use bazaar_types::api::CreateConversationRequest;
use bazaar_types::models::Conversation;

use crate::convert;
use crate::state::AppState;

const MAX_TITLE_LEN: usize = 200;

pub async fn create_conversation(
    State(state): State<AppState>,
    Json(req): Json<CreateConversationRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let title = req.title.trim().to_string();
    if title.is_empty() || title.len() > MAX_TITLE_LEN {
        warn!("Rejected conversation title of length {}", title.len());
        return Err(StatusCode::BAD_REQUEST);
    }

    let conversation_id = Uuid::new_v4();
    let id = conversation_id.to_string();
    let user_id = req.user_id.to_string();
    let listing_id = req.listing_id.map(|l| l.to_string());

    let row = state
        .with_db(move |db| {
            // Unknown owner or listing is a 404, not a foreign-key failure.
            if db.get_user_by_id(&user_id)?.is_none() {
                return Ok(None);
            }
            if let Some(listing_id) = &listing_id {
                if db.get_listing_by_id(listing_id)?.is_none() {
                    return Ok(None);
                }
            }
            db.create_conversation(&id, &user_id, listing_id.as_deref(), &title)
                .map(Some)
        })
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    info!("Created conversation {} for user {}", conversation_id, req.user_id);
    Ok((StatusCode::CREATED, Json(convert::conversation(row))))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = conversation_id.to_string();
    let row = state
        .with_db(move |db| db.get_conversation_by_id(&id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(convert::conversation(row)))
}

pub async fn get_user_conversations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = user_id.to_string();
    let rows = state
        .with_db(move |db| db.get_conversations_by_user_id(&id))
        .await?;

    let conversations: Vec<Conversation> = rows.into_iter().map(convert::conversation).collect();
    Ok(Json(conversations))
}
