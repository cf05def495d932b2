use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use bazaar_types::api::CreateUserRequest;

use crate::convert;
use crate::state::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let username = req.username.trim().to_string();
    if username.len() < 3 || username.len() > 32 {
        warn!("Rejected username of length {}", username.len());
        return Err(StatusCode::BAD_REQUEST);
    }

    let user_id = Uuid::new_v4();
    let id = user_id.to_string();
    let row = state
        .with_db(move |db| {
            if db.get_user_by_username(&username)?.is_some() {
                return Ok(None);
            }
            db.create_user(&id, &username).map(Some)
        })
        .await?
        .ok_or(StatusCode::CONFLICT)?;

    info!("Created user {} ({})", row.username, user_id);
    Ok((StatusCode::CREATED, Json(convert::user(row))))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = user_id.to_string();
    let row = state
        .with_db(move |db| db.get_user_by_id(&id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(convert::user(row)))
}
