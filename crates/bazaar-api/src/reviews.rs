use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use bazaar_types::api::{CreateReviewRequest, ReviewsResponse};
use bazaar_types::models::Review;

use crate::convert;
use crate::state::AppState;

pub async fn add_review(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if !(1..=5).contains(&req.rating) {
        warn!("Rejected rating {} for listing {}", req.rating, listing_id);
        return Err(StatusCode::BAD_REQUEST);
    }

    let review_id = Uuid::new_v4();
    let id = review_id.to_string();
    let lid = listing_id.to_string();
    let uid = req.user_id.to_string();

    let row = state
        .with_db(move |db| {
            if db.get_listing_by_id(&lid)?.is_none() || db.get_user_by_id(&uid)?.is_none() {
                return Ok(None);
            }
            db.insert_review(&id, &lid, &uid, req.rating, &req.comment).map(Some)
        })
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    info!("Review {} ({} stars) added to listing {}", review_id, row.rating, listing_id);
    Ok((StatusCode::CREATED, Json(convert::review(row))))
}

/// GET /listings/{id}/reviews — every review plus count and average.
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = listing_id.to_string();
    let rows = state
        .with_db(move |db| {
            if db.get_listing_by_id(&id)?.is_none() {
                return Ok(None);
            }
            db.get_reviews_by_listing_id(&id).map(Some)
        })
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    let reviews: Vec<Review> = rows.into_iter().map(convert::review).collect();
    let summary = state.reviews.summarize(&reviews);

    Ok(Json(ReviewsResponse { reviews, summary }))
}
