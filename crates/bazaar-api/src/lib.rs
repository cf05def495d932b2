pub mod conversations;
pub mod convert;
pub mod listings;
pub mod messages;
pub mod reviews;
pub mod state;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

pub use state::{AppState, AppStateInner};

/// All Bazaar routes. Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::create_user))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/conversations", get(conversations::get_user_conversations))
        .route("/conversations", post(conversations::create_conversation))
        .route("/conversations/{conversation_id}", get(conversations::get_conversation))
        .route("/conversations/{conversation_id}/messages", get(messages::get_messages))
        .route("/conversations/{conversation_id}/messages", post(messages::send_message))
        .route("/messages/{message_id}", get(messages::get_message))
        .route("/listings", get(listings::browse_listings))
        .route("/listings", post(listings::create_listing))
        .route("/listings/sort-types", get(listings::sort_types))
        .route("/listings/{listing_id}", get(listings::get_listing))
        .route("/listings/{listing_id}/reviews", get(reviews::get_reviews))
        .route("/listings/{listing_id}/reviews", post(reviews::add_review))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
