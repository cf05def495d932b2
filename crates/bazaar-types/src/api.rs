use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listing, ListingKind, ListingPayload};
use crate::models::{ProductSortType, Review};

// -- Users --

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
}

// -- Conversations --

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateConversationRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub listing_id: Option<Uuid>,
    pub title: String,
}

// -- Messages --

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub user_id: Uuid,
    pub content: String,
}

/// Data-transfer shape a message is created from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub conversation_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}

// -- Listings --

/// `listing_type` is matched case-insensitively and selects the collaborator;
/// it is matched independently of the payload's own `kind` tag.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateListingRequest {
    pub listing_type: String,
    pub product: ListingPayload,
}

/// Query string of `GET /listings`. `page` defaults to 1; an unknown `sort`
/// tag leaves the listings in their stored order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ListingKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingPage {
    pub items: Vec<Listing>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOption {
    pub tag: String,
    #[serde(flatten)]
    pub sort_type: ProductSortType,
}

// -- Reviews --

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewRequest {
    pub user_id: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub count: usize,
    pub average_rating: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
}
