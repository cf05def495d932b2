use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A messaging thread owned by the user who opened it, optionally about a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Option<Uuid>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// How a list of listings should be ordered.
///
/// `field_name` names a field of the listing read model (`"CurrentPrice"`,
/// `"Name"`, ...), `display_label` is what a UI shows in its sort dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSortType {
    pub display_label: String,
    pub field_name: String,
    pub ascending: bool,
}

impl ProductSortType {
    pub fn new(display_label: &str, field_name: &str, ascending: bool) -> Self {
        Self {
            display_label: display_label.to_string(),
            field_name: field_name.to_string(),
            ascending,
        }
    }
}
