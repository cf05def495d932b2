//! Database row types. These map directly to SQLite rows.
//! Distinct from bazaar-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

pub struct ConversationRow {
    pub id: String,
    pub user_id: String,
    pub listing_id: Option<String>,
    pub title: String,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub conversation_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
}

pub struct ListingRow {
    pub id: String,
    pub kind: String,
    pub seller_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub current_price: Option<f64>,
    pub quantity: Option<i64>,
    pub available_from: Option<String>,
    pub available_until: Option<String>,
    pub ends_at: Option<String>,
    pub created_at: String,
}

pub struct ReviewRow {
    pub id: String,
    pub listing_id: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
}
