//! Row → API model conversion. Corrupt columns are logged and replaced by
//! defaults rather than failing the whole response.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use bazaar_db::models::{ConversationRow, ListingRow, MessageRow, ReviewRow, UserRow};
use bazaar_types::listing::{Listing, ListingKind};
use bazaar_types::models::{Conversation, Message, Review, User};

fn parse_uuid(raw: &str, column: &str, row_id: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}' on row '{}': {}", column, raw, row_id, e);
        Uuid::default()
    })
}

/// SQLite's `datetime('now')` has no timezone ("YYYY-MM-DD HH:MM:SS"); values
/// written by us are RFC 3339. Both are UTC.
pub fn timestamp(raw: &str, column: &str, row_id: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .unwrap_or_else(|e| {
            warn!("Corrupt {} '{}' on row '{}': {}", column, raw, row_id, e);
            DateTime::default()
        })
}

fn date(raw: Option<&str>, column: &str, row_id: &str) -> Option<NaiveDate> {
    let raw = raw?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| warn!("Corrupt {} '{}' on row '{}': {}", column, raw, row_id, e))
        .ok()
}

pub fn user(row: UserRow) -> User {
    User {
        id: parse_uuid(&row.id, "id", &row.id),
        created_at: timestamp(&row.created_at, "created_at", &row.id),
        username: row.username,
    }
}

pub fn conversation(row: ConversationRow) -> Conversation {
    Conversation {
        id: parse_uuid(&row.id, "id", &row.id),
        user_id: parse_uuid(&row.user_id, "user_id", &row.id),
        listing_id: row.listing_id.as_deref().map(|l| parse_uuid(l, "listing_id", &row.id)),
        created_at: timestamp(&row.created_at, "created_at", &row.id),
        title: row.title,
    }
}

pub fn message(row: MessageRow) -> Message {
    Message {
        id: parse_uuid(&row.id, "id", &row.id),
        conversation_id: parse_uuid(&row.conversation_id, "conversation_id", &row.id),
        user_id: parse_uuid(&row.user_id, "user_id", &row.id),
        created_at: timestamp(&row.created_at, "created_at", &row.id),
        content: row.content,
    }
}

pub fn listing(row: ListingRow) -> Listing {
    let kind = row.kind.parse::<ListingKind>().unwrap_or_else(|e| {
        warn!("Corrupt kind on listing '{}': {}", row.id, e);
        ListingKind::Buy
    });

    Listing {
        id: parse_uuid(&row.id, "id", &row.id),
        kind,
        seller_id: parse_uuid(&row.seller_id, "seller_id", &row.id),
        price: row.price,
        current_price: row.current_price,
        quantity: row.quantity.and_then(|q| u32::try_from(q).ok()),
        available_from: date(row.available_from.as_deref(), "available_from", &row.id),
        available_until: date(row.available_until.as_deref(), "available_until", &row.id),
        ends_at: row.ends_at.as_deref().map(|t| timestamp(t, "ends_at", &row.id)),
        created_at: timestamp(&row.created_at, "created_at", &row.id),
        name: row.name,
        description: row.description,
    }
}

pub fn review(row: ReviewRow) -> Review {
    let rating = u8::try_from(row.rating).unwrap_or_else(|_| {
        warn!("Corrupt rating {} on review '{}'", row.rating, row.id);
        0
    });

    Review {
        id: parse_uuid(&row.id, "id", &row.id),
        listing_id: parse_uuid(&row.listing_id, "listing_id", &row.id),
        user_id: parse_uuid(&row.user_id, "user_id", &row.id),
        rating,
        created_at: timestamp(&row.created_at, "created_at", &row.id),
        comment: row.comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_both_timestamp_shapes() {
        let sqlite = timestamp("2026-03-04 05:06:07", "created_at", "r");
        assert_eq!((sqlite.year(), sqlite.month(), sqlite.day()), (2026, 3, 4));
        assert_eq!((sqlite.hour(), sqlite.minute(), sqlite.second()), (5, 6, 7));

        let rfc = timestamp("2026-03-04T05:06:07+00:00", "ends_at", "r");
        assert_eq!(rfc, sqlite);
    }

    #[test]
    fn corrupt_values_fall_back_to_defaults() {
        assert_eq!(timestamp("yesterday", "created_at", "r"), DateTime::<Utc>::default());
        assert_eq!(parse_uuid("nope", "id", "r"), Uuid::default());
        assert_eq!(date(Some("03/04/2026"), "available_from", "r"), None);
        assert_eq!(date(None, "available_from", "r"), None);
    }
}
