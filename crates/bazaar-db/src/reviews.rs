use anyhow::Result;
use rusqlite::Connection;

use crate::Database;
use crate::models::ReviewRow;

impl Database {
    pub fn insert_review(
        &self,
        id: &str,
        listing_id: &str,
        user_id: &str,
        rating: u8,
        comment: &str,
    ) -> Result<ReviewRow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO reviews (id, listing_id, user_id, rating, comment) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, listing_id, user_id, rating, comment],
            )?;
            let row = conn.query_row(
                "SELECT id, listing_id, user_id, rating, comment, created_at FROM reviews WHERE id = ?1",
                [id],
                map_review,
            )?;
            Ok(row)
        })
    }

    pub fn get_reviews_by_listing_id(&self, listing_id: &str) -> Result<Vec<ReviewRow>> {
        self.with_conn(|conn| query_reviews(conn, listing_id))
    }
}

fn query_reviews(conn: &Connection, listing_id: &str) -> Result<Vec<ReviewRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, listing_id, user_id, rating, comment, created_at
         FROM reviews
         WHERE listing_id = ?1
         ORDER BY created_at ASC, rowid ASC",
    )?;

    let rows = stmt
        .query_map([listing_id], map_review)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_review(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get(0)?,
        listing_id: row.get(1)?,
        user_id: row.get(2)?,
        rating: row.get(3)?,
        comment: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use bazaar_types::listing::{BuyProduct, ListingKind, ListingPayload, NewProduct};

    use crate::test_support::db_with_user;

    #[test]
    fn reviews_are_scoped_to_listing() {
        let (db, user) = db_with_user("alice");
        let payload = ListingPayload::Buy(BuyProduct {
            product: NewProduct {
                seller_id: user.parse().unwrap(),
                name: "Lamp".to_string(),
                description: String::new(),
                price: 20.0,
            },
            quantity: 1,
        });
        db.insert_listing("l-1", ListingKind::Buy, &payload).unwrap();

        db.insert_review("r-1", "l-1", &user, 4, "nice").unwrap();
        db.insert_review("r-2", "l-1", &user, 2, "").unwrap();

        let ratings: Vec<i64> = db
            .get_reviews_by_listing_id("l-1")
            .unwrap()
            .into_iter()
            .map(|r| r.rating)
            .collect();
        assert_eq!(ratings, vec![4, 2]);
        assert!(db.get_reviews_by_listing_id("l-2").unwrap().is_empty());
    }

    #[test]
    fn rating_outside_range_is_rejected() {
        let (db, user) = db_with_user("alice");
        let payload = ListingPayload::Buy(BuyProduct {
            product: NewProduct {
                seller_id: user.parse().unwrap(),
                name: "Lamp".to_string(),
                description: String::new(),
                price: 20.0,
            },
            quantity: 1,
        });
        db.insert_listing("l-1", ListingKind::Buy, &payload).unwrap();
        assert!(db.insert_review("r-1", "l-1", &user, 6, "").is_err());
    }
}
