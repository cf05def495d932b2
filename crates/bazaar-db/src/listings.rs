use anyhow::Result;
use bazaar_types::listing::{ListingKind, ListingPayload};
use rusqlite::{Connection, OptionalExtension};

use crate::Database;
use crate::models::ListingRow;

const SELECT_LISTING: &str = "SELECT id, kind, seller_id, name, description, price, current_price,
        quantity, available_from, available_until, ends_at, created_at
     FROM listings";

impl Database {
    /// Store `payload` as a listing of `kind`.
    ///
    /// `kind` comes from whichever collaborator handled the request, so it can
    /// differ from the payload's own variant; kind-specific columns are filled
    /// from whatever the payload carries.
    pub fn insert_listing(
        &self,
        id: &str,
        kind: ListingKind,
        payload: &ListingPayload,
    ) -> Result<ListingRow> {
        let product = payload.product();
        let (quantity, available_from, available_until, ends_at) = match payload {
            ListingPayload::Buy(buy) => (Some(i64::from(buy.quantity)), None, None, None),
            ListingPayload::Borrow(borrow) => (
                None,
                Some(borrow.available_from.format("%Y-%m-%d").to_string()),
                Some(borrow.available_until.format("%Y-%m-%d").to_string()),
                None,
            ),
            ListingPayload::Auction(auction) => (None, None, None, Some(auction.ends_at.to_rfc3339())),
        };
        // An auction opens at its starting price.
        let current_price = (kind == ListingKind::Auction).then_some(product.price);

        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO listings
                    (id, kind, seller_id, name, description, price, current_price,
                     quantity, available_from, available_until, ends_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                rusqlite::params![
                    id,
                    kind.as_str(),
                    product.seller_id.to_string(),
                    product.name,
                    product.description,
                    product.price,
                    current_price,
                    quantity,
                    available_from,
                    available_until,
                    ends_at,
                ],
            )?;
            query_listing_by_id(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("Listing vanished after insert: {}", id))
        })
    }

    pub fn get_listing_by_id(&self, id: &str) -> Result<Option<ListingRow>> {
        self.with_conn(|conn| query_listing_by_id(conn, id))
    }

    /// Newest first. `kind = None` returns every listing.
    pub fn get_listings(&self, kind: Option<ListingKind>) -> Result<Vec<ListingRow>> {
        self.with_conn(|conn| {
            let rows = match kind {
                Some(kind) => {
                    let mut stmt = conn.prepare(&format!(
                        "{SELECT_LISTING} WHERE kind = ?1 ORDER BY created_at DESC, rowid DESC"
                    ))?;
                    stmt.query_map([kind.as_str()], map_listing)?
                        .collect::<std::result::Result<Vec<_>, _>>()?
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "{SELECT_LISTING} ORDER BY created_at DESC, rowid DESC"
                    ))?;
                    stmt.query_map([], map_listing)?
                        .collect::<std::result::Result<Vec<_>, _>>()?
                }
            };
            Ok(rows)
        })
    }
}

fn query_listing_by_id(conn: &Connection, id: &str) -> Result<Option<ListingRow>> {
    let row = conn
        .query_row(&format!("{SELECT_LISTING} WHERE id = ?1"), [id], map_listing)
        .optional()?;
    Ok(row)
}

fn map_listing(row: &rusqlite::Row<'_>) -> rusqlite::Result<ListingRow> {
    Ok(ListingRow {
        id: row.get(0)?,
        kind: row.get(1)?,
        seller_id: row.get(2)?,
        name: row.get(3)?,
        description: row.get(4)?,
        price: row.get(5)?,
        current_price: row.get(6)?,
        quantity: row.get(7)?,
        available_from: row.get(8)?,
        available_until: row.get(9)?,
        ends_at: row.get(10)?,
        created_at: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use bazaar_types::listing::{
        AuctionProduct, BorrowProduct, BuyProduct, ListingKind, ListingPayload, NewProduct,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::test_support::db_with_user;

    fn product(seller: &str, name: &str, price: f64) -> NewProduct {
        NewProduct {
            seller_id: seller.parse::<Uuid>().unwrap(),
            name: name.to_string(),
            description: String::new(),
            price,
        }
    }

    #[test]
    fn stores_kind_specific_columns() {
        let (db, seller) = db_with_user("seller");

        let buy = ListingPayload::Buy(BuyProduct {
            product: product(&seller, "Desk", 80.0),
            quantity: 3,
        });
        let row = db.insert_listing("l-buy", ListingKind::Buy, &buy).unwrap();
        assert_eq!(row.kind, "buy");
        assert_eq!(row.quantity, Some(3));
        assert_eq!(row.current_price, None);

        let borrow = ListingPayload::Borrow(BorrowProduct {
            product: product(&seller, "Drill", 5.0),
            available_from: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            available_until: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        });
        let row = db.insert_listing("l-borrow", ListingKind::Borrow, &borrow).unwrap();
        assert_eq!(row.available_from.as_deref(), Some("2026-03-01"));
        assert_eq!(row.available_until.as_deref(), Some("2026-03-31"));

        let auction = ListingPayload::Auction(AuctionProduct {
            product: product(&seller, "Vase", 12.5),
            ends_at: Utc.with_ymd_and_hms(2026, 4, 1, 18, 0, 0).unwrap(),
        });
        let row = db.insert_listing("l-auction", ListingKind::Auction, &auction).unwrap();
        assert_eq!(row.current_price, Some(12.5));
        assert!(row.ends_at.is_some());
    }

    #[test]
    fn filters_by_kind_newest_first() {
        let (db, seller) = db_with_user("seller");
        for (id, name) in [("a", "first"), ("b", "second")] {
            let payload = ListingPayload::Buy(BuyProduct {
                product: product(&seller, name, 1.0),
                quantity: 1,
            });
            db.insert_listing(id, ListingKind::Buy, &payload).unwrap();
        }
        let auction = ListingPayload::Auction(AuctionProduct {
            product: product(&seller, "third", 1.0),
            ends_at: Utc::now(),
        });
        db.insert_listing("c", ListingKind::Auction, &auction).unwrap();

        let buys: Vec<String> = db
            .get_listings(Some(ListingKind::Buy))
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(buys, vec!["second", "first"]);
        assert_eq!(db.get_listings(None).unwrap().len(), 3);
        assert!(db.get_listing_by_id("c").unwrap().is_some());
        assert!(db.get_listing_by_id("z").unwrap().is_none());
    }
}
