use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Buy,
    Borrow,
    Auction,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown listing type '{0}'")]
pub struct UnknownListingKind(pub String);

impl ListingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::Buy => "buy",
            ListingKind::Borrow => "borrow",
            ListingKind::Auction => "auction",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: "AUCTION", "Auction" and "auction" are the same kind.
impl FromStr for ListingKind {
    type Err = UnknownListingKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [ListingKind::Buy, ListingKind::Borrow, ListingKind::Auction]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownListingKind(s.to_string()))
    }
}

// -- Creation payloads --

/// Fields every new listing carries, whatever its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub seller_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyProduct {
    #[serde(flatten)]
    pub product: NewProduct,
    pub quantity: u32,
}

/// `price` is the daily rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowProduct {
    #[serde(flatten)]
    pub product: NewProduct,
    pub available_from: NaiveDate,
    pub available_until: NaiveDate,
}

/// `price` is the starting price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionProduct {
    #[serde(flatten)]
    pub product: NewProduct,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListingPayload {
    Buy(BuyProduct),
    Borrow(BorrowProduct),
    Auction(AuctionProduct),
}

impl ListingPayload {
    pub fn kind(&self) -> ListingKind {
        match self {
            ListingPayload::Buy(_) => ListingKind::Buy,
            ListingPayload::Borrow(_) => ListingKind::Borrow,
            ListingPayload::Auction(_) => ListingKind::Auction,
        }
    }

    pub fn product(&self) -> &NewProduct {
        match self {
            ListingPayload::Buy(p) => &p.product,
            ListingPayload::Borrow(p) => &p.product,
            ListingPayload::Auction(p) => &p.product,
        }
    }
}

// -- Read model --

/// A stored listing. Kind-specific columns are `None` for the other kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub kind: ListingKind,
    pub seller_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub current_price: Option<f64>,
    pub quantity: Option<u32>,
    pub available_from: Option<NaiveDate>,
    pub available_until: Option<NaiveDate>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
