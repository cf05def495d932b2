use std::cmp::Ordering;

use bazaar_types::api::SortOption;
use bazaar_types::listing::{Listing, ListingKind};
use bazaar_types::models::ProductSortType;
use chrono::{DateTime, NaiveDate, Utc};

/// (tag, display label, field name, ascending)
pub type SortTagEntry = (&'static str, &'static str, &'static str, bool);

const AUCTION_SORT_TAGS: &[SortTagEntry] = &[
    ("CurrentPriceAsc", "Current Price", "CurrentPrice", true),
    ("CurrentPriceDesc", "Current Price", "CurrentPrice", false),
    ("StartingPriceAsc", "Starting Price", "StartingPrice", true),
    ("StartingPriceDesc", "Starting Price", "StartingPrice", false),
    ("EndTimeAsc", "End Time", "EndTime", true),
    ("EndTimeDesc", "End Time", "EndTime", false),
    ("NameAsc", "Name", "Name", true),
    ("NameDesc", "Name", "Name", false),
];

const BORROW_SORT_TAGS: &[SortTagEntry] = &[
    ("PriceAsc", "Price", "Price", true),
    ("PriceDesc", "Price", "Price", false),
    ("AvailableFromAsc", "Available From", "AvailableFrom", true),
    ("AvailableFromDesc", "Available From", "AvailableFrom", false),
    ("AvailableUntilAsc", "Available Until", "AvailableUntil", true),
    ("AvailableUntilDesc", "Available Until", "AvailableUntil", false),
    ("NameAsc", "Name", "Name", true),
    ("NameDesc", "Name", "Name", false),
];

/// Maps sort tags coming from the UI to sort descriptors.
pub trait SortTypeConverter: Send + Sync {
    fn table(&self) -> &'static [SortTagEntry];

    /// `None` for a tag this converter does not know. Tags match exactly.
    fn convert(&self, tag: &str) -> Option<ProductSortType> {
        self.table()
            .iter()
            .find(|(t, ..)| *t == tag)
            .map(|(_, label, field, ascending)| ProductSortType::new(label, field, *ascending))
    }

    fn tags(&self) -> Vec<&'static str> {
        self.table().iter().map(|(tag, ..)| *tag).collect()
    }

    fn options(&self) -> Vec<SortOption> {
        self.table()
            .iter()
            .map(|(tag, label, field, ascending)| SortOption {
                tag: tag.to_string(),
                sort_type: ProductSortType::new(label, field, *ascending),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuctionSortTypeConverter;

impl SortTypeConverter for AuctionSortTypeConverter {
    fn table(&self) -> &'static [SortTagEntry] {
        AUCTION_SORT_TAGS
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BorrowSortTypeConverter;

impl SortTypeConverter for BorrowSortTypeConverter {
    fn table(&self) -> &'static [SortTagEntry] {
        BORROW_SORT_TAGS
    }
}

/// Buy listings have no sort tags of their own.
pub fn converter_for(kind: ListingKind) -> Option<&'static dyn SortTypeConverter> {
    match kind {
        ListingKind::Auction => Some(&AuctionSortTypeConverter),
        ListingKind::Borrow => Some(&BorrowSortTypeConverter),
        ListingKind::Buy => None,
    }
}

// -- Applying a sort --

#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Time(DateTime<Utc>),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Something a `ProductSortType` can order.
pub trait Sortable {
    /// Value of the field named `field`, or `None` when this item has none
    /// (including fields the type does not know).
    fn sort_value(&self, field: &str) -> Option<SortValue>;
}

impl Sortable for Listing {
    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "Name" => Some(SortValue::Text(self.name.clone())),
            "Price" | "StartingPrice" => Some(SortValue::Number(self.price)),
            "CurrentPrice" => Some(SortValue::Number(self.current_price.unwrap_or(self.price))),
            "Quantity" => self.quantity.map(|q| SortValue::Number(f64::from(q))),
            "EndTime" => self.ends_at.map(SortValue::Time),
            "AvailableFrom" => self.available_from.map(SortValue::Date),
            "AvailableUntil" => self.available_until.map(SortValue::Date),
            "CreatedAt" => Some(SortValue::Time(self.created_at)),
            _ => None,
        }
    }
}

/// Stable sort by `sort`'s field and direction. Items without a value for the
/// field keep their relative order after every item that has one.
pub fn sort_by_type<T: Sortable>(items: &mut [T], sort: &ProductSortType) {
    items.sort_by(|a, b| {
        match (a.sort_value(&sort.field_name), b.sort_value(&sort.field_name)) {
            (Some(a), Some(b)) => {
                let ord = a.compare(&b);
                if sort.ascending { ord } else { ord.reverse() }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
