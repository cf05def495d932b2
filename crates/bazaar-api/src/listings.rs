use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use bazaar_db::Database;
use bazaar_services::ServiceError;
use bazaar_services::listing::{AuctionProductService, BorrowProductService, BuyProductService};
use bazaar_services::sort::{converter_for, sort_by_type};
use bazaar_types::api::{CreateListingRequest, ListingPage, ListingQuery, SortOption};
use bazaar_types::listing::{BuyProduct, Listing, ListingKind, ListingPayload};
use bazaar_types::models::ProductSortType;

use crate::convert;
use crate::state::AppState;

/// Stores listings of every kind in the `listings` table.
pub struct DbListingService {
    db: Arc<Database>,
}

impl DbListingService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn store(&self, kind: ListingKind, payload: &ListingPayload) -> anyhow::Result<()> {
        let db = self.db.clone();
        let payload = payload.clone();
        let id = Uuid::new_v4();

        let row = tokio::task::spawn_blocking(move || db.insert_listing(&id.to_string(), kind, &payload))
            .await??;

        info!("Created {} listing {} '{}'", kind, row.id, row.name);
        Ok(())
    }
}

#[async_trait]
impl BuyProductService for DbListingService {
    async fn create_buy_listing(&self, product: &BuyProduct) -> anyhow::Result<()> {
        self.store(ListingKind::Buy, &ListingPayload::Buy(product.clone())).await
    }
}

#[async_trait]
impl BorrowProductService for DbListingService {
    async fn create_borrow_listing(&self, product: &ListingPayload) -> anyhow::Result<()> {
        self.store(ListingKind::Borrow, product).await
    }
}

#[async_trait]
impl AuctionProductService for DbListingService {
    async fn create_auction_listing(&self, product: &ListingPayload) -> anyhow::Result<()> {
        self.store(ListingKind::Auction, product).await
    }
}

fn service_status(err: ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidArgument(msg) => {
            warn!("Rejected listing request: {}", msg);
            StatusCode::BAD_REQUEST
        }
        ServiceError::Collaborator(e) => {
            error!("Listing collaborator failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// POST /listings — hand the payload to the collaborator for `listing_type`.
///
/// 202 whether or not a listing was stored: a buy request with a non-buy
/// payload is accepted and dropped.
pub async fn create_listing(
    State(state): State<AppState>,
    Json(req): Json<CreateListingRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let product = req.product.product();
    if product.name.trim().is_empty() || !product.price.is_finite() || product.price < 0.0 {
        warn!("Rejected listing '{}' priced {}", product.name, product.price);
        return Err(StatusCode::BAD_REQUEST);
    }

    let seller_id = product.seller_id.to_string();
    let seller = state.with_db(move |db| db.get_user_by_id(&seller_id)).await?;
    if seller.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }

    state
        .listings
        .create_listing(&req.product, &req.listing_type)
        .await
        .map_err(service_status)?;

    Ok(StatusCode::ACCEPTED)
}

/// The sort named by `tag`: looked up for `kind` when given, otherwise in
/// every kind's table.
fn resolve_sort(kind: Option<ListingKind>, tag: &str) -> Option<ProductSortType> {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => vec![ListingKind::Auction, ListingKind::Borrow],
    };
    kinds
        .into_iter()
        .filter_map(converter_for)
        .find_map(|converter| converter.convert(tag))
}

/// GET /listings — filter by kind and text, sort by tag, then paginate.
pub async fn browse_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let kind = query.kind;
    let rows = state.with_db(move |db| db.get_listings(kind)).await?;
    let mut listings: Vec<Listing> = rows.into_iter().map(convert::listing).collect();

    if let Some(text) = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let needle = text.to_lowercase();
        listings = state.pagination.filter(&listings, |l| {
            l.name.to_lowercase().contains(&needle) || l.description.to_lowercase().contains(&needle)
        });
    }

    if let Some(tag) = query.sort.as_deref() {
        match resolve_sort(kind, tag) {
            Some(sort) => sort_by_type(&mut listings, &sort),
            None => warn!("Unknown sort tag '{}', keeping stored order", tag),
        }
    }

    let page = state
        .pagination
        .paginate(&listings, query.page.unwrap_or(1))
        .map_err(service_status)?;

    Ok(Json(ListingPage {
        items: page.items,
        page: page.page_number,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SortTypesQuery {
    pub kind: ListingKind,
}

/// GET /listings/sort-types?kind= — the sort dropdown for one listing kind.
pub async fn sort_types(Query(query): Query<SortTypesQuery>) -> Json<Vec<SortOption>> {
    let options = converter_for(query.kind)
        .map(|converter| converter.options())
        .unwrap_or_default();
    Json(options)
}

pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = listing_id.to_string();
    let row = state
        .with_db(move |db| db.get_listing_by_id(&id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(convert::listing(row)))
}
