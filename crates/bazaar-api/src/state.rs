use std::sync::Arc;

use axum::http::StatusCode;
use tracing::error;

use bazaar_db::Database;
use bazaar_services::listing::ListingCreationService;
use bazaar_services::pagination::ProductPaginationService;
use bazaar_services::reviews::ReviewCalculationService;

use crate::listings::DbListingService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub listings: ListingCreationService,
    pub pagination: ProductPaginationService,
    pub reviews: ReviewCalculationService,
}

impl AppStateInner {
    /// Wire the services around `db`. Listings of every kind are stored by the
    /// same database-backed collaborator.
    pub fn new(db: Database, pagination: ProductPaginationService) -> AppState {
        let db = Arc::new(db);
        let store = Arc::new(DbListingService::new(db.clone()));

        Arc::new(Self {
            db,
            listings: ListingCreationService::new(store.clone(), store.clone(), store),
            pagination,
            reviews: ReviewCalculationService,
        })
    }

    /// Run a blocking store call off the async runtime.
    pub async fn with_db<F, T>(&self, f: F) -> Result<T, StatusCode>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .map_err(|e| {
                error!("Database error: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}
