use std::sync::Arc;

use async_trait::async_trait;
use bazaar_types::listing::{BuyProduct, ListingKind, ListingPayload};
use tracing::debug;

use crate::ServiceError;

#[async_trait]
pub trait BuyProductService: Send + Sync {
    async fn create_buy_listing(&self, product: &BuyProduct) -> anyhow::Result<()>;
}

#[async_trait]
pub trait BorrowProductService: Send + Sync {
    async fn create_borrow_listing(&self, product: &ListingPayload) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AuctionProductService: Send + Sync {
    async fn create_auction_listing(&self, product: &ListingPayload) -> anyhow::Result<()>;
}

/// Routes a new listing to the sub-service for its listing type.
#[derive(Clone)]
pub struct ListingCreationService {
    buy: Arc<dyn BuyProductService>,
    borrow: Arc<dyn BorrowProductService>,
    auction: Arc<dyn AuctionProductService>,
}

impl ListingCreationService {
    pub fn new(
        buy: Arc<dyn BuyProductService>,
        borrow: Arc<dyn BorrowProductService>,
        auction: Arc<dyn AuctionProductService>,
    ) -> Self {
        Self { buy, borrow, auction }
    }

    /// `listing_type` is matched case-insensitively against buy / borrow / auction.
    ///
    /// A buy listing only goes through when `product` is a buy payload; any
    /// other payload is dropped without an error.
    pub async fn create_listing(
        &self,
        product: &ListingPayload,
        listing_type: &str,
    ) -> Result<(), ServiceError> {
        let kind = listing_type
            .parse::<ListingKind>()
            .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;

        match kind {
            ListingKind::Buy => match product {
                ListingPayload::Buy(buy) => self.buy.create_buy_listing(buy).await?,
                other => debug!(
                    "Ignoring buy listing with a {} payload: {}",
                    other.kind(),
                    other.product().name
                ),
            },
            ListingKind::Borrow => self.borrow.create_borrow_listing(product).await?,
            ListingKind::Auction => self.auction.create_auction_listing(product).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_types::listing::{AuctionProduct, NewProduct};
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(&'static str, String)>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<(&'static str, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BuyProductService for Recorder {
        async fn create_buy_listing(&self, product: &BuyProduct) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(("buy", product.product.name.clone()));
            Ok(())
        }
    }

    #[async_trait]
    impl BorrowProductService for Recorder {
        async fn create_borrow_listing(&self, product: &ListingPayload) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(("borrow", product.product().name.clone()));
            Ok(())
        }
    }

    #[async_trait]
    impl AuctionProductService for Recorder {
        async fn create_auction_listing(&self, product: &ListingPayload) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(("auction", product.product().name.clone()));
            Ok(())
        }
    }

    struct FailingAuction;

    #[async_trait]
    impl AuctionProductService for FailingAuction {
        async fn create_auction_listing(&self, _product: &ListingPayload) -> anyhow::Result<()> {
            anyhow::bail!("store unavailable")
        }
    }

    fn service(recorder: &Arc<Recorder>) -> ListingCreationService {
        ListingCreationService::new(recorder.clone(), recorder.clone(), recorder.clone())
    }

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            seller_id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
        }
    }

    fn auction(name: &str) -> ListingPayload {
        ListingPayload::Auction(AuctionProduct {
            product: new_product(name),
            ends_at: Utc::now(),
        })
    }

    fn buy(name: &str) -> ListingPayload {
        ListingPayload::Buy(BuyProduct {
            product: new_product(name),
            quantity: 1,
        })
    }

    #[tokio::test]
    async fn listing_type_is_case_insensitive() {
        let recorder = Arc::new(Recorder::default());
        service(&recorder).create_listing(&auction("vase"), "AUCTION").await.unwrap();
        service(&recorder).create_listing(&buy("desk"), "Buy").await.unwrap();
        service(&recorder).create_listing(&auction("bike"), "borrow").await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                ("auction", "vase".to_string()),
                ("buy", "desk".to_string()),
                ("borrow", "bike".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_listing_type_is_rejected() {
        let recorder = Arc::new(Recorder::default());
        let result = service(&recorder).create_listing(&buy("desk"), "ship").await;
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn buy_with_non_buy_payload_does_nothing() {
        let recorder = Arc::new(Recorder::default());
        service(&recorder).create_listing(&auction("vase"), "buy").await.unwrap();
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn collaborator_failure_propagates() {
        let recorder = Arc::new(Recorder::default());
        let service =
            ListingCreationService::new(recorder.clone(), recorder.clone(), Arc::new(FailingAuction));
        let result = service.create_listing(&auction("vase"), "auction").await;
        assert!(matches!(result, Err(ServiceError::Collaborator(_))));
    }
}
