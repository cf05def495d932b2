use anyhow::Result;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::error;
use uuid::Uuid;

use bazaar_types::api::{
    CreateConversationRequest, CreateListingRequest, CreateReviewRequest, CreateUserRequest,
    ListingPage, ListingQuery, ReviewsResponse, SendMessageRequest, SortOption,
};
use bazaar_types::listing::{Listing, ListingKind};
use bazaar_types::models::{Conversation, Message, Review, User};

use crate::http::AuthorizedClient;

/// Typed calls against a Bazaar server.
#[derive(Clone)]
pub struct MarketplaceApi {
    http: AuthorizedClient,
    base_url: String,
}

impl MarketplaceApi {
    pub fn new(http: AuthorizedClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // -- Users --

    pub async fn create_user(&self, username: &str) -> Result<User> {
        let req = CreateUserRequest {
            username: username.to_string(),
        };
        decode(self.http.post_json(&self.url("/users"), &req).await?).await
    }

    // -- Conversations --

    pub async fn create_conversation(&self, req: &CreateConversationRequest) -> Result<Conversation> {
        decode(self.http.post_json(&self.url("/conversations"), req).await?).await
    }

    /// `None` when the server has no such conversation.
    pub async fn get_conversation(&self, id: Uuid) -> Result<Option<Conversation>> {
        decode_optional(self.http.get(&self.url(&format!("/conversations/{}", id))).await?).await
    }

    pub async fn conversations_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>> {
        decode(self.http.get(&self.url(&format!("/users/{}/conversations", user_id))).await?).await
    }

    // -- Messages --

    pub async fn send_message(&self, conversation_id: Uuid, req: &SendMessageRequest) -> Result<Message> {
        let url = self.url(&format!("/conversations/{}/messages", conversation_id));
        decode(self.http.post_json(&url, req).await?).await
    }

    pub async fn messages(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
        let url = self.url(&format!("/conversations/{}/messages", conversation_id));
        decode(self.http.get(&url).await?).await
    }

    pub async fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
        decode_optional(self.http.get(&self.url(&format!("/messages/{}", id))).await?).await
    }

    // -- Listings --

    pub async fn create_listing(&self, req: &CreateListingRequest) -> Result<()> {
        let resp = self.http.post_json(&self.url("/listings"), req).await?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn browse_listings(&self, query: &ListingQuery) -> Result<ListingPage> {
        let resp = self
            .http
            .request(Method::GET, &self.url("/listings"))
            .query(query)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn get_listing(&self, id: Uuid) -> Result<Option<Listing>> {
        decode_optional(self.http.get(&self.url(&format!("/listings/{}", id))).await?).await
    }

    pub async fn sort_options(&self, kind: ListingKind) -> Result<Vec<SortOption>> {
        let url = self.url(&format!("/listings/sort-types?kind={}", kind));
        decode(self.http.get(&url).await?).await
    }

    // -- Reviews --

    pub async fn add_review(&self, listing_id: Uuid, req: &CreateReviewRequest) -> Result<Review> {
        let url = self.url(&format!("/listings/{}/reviews", listing_id));
        decode(self.http.post_json(&url, req).await?).await
    }

    pub async fn reviews(&self, listing_id: Uuid) -> Result<ReviewsResponse> {
        let url = self.url(&format!("/listings/{}/reviews", listing_id));
        decode(self.http.get(&url).await?).await
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    if !resp.status().is_success() {
        let status = resp.status();
        let url = resp.url().to_string();
        let body = resp.text().await.unwrap_or_default();
        error!("Bazaar API {} failed {}: {}", url, status, body);
        anyhow::bail!("Bazaar API error {}: {}", status, body);
    }
    Ok(resp)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    Ok(check_status(resp).await?.json().await?)
}

async fn decode_optional<T: DeserializeOwned>(resp: Response) -> Result<Option<T>> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    decode(resp).await.map(Some)
}
