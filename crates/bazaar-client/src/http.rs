use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::credentials::CredentialProvider;

/// `reqwest::Client` plus bearer-token injection.
///
/// Every verb asks the credential provider for a token right before the
/// request is built and, when the token is non-empty, sends it as
/// `Authorization: Bearer <token>`. Responses are handed back untouched:
/// no retries, no status checks, no timeouts beyond the inner client's.
#[derive(Clone)]
pub struct AuthorizedClient {
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl AuthorizedClient {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    pub fn with_client(client: Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Start a request with the current credentials already applied.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.credentials.bearer_token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, url).send().await
    }

    /// GET and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> reqwest::Result<T> {
        self.get(url).await?.json().await
    }

    pub async fn post(&self, url: &str) -> reqwest::Result<Response> {
        self.request(Method::POST, url).send().await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> reqwest::Result<Response> {
        self.request(Method::POST, url).json(body).send().await
    }

    pub async fn put(&self, url: &str) -> reqwest::Result<Response> {
        self.request(Method::PUT, url).send().await
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> reqwest::Result<Response> {
        self.request(Method::PUT, url).json(body).send().await
    }

    pub async fn delete(&self, url: &str) -> reqwest::Result<Response> {
        self.request(Method::DELETE, url).send().await
    }

    pub async fn delete_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> reqwest::Result<Response> {
        self.request(Method::DELETE, url).json(body).send().await
    }
}
