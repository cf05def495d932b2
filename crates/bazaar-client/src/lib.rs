//! Bazaar HTTP client
//!
//! `AuthorizedClient` is a thin wrapper over `reqwest::Client` that attaches a
//! bearer token from a `CredentialProvider` to every request. `MarketplaceApi`
//! builds typed calls to the Bazaar API on top of it.

pub mod api;
pub mod credentials;
pub mod http;

pub use api::MarketplaceApi;
pub use credentials::{CredentialProvider, NoCredentials, SessionToken, StaticToken};
pub use http::AuthorizedClient;
