//! Marketplace services: listing creation dispatch, sort tags, pagination
//! and review statistics. Nothing here touches storage or the network
//! directly; collaborators are injected.

pub mod error;
pub mod listing;
pub mod pagination;
pub mod reviews;
pub mod sort;

pub use error::ServiceError;
