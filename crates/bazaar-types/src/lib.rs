pub mod api;
pub mod listing;
pub mod models;
