//! HTTP request handlers for JSON endpoints.

pub mod health;
pub mod variants;

pub use health::health_handler;
pub use variants::search_variants_handler;
