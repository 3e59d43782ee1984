//! GA4GH variant server integration.

pub mod client;
pub mod protocol;

pub use client::Ga4ghClient;
