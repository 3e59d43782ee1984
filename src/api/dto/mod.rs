//! Data Transfer Objects for requests and responses.
//!
//! Query strings are deserialized with Serde and checked with validator.

pub mod health;
pub mod query;
pub mod report;
