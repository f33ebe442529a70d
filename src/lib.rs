//! Transportation order server
//!
//! A small REST service over transportation orders keyed by truck id:
//! - `OrderRepository` trait with in-memory and NDJSON-file implementations
//! - axum handlers for listing, fetching, creating, updating and deleting orders
//! - NDJSON bulk loading for fixtures and seeding

pub mod api;
pub mod config;
pub mod error;
pub mod fixture;
pub mod repository;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
