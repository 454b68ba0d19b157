//! Core types and shared logic for waypost.
//!
//! This crate provides:
//! - The accepted-set catalog data model
//! - Query normalization, haystack construction, and the search executor
//! - Response envelope types
//! - Configuration and unified error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod search;

pub use catalog::{AcceptedSet, CatalogItem};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
