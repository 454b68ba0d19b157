//! Upstream HTTP plumbing for waypost.
//!
//! This crate provides:
//! - The accepted-set source: fetch, in-memory freshness-window cache,
//!   and the degrade-to-fallback policy
//! - The trust artifact pass-through client

pub mod accepted_set;
pub mod trust;

pub use accepted_set::{AcceptedSetConfig, AcceptedSetSource, SetSnapshot};
pub use trust::{TrustArtifact, TrustClient, TrustPayload};
