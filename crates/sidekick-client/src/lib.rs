//! Sidekick Client
//!
//! REST access to the build definitions of a single team project. The
//! [`DefinitionClient`] trait covers the three calls the updater needs:
//! resolving a definition by name and folder, fetching its full document, and
//! replacing it. [`HttpDefinitionClient`] implements it with `reqwest`.
//!
//! No call is retried. A non-success status surfaces as
//! [`ClientError::RemoteRequest`] carrying the status code and reason.

mod client;
mod config;
mod error;
mod http;
mod types;

pub use client::DefinitionClient;
pub use config::{ApiVersions, ClientConfig};
pub use error::ClientError;
pub use http::HttpDefinitionClient;
pub use types::{DefinitionList, DefinitionReference};
