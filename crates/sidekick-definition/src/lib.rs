//! Sidekick Definition
//!
//! This crate contains the build definition document model and the branch
//! trigger editor. A build definition is fetched from the server as an
//! untyped JSON object; the [`editor`] only ever touches the `triggers` field
//! and leaves the rest of the document as it was received.
//!
//! Nothing in this crate performs I/O. Writing a changed document back is the
//! caller's job, and should only happen when an edit reports a change.

mod document;
pub mod editor;
mod error;
mod trigger;

pub use document::{BuildDefinitionDocument, DefinitionId};
pub use error::DocumentError;
pub use trigger::{BranchFilter, CONTINUOUS_INTEGRATION, ContinuousIntegrationTrigger};
