//! Sidekick Updater
//!
//! Runs one branch trigger change against a build definition:
//! resolve the definition id, fetch the document, edit its first trigger, and
//! write the document back only if the edit changed something.
//!
//! The sequence is fetch-then-replace with no locking, so a definition edited
//! by someone else in between is overwritten (last write wins).

mod action;
mod error;
mod updater;

pub use action::{BranchAction, BranchOutcome};
pub use error::UpdateError;
pub use updater::TriggerUpdater;
