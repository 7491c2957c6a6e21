//! Resolve, fetch, edit and conditionally write back a build definition.

use sidekick_client::DefinitionClient;
use sidekick_definition::{BuildDefinitionDocument, DefinitionId, editor};
use tracing::{info, instrument};

use crate::action::{BranchAction, BranchOutcome};
use crate::error::UpdateError;

/// Applies branch trigger changes through a [`DefinitionClient`].
pub struct TriggerUpdater<C: DefinitionClient> {
  client: C,
}

impl<C: DefinitionClient> TriggerUpdater<C> {
  pub fn new(client: C) -> Self {
    Self { client }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  /// Run `action` for `branch` on the definition `name` in folder `path`.
  #[instrument(name = "trigger_update", skip(self))]
  pub async fn apply(
    &self,
    action: BranchAction,
    name: &str,
    path: &str,
    branch: &str,
  ) -> Result<BranchOutcome, UpdateError> {
    let changed = match action {
      BranchAction::AddBranch => self.add_branch_to_build(name, path, branch).await?,
      BranchAction::RemoveBranch => self.remove_branch_from_build(name, path, branch).await?,
    };

    Ok(BranchOutcome::of(action, changed))
  }

  /// Add `branch` to the triggers of the named definition.
  ///
  /// Returns `false` when the branch was already there; nothing is written.
  pub async fn add_branch_to_build(
    &self,
    name: &str,
    path: &str,
    branch: &str,
  ) -> Result<bool, UpdateError> {
    let (id, mut document) = self.load(name, path).await?;
    self.add_branch(id, &mut document, branch).await
  }

  /// Remove `branch` from the triggers of the named definition.
  ///
  /// Returns `false` when the branch was not there; nothing is written.
  pub async fn remove_branch_from_build(
    &self,
    name: &str,
    path: &str,
    branch: &str,
  ) -> Result<bool, UpdateError> {
    let (id, mut document) = self.load(name, path).await?;
    self.remove_branch(id, &mut document, branch).await
  }

  /// Add `branch` to an already fetched document, writing it back if it changed.
  pub async fn add_branch(
    &self,
    id: DefinitionId,
    document: &mut BuildDefinitionDocument,
    branch: &str,
  ) -> Result<bool, UpdateError> {
    let added = editor::add_branch(document, branch)?;

    if added {
      document.set_comment(editor::added_comment(branch));
      self.client.update(id, document).await?;
      info!(%id, branch, "branch added to triggers");
    } else {
      info!(%id, branch, "branch already in triggers, nothing to update");
    }

    Ok(added)
  }

  /// Remove `branch` from an already fetched document, writing it back if it changed.
  pub async fn remove_branch(
    &self,
    id: DefinitionId,
    document: &mut BuildDefinitionDocument,
    branch: &str,
  ) -> Result<bool, UpdateError> {
    let removed = editor::remove_branch(document, branch)?;

    if removed {
      document.set_comment(editor::removed_comment(branch));
      self.client.update(id, document).await?;
      info!(%id, branch, "branch removed from triggers");
    } else {
      info!(%id, branch, "branch not in triggers, nothing to update");
    }

    Ok(removed)
  }

  async fn load(
    &self,
    name: &str,
    path: &str,
  ) -> Result<(DefinitionId, BuildDefinitionDocument), UpdateError> {
    let id = self
      .client
      .resolve(name, path)
      .await?
      .ok_or_else(|| UpdateError::DefinitionNotFound {
        name: name.to_string(),
        path: path.to_string(),
      })?;

    let document = self.client.fetch(id).await?;
    Ok((id, document))
  }
}
