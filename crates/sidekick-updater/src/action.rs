use std::fmt;
use std::str::FromStr;

use crate::error::UpdateError;

/// The change requested for a definition's branch triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
  AddBranch,
  RemoveBranch,
}

impl BranchAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      BranchAction::AddBranch => "addbranch",
      BranchAction::RemoveBranch => "removebranch",
    }
  }

  /// Message prefix used when the action fails.
  pub fn failure_context(&self) -> &'static str {
    match self {
      BranchAction::AddBranch => "Unable to add branch to build definition.",
      BranchAction::RemoveBranch => "Unable to remove branch from build definition.",
    }
  }
}

impl fmt::Display for BranchAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BranchAction {
  type Err = UpdateError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "addbranch" => Ok(BranchAction::AddBranch),
      "removebranch" => Ok(BranchAction::RemoveBranch),
      _ => Err(UpdateError::UnknownAction {
        action: s.to_string(),
      }),
    }
  }
}

/// What an action did to the definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
  Added,
  AlreadyPresent,
  Removed,
  NotPresent,
}

impl BranchOutcome {
  pub(crate) fn of(action: BranchAction, changed: bool) -> Self {
    match (action, changed) {
      (BranchAction::AddBranch, true) => BranchOutcome::Added,
      (BranchAction::AddBranch, false) => BranchOutcome::AlreadyPresent,
      (BranchAction::RemoveBranch, true) => BranchOutcome::Removed,
      (BranchAction::RemoveBranch, false) => BranchOutcome::NotPresent,
    }
  }

  /// Whether the definition was written back.
  pub fn changed(&self) -> bool {
    matches!(self, BranchOutcome::Added | BranchOutcome::Removed)
  }

  /// Operator-facing summary.
  pub fn message(&self, branch: &str, definition: &str) -> String {
    match self {
      BranchOutcome::Added => format!(
        "Successfully added the branch {} in the build triggers of build definition {}.",
        branch, definition
      ),
      BranchOutcome::AlreadyPresent => format!(
        "The branch {} already exists in the build trigger of build definition {}.",
        branch, definition
      ),
      BranchOutcome::Removed => format!(
        "Successfully removed the branch {} from the triggers of build definition {}.",
        branch, definition
      ),
      BranchOutcome::NotPresent => format!(
        "The branch {} does not exist in the build trigger of build definition {}.",
        branch, definition
      ),
    }
  }
}
