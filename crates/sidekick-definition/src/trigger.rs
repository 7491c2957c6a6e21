use std::fmt;

use serde::{Deserialize, Serialize};

/// `triggerType` value for continuous integration triggers.
pub const CONTINUOUS_INTEGRATION: &str = "continuousIntegration";

/// A continuous integration trigger as installed on a definition that had none.
///
/// Existing triggers are never rebuilt from this type; only their
/// `branchFilters` list is edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousIntegrationTrigger {
  pub branch_filters: Vec<String>,
  pub path_filters: Vec<String>,
  pub batch_changes: bool,
  pub max_concurrent_builds_per_branch: u32,
  pub polling_interval: u32,
  pub trigger_type: String,
}

impl Default for ContinuousIntegrationTrigger {
  fn default() -> Self {
    Self {
      branch_filters: Vec::new(),
      path_filters: Vec::new(),
      batch_changes: false,
      max_concurrent_builds_per_branch: 1,
      polling_interval: 0,
      trigger_type: CONTINUOUS_INTEGRATION.to_string(),
    }
  }
}

impl From<ContinuousIntegrationTrigger> for serde_json::Value {
  fn from(trigger: ContinuousIntegrationTrigger) -> Self {
    serde_json::json!({
      "branchFilters": trigger.branch_filters,
      "pathFilters": trigger.path_filters,
      "batchChanges": trigger.batch_changes,
      "maxConcurrentBuildsPerBranch": trigger.max_concurrent_builds_per_branch,
      "pollingInterval": trigger.polling_interval,
      "triggerType": trigger.trigger_type,
    })
  }
}

/// An include filter for a single branch, e.g. `+refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchFilter(String);

impl BranchFilter {
  const INCLUDE_PREFIX: &'static str = "+refs/heads/";

  pub fn for_branch(branch: &str) -> Self {
    Self(format!("{}{}", Self::INCLUDE_PREFIX, branch))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Exact, case-sensitive comparison against a raw filter entry.
  pub fn matches(&self, entry: &serde_json::Value) -> bool {
    entry.as_str() == Some(self.0.as_str())
  }
}

impl fmt::Display for BranchFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
