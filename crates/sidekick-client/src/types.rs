use serde::{Deserialize, Serialize};
use sidekick_definition::DefinitionId;

/// One entry of a definition listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionReference {
  pub id: DefinitionId,

  #[serde(default)]
  pub name: Option<String>,

  /// Folder path, e.g. `\Release\Web`.
  #[serde(default)]
  pub path: Option<String>,
}

/// Body of a definition listing response.
///
/// `value` may be missing or null when nothing matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionList {
  #[serde(default)]
  pub count: Option<u64>,

  #[serde(default)]
  pub value: Option<Vec<DefinitionReference>>,
}

impl DefinitionList {
  /// The first match in response order.
  pub fn first_id(&self) -> Option<DefinitionId> {
    self
      .value
      .as_ref()
      .and_then(|definitions| definitions.first())
      .map(|definition| definition.id)
  }
}
