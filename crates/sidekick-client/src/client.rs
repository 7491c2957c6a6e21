use async_trait::async_trait;
use sidekick_definition::{BuildDefinitionDocument, DefinitionId};

use crate::error::ClientError;

/// Access to the build definitions of one team project.
#[async_trait]
pub trait DefinitionClient: Send + Sync {
  /// Find the definition with exactly this name in this folder.
  ///
  /// Returns `None` when nothing matches. When several definitions match, the
  /// first one in response order wins.
  async fn resolve(&self, name: &str, path: &str) -> Result<Option<DefinitionId>, ClientError>;

  /// Fetch the full definition document.
  async fn fetch(&self, id: DefinitionId) -> Result<BuildDefinitionDocument, ClientError>;

  /// Replace the stored definition with `document`.
  async fn update(
    &self,
    id: DefinitionId,
    document: &BuildDefinitionDocument,
  ) -> Result<(), ClientError>;
}
