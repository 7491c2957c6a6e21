use sidekick_client::ClientError;
use sidekick_definition::DocumentError;

/// Errors that can occur while updating a definition's branch triggers.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
  /// No definition with this name exists in this folder.
  #[error("build definition '{name}' not found in folder '{path}'")]
  DefinitionNotFound { name: String, path: String },

  /// Action string is neither `addbranch` nor `removebranch`.
  #[error("unknown action '{action}', expected addbranch or removebranch")]
  UnknownAction { action: String },

  /// A request to the build definitions API failed.
  #[error(transparent)]
  Client(#[from] ClientError),

  /// The fetched definition could not be edited.
  #[error("cannot edit build definition: {0}")]
  Document(#[from] DocumentError),
}
