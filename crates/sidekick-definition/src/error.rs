use thiserror::Error;

/// Errors raised when a build definition document does not have the shape
/// the trigger editor expects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
  /// A known field holds a value of the wrong JSON type.
  #[error("unexpected shape for '{field}': expected {expected}")]
  UnexpectedShape {
    field: &'static str,
    expected: &'static str,
  },

  /// The response body was valid JSON but not an object.
  #[error("build definition must be a JSON object, got {found}")]
  NotAnObject { found: &'static str },
}
