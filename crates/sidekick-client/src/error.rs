use thiserror::Error;

/// Errors that can occur while talking to the build definitions API.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered with a non-success status.
  #[error("error {operation}. HTTP code {status}. Reason {reason}")]
  RemoteRequest {
    operation: &'static str,
    status: u16,
    reason: String,
  },

  /// The request never got a response.
  #[error("http error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The response body could not be understood.
  #[error("invalid response while {operation}: {message}")]
  InvalidResponse {
    operation: &'static str,
    message: String,
  },

  /// The project collection URL is unusable.
  #[error("invalid collection url '{url}': {message}")]
  InvalidUrl { url: String, message: String },
}

impl ClientError {
  /// HTTP status of a rejected request, if that is what this error is.
  pub fn status(&self) -> Option<u16> {
    match self {
      ClientError::RemoteRequest { status, .. } => Some(*status),
      _ => None,
    }
  }
}
