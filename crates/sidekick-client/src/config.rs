/// REST API versions addressed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersions {
  /// Used for listing and fetching definitions.
  pub read: String,
  /// Used when replacing a definition.
  pub update: String,
}

impl Default for ApiVersions {
  fn default() -> Self {
    Self {
      read: "2.0".to_string(),
      update: "2.2".to_string(),
    }
  }
}

/// Where and how to reach the build definitions of a team project.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Project collection URL, e.g. `http://tfs:8080/tfs/DefaultCollection`.
  pub collection_url: String,

  /// Team project name.
  pub project: String,

  /// Personal access token, sent as basic auth with an empty user name.
  pub token: Option<String>,

  pub api_versions: ApiVersions,
}

impl ClientConfig {
  pub fn new(collection_url: impl Into<String>, project: impl Into<String>) -> Self {
    Self {
      collection_url: collection_url.into(),
      project: project.into(),
      token: None,
      api_versions: ApiVersions::default(),
    }
  }

  pub fn with_token(mut self, token: Option<String>) -> Self {
    self.token = token;
    self
  }
}
