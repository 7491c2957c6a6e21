use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Method, RequestBuilder, Response};
use sidekick_definition::{BuildDefinitionDocument, DefinitionId};
use tracing::{debug, instrument};
use url::Url;

use crate::client::DefinitionClient;
use crate::config::{ApiVersions, ClientConfig};
use crate::error::ClientError;
use crate::types::DefinitionList;

const RESOLVING: &str = "fetching build definition id";
const FETCHING: &str = "fetching build definition";
const UPDATING: &str = "updating build definition";

/// [`DefinitionClient`] backed by the `_apis/build/definitions` REST endpoints.
///
/// One `reqwest::Client` is shared by every call, so an invocation's requests
/// reuse the same connection pool.
pub struct HttpDefinitionClient {
  http: Client,
  definitions_url: Url,
  token: Option<String>,
  api_versions: ApiVersions,
}

impl HttpDefinitionClient {
  /// Create a client for the project named in `config`.
  pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
    let definitions_url = definitions_url(&config.collection_url, &config.project)?;

    Ok(Self {
      http: Client::new(),
      definitions_url,
      token: config.token,
      api_versions: config.api_versions,
    })
  }

  /// `{collection}/{project}/_apis/build/definitions`
  pub fn definitions_url(&self) -> &Url {
    &self.definitions_url
  }

  fn definition_url(&self, id: DefinitionId) -> Url {
    let mut url = self.definitions_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.push(&id.to_string());
    }
    url
  }

  fn request(&self, method: Method, url: Url) -> RequestBuilder {
    let request = self.http.request(method, url);
    match &self.token {
      Some(token) => request.basic_auth("", Some(token)),
      None => request,
    }
  }
}

#[async_trait]
impl DefinitionClient for HttpDefinitionClient {
  #[instrument(name = "definition_resolve", skip(self))]
  async fn resolve(&self, name: &str, path: &str) -> Result<Option<DefinitionId>, ClientError> {
    let response = self
      .request(Method::GET, self.definitions_url.clone())
      .query(&[
        ("api-version", self.api_versions.read.as_str()),
        ("name", name),
        ("path", path),
      ])
      .send()
      .await?;

    let body = success(response, RESOLVING)?.text().await?;
    let list: DefinitionList =
      serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse {
        operation: RESOLVING,
        message: e.to_string(),
      })?;

    let id = list.first_id();
    debug!(matches = list.value.as_ref().map_or(0, Vec::len), ?id, "definitions listed");
    Ok(id)
  }

  #[instrument(name = "definition_fetch", skip_all, fields(id = %id))]
  async fn fetch(&self, id: DefinitionId) -> Result<BuildDefinitionDocument, ClientError> {
    let response = self
      .request(Method::GET, self.definition_url(id))
      .query(&[("api-version", self.api_versions.read.as_str())])
      .send()
      .await?;

    let body = success(response, FETCHING)?.text().await?;
    let value: serde_json::Value =
      serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse {
        operation: FETCHING,
        message: e.to_string(),
      })?;

    let document =
      BuildDefinitionDocument::from_value(value).map_err(|e| ClientError::InvalidResponse {
        operation: FETCHING,
        message: e.to_string(),
      })?;

    debug!(field_count = document.as_map().len(), "definition fetched");
    Ok(document)
  }

  #[instrument(name = "definition_update", skip_all, fields(id = %id))]
  async fn update(
    &self,
    id: DefinitionId,
    document: &BuildDefinitionDocument,
  ) -> Result<(), ClientError> {
    let response = self
      .request(Method::PUT, self.definition_url(id))
      .query(&[("api-version", self.api_versions.update.as_str())])
      .json(document)
      .send()
      .await?;

    success(response, UPDATING)?;
    debug!("definition updated");
    Ok(())
  }
}

fn success(response: Response, operation: &'static str) -> Result<Response, ClientError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  // hyper only records the phrase when the server sent a non-canonical one.
  let reason = response
    .extensions()
    .get::<ReasonPhrase>()
    .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
    .or_else(|| status.canonical_reason())
    .unwrap_or("Unknown")
    .to_string();

  Err(ClientError::RemoteRequest {
    operation,
    status: status.as_u16(),
    reason,
  })
}

/// Build `{collection}/{project}/_apis/build/definitions`, tolerating a
/// trailing slash on the collection URL.
fn definitions_url(collection_url: &str, project: &str) -> Result<Url, ClientError> {
  let invalid = |message: String| ClientError::InvalidUrl {
    url: collection_url.to_string(),
    message,
  };

  let mut url = Url::parse(collection_url).map_err(|e| invalid(e.to_string()))?;
  url.set_query(None);
  url.set_fragment(None);

  url
    .path_segments_mut()
    .map_err(|_| invalid("url cannot be a base".to_string()))?
    .pop_if_empty()
    .extend([project, "_apis", "build", "definitions"]);

  Ok(url)
}
