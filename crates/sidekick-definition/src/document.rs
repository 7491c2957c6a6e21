use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Numeric identifier of a build definition, as assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(pub i64);

impl fmt::Display for DefinitionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A build definition exactly as the server returned it.
///
/// The document is kept as an ordered JSON object so that fields this tool
/// knows nothing about survive the fetch/update round trip unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildDefinitionDocument {
  fields: Map<String, Value>,
}

impl BuildDefinitionDocument {
  pub const TRIGGERS: &'static str = "triggers";
  pub const COMMENT: &'static str = "comment";

  /// Wrap an already parsed JSON object.
  pub fn new(fields: Map<String, Value>) -> Self {
    Self { fields }
  }

  /// Accept any JSON value that is an object.
  pub fn from_value(value: Value) -> Result<Self, DocumentError> {
    match value {
      Value::Object(fields) => Ok(Self { fields }),
      other => Err(DocumentError::NotAnObject {
        found: type_name(&other),
      }),
    }
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.get(key)
  }

  /// The `triggers` value, if present.
  pub fn triggers(&self) -> Option<&Value> {
    self.fields.get(Self::TRIGGERS)
  }

  pub fn comment(&self) -> Option<&str> {
    self.fields.get(Self::COMMENT).and_then(Value::as_str)
  }

  /// Set the revision comment recorded by the server alongside the update.
  pub fn set_comment(&mut self, comment: impl Into<String>) {
    self
      .fields
      .insert(Self::COMMENT.to_string(), Value::String(comment.into()));
  }

  pub(crate) fn fields_mut(&mut self) -> &mut Map<String, Value> {
    &mut self.fields
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.fields
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.fields)
  }
}

impl From<Map<String, Value>> for BuildDefinitionDocument {
  fn from(fields: Map<String, Value>) -> Self {
    Self::new(fields)
  }
}

impl TryFrom<Value> for BuildDefinitionDocument {
  type Error = DocumentError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    Self::from_value(value)
  }
}

fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
