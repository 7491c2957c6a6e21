//! Branch filter edits on the first continuous integration trigger.
//!
//! Both edits report whether the document changed. A `false` result means the
//! document is exactly as it was passed in and must not be written back.

use serde_json::{Map, Value};

use crate::document::BuildDefinitionDocument;
use crate::error::DocumentError;
use crate::trigger::{BranchFilter, ContinuousIntegrationTrigger};

const TRIGGERS: &str = BuildDefinitionDocument::TRIGGERS;
const BRANCH_FILTERS: &str = "branchFilters";

/// Add an include filter for `branch` to the first trigger.
///
/// A definition without triggers (field absent, null, or an empty list) gets a
/// default continuous integration trigger installed first. Returns `false` if
/// the filter is already present.
pub fn add_branch(
  document: &mut BuildDefinitionDocument,
  branch: &str,
) -> Result<bool, DocumentError> {
  let filter = BranchFilter::for_branch(branch);
  let trigger = ensure_first_trigger(document.fields_mut())?;

  if matches!(trigger.get(BRANCH_FILTERS), None | Some(Value::Null)) {
    trigger.insert(BRANCH_FILTERS.to_string(), Value::Array(Vec::new()));
  }

  let filters = match trigger.get_mut(BRANCH_FILTERS) {
    Some(Value::Array(filters)) => filters,
    _ => return Err(shape(BRANCH_FILTERS, "an array or null")),
  };

  if filters.iter().any(|entry| filter.matches(entry)) {
    return Ok(false);
  }

  filters.push(Value::String(filter.to_string()));
  Ok(true)
}

/// Remove the include filter for `branch` from the first trigger.
///
/// When the last filter goes, the whole trigger list is set to null: a CI
/// trigger with no branch filters never fires.
pub fn remove_branch(
  document: &mut BuildDefinitionDocument,
  branch: &str,
) -> Result<bool, DocumentError> {
  let filter = BranchFilter::for_branch(branch);
  let fields = document.fields_mut();

  let Some(trigger) = first_trigger_mut(fields)? else {
    return Ok(false);
  };

  let filters = match trigger.get_mut(BRANCH_FILTERS) {
    None | Some(Value::Null) => return Ok(false),
    Some(Value::Array(filters)) => filters,
    Some(_) => return Err(shape(BRANCH_FILTERS, "an array or null")),
  };

  let Some(position) = filters.iter().position(|entry| filter.matches(entry)) else {
    return Ok(false);
  };

  filters.remove(position);
  let emptied = filters.is_empty();

  if emptied {
    fields.insert(TRIGGERS.to_string(), Value::Null);
  }

  Ok(true)
}

/// Revision comment recorded when a branch is added.
pub fn added_comment(branch: &str) -> String {
  format!("Branch {} added to triggers.", branch)
}

/// Revision comment recorded when a branch is removed.
pub fn removed_comment(branch: &str) -> String {
  format!("Branch {} removed from triggers.", branch)
}

fn first_trigger_mut(
  fields: &mut Map<String, Value>,
) -> Result<Option<&mut Map<String, Value>>, DocumentError> {
  match fields.get_mut(TRIGGERS) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Array(triggers)) => match triggers.first_mut() {
      None => Ok(None),
      Some(Value::Object(trigger)) => Ok(Some(trigger)),
      Some(_) => Err(shape("triggers[0]", "an object")),
    },
    Some(_) => Err(shape(TRIGGERS, "an array or null")),
  }
}

fn ensure_first_trigger(
  fields: &mut Map<String, Value>,
) -> Result<&mut Map<String, Value>, DocumentError> {
  let missing = match fields.get(TRIGGERS) {
    None | Some(Value::Null) => true,
    Some(Value::Array(triggers)) => triggers.is_empty(),
    Some(_) => return Err(shape(TRIGGERS, "an array or null")),
  };

  if missing {
    let trigger = Value::from(ContinuousIntegrationTrigger::default());
    fields.insert(TRIGGERS.to_string(), Value::Array(vec![trigger]));
  }

  match fields.get_mut(TRIGGERS) {
    Some(Value::Array(triggers)) => match triggers.first_mut() {
      Some(Value::Object(trigger)) => Ok(trigger),
      Some(_) => Err(shape("triggers[0]", "an object")),
      None => Err(shape(TRIGGERS, "a non-empty array")),
    },
    _ => Err(shape(TRIGGERS, "an array or null")),
  }
}

fn shape(field: &'static str, expected: &'static str) -> DocumentError {
  DocumentError::UnexpectedShape { field, expected }
}
