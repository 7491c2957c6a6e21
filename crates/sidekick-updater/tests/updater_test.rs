//! Tests for TriggerUpdater using an in-memory DefinitionClient.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};
use sidekick_client::{ClientError, DefinitionClient};
use sidekick_definition::{BuildDefinitionDocument, DefinitionId};
use sidekick_updater::{BranchAction, BranchOutcome, TriggerUpdater, UpdateError};

/// Fake client holding a single definition.
///
/// `update` panics unless writes were allowed, so a test that expects no
/// write-back fails loudly if one happens.
struct FakeClient {
  id: Option<DefinitionId>,
  document: Value,
  allow_update: bool,
  update_status: Option<u16>,
  resolved: Mutex<Vec<(String, String)>>,
  fetched: Mutex<Vec<DefinitionId>>,
  updated: Mutex<Vec<(DefinitionId, Value)>>,
}

impl FakeClient {
  fn new(id: i64, document: Value) -> Self {
    Self {
      id: Some(DefinitionId(id)),
      document,
      allow_update: true,
      update_status: None,
      resolved: Mutex::new(Vec::new()),
      fetched: Mutex::new(Vec::new()),
      updated: Mutex::new(Vec::new()),
    }
  }

  fn missing() -> Self {
    Self {
      id: None,
      ..Self::new(0, json!({}))
    }
  }

  fn read_only(mut self) -> Self {
    self.allow_update = false;
    self
  }

  fn rejecting_updates(mut self, status: u16) -> Self {
    self.update_status = Some(status);
    self
  }

  fn updates(&self) -> Vec<(DefinitionId, Value)> {
    self.updated.lock().unwrap().clone()
  }
}

#[async_trait]
impl DefinitionClient for FakeClient {
  async fn resolve(&self, name: &str, path: &str) -> Result<Option<DefinitionId>, ClientError> {
    self
      .resolved
      .lock()
      .unwrap()
      .push((name.to_string(), path.to_string()));
    Ok(self.id)
  }

  async fn fetch(&self, id: DefinitionId) -> Result<BuildDefinitionDocument, ClientError> {
    self.fetched.lock().unwrap().push(id);
    Ok(BuildDefinitionDocument::from_value(self.document.clone()).unwrap())
  }

  async fn update(
    &self,
    id: DefinitionId,
    document: &BuildDefinitionDocument,
  ) -> Result<(), ClientError> {
    assert!(self.allow_update, "unexpected write-back for definition {}", id);

    if let Some(status) = self.update_status {
      return Err(ClientError::RemoteRequest {
        operation: "updating build definition",
        status,
        reason: "Conflict".to_string(),
      });
    }

    self
      .updated
      .lock()
      .unwrap()
      .push((id, document.clone().into_value()));
    Ok(())
  }
}

#[tokio::test]
async fn test_add_branch_to_definition_without_triggers() {
  let updater = TriggerUpdater::new(FakeClient::new(
    21,
    json!({ "id": 21, "name": "CI", "triggers": null }),
  ));

  let added = updater
    .add_branch_to_build("CI", "\\", "main")
    .await
    .unwrap();
  assert!(added);

  let client = updater.client();
  assert_eq!(
    client.resolved.lock().unwrap().as_slice(),
    &[("CI".to_string(), "\\".to_string())]
  );
  assert_eq!(client.fetched.lock().unwrap().as_slice(), &[DefinitionId(21)]);

  let updates = client.updates();
  assert_eq!(updates.len(), 1);
  let (id, body) = &updates[0];
  assert_eq!(*id, DefinitionId(21));
  assert_eq!(
    body,
    &json!({
      "id": 21,
      "name": "CI",
      "triggers": [{
        "branchFilters": ["+refs/heads/main"],
        "pathFilters": [],
        "batchChanges": false,
        "maxConcurrentBuildsPerBranch": 1,
        "pollingInterval": 0,
        "triggerType": "continuousIntegration"
      }],
      "comment": "Branch main added to triggers."
    })
  );
}

#[tokio::test]
async fn test_add_existing_branch_does_not_write() {
  let updater = TriggerUpdater::new(
    FakeClient::new(
      3,
      json!({ "triggers": [{ "branchFilters": ["+refs/heads/main"] }] }),
    )
    .read_only(),
  );

  let added = updater
    .add_branch_to_build("CI", "\\", "main")
    .await
    .unwrap();
  assert!(!added);
  assert!(updater.client().updates().is_empty());
}

#[tokio::test]
async fn test_add_twice_on_same_document() {
  let updater = TriggerUpdater::new(FakeClient::new(5, json!({})));
  let mut document = BuildDefinitionDocument::from_value(json!({ "triggers": null })).unwrap();

  assert!(
    updater
      .add_branch(DefinitionId(5), &mut document, "main")
      .await
      .unwrap()
  );
  assert!(
    !updater
      .add_branch(DefinitionId(5), &mut document, "main")
      .await
      .unwrap()
  );

  assert_eq!(updater.client().updates().len(), 1);
  assert_eq!(
    document.triggers().unwrap()[0]["branchFilters"],
    json!(["+refs/heads/main"])
  );
}

#[tokio::test]
async fn test_remove_last_branch_nulls_triggers() {
  let updater = TriggerUpdater::new(FakeClient::new(
    8,
    json!({ "name": "CI", "triggers": [{ "branchFilters": ["+refs/heads/main"] }] }),
  ));

  let removed = updater
    .remove_branch_from_build("CI", "\\Web", "main")
    .await
    .unwrap();
  assert!(removed);

  let updates = updater.client().updates();
  assert_eq!(
    updates[0].1,
    json!({
      "name": "CI",
      "triggers": null,
      "comment": "Branch main removed from triggers."
    })
  );
}

#[tokio::test]
async fn test_remove_missing_branch_does_not_write() {
  let updater = TriggerUpdater::new(
    FakeClient::new(
      8,
      json!({ "triggers": [{ "branchFilters": ["+refs/heads/dev"] }] }),
    )
    .read_only(),
  );

  let removed = updater
    .remove_branch_from_build("CI", "\\", "main")
    .await
    .unwrap();
  assert!(!removed);
}

#[tokio::test]
async fn test_remove_from_definition_without_triggers_does_not_write() {
  let updater = TriggerUpdater::new(FakeClient::new(8, json!({ "triggers": null })).read_only());

  let removed = updater
    .remove_branch_from_build("CI", "\\", "main")
    .await
    .unwrap();
  assert!(!removed);
}

#[tokio::test]
async fn test_missing_definition_stops_before_fetch() {
  let updater = TriggerUpdater::new(FakeClient::missing().read_only());

  let err = updater
    .add_branch_to_build("Ghost", "\\Nowhere", "main")
    .await
    .unwrap_err();

  assert!(matches!(
    &err,
    UpdateError::DefinitionNotFound { name, path } if name == "Ghost" && path == "\\Nowhere"
  ));
  assert!(updater.client().fetched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_update_is_reported() {
  let updater = TriggerUpdater::new(
    FakeClient::new(4, json!({ "triggers": null })).rejecting_updates(409),
  );

  let err = updater
    .add_branch_to_build("CI", "\\", "main")
    .await
    .unwrap_err();

  match err {
    UpdateError::Client(client_err) => assert_eq!(client_err.status(), Some(409)),
    other => panic!("expected client error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_rejected_update_on_remove_is_reported() {
  let updater = TriggerUpdater::new(
    FakeClient::new(
      6,
      json!({ "triggers": [{ "branchFilters": ["+refs/heads/main"] }] }),
    )
    .rejecting_updates(409),
  );

  let err = updater
    .remove_branch_from_build("CI", "\\", "main")
    .await
    .unwrap_err();

  match &err {
    UpdateError::Client(ClientError::RemoteRequest { operation, status, .. }) => {
      assert_eq!(*operation, "updating build definition");
      assert_eq!(*status, 409);
    }
    other => panic!("expected rejected update, got {:?}", other),
  }
  assert!(updater.client().updates().is_empty());
}

#[tokio::test]
async fn test_malformed_triggers_are_not_written() {
  let updater =
    TriggerUpdater::new(FakeClient::new(4, json!({ "triggers": { "oops": true } })).read_only());

  let err = updater
    .add_branch_to_build("CI", "\\", "main")
    .await
    .unwrap_err();
  assert!(matches!(err, UpdateError::Document(_)));
}

#[tokio::test]
async fn test_apply_reports_outcomes() {
  let updater = TriggerUpdater::new(FakeClient::new(
    1,
    json!({ "triggers": [{ "branchFilters": ["+refs/heads/main"] }] }),
  ));

  let outcome = updater
    .apply(BranchAction::AddBranch, "CI", "\\", "main")
    .await
    .unwrap();
  assert_eq!(outcome, BranchOutcome::AlreadyPresent);

  let outcome = updater
    .apply(BranchAction::AddBranch, "CI", "\\", "dev")
    .await
    .unwrap();
  assert_eq!(outcome, BranchOutcome::Added);

  let outcome = updater
    .apply(BranchAction::RemoveBranch, "CI", "\\", "feature")
    .await
    .unwrap();
  assert_eq!(outcome, BranchOutcome::NotPresent);

  let outcome = updater
    .apply(BranchAction::RemoveBranch, "CI", "\\", "main")
    .await
    .unwrap();
  assert_eq!(outcome, BranchOutcome::Removed);

  // Each run fetches the stored definition afresh; only the changing runs write.
  assert_eq!(updater.client().updates().len(), 2);
}
