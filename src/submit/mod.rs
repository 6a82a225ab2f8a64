//! Upload indirection and final submission assembly.
//!
//! Storage keys are permanent and go in the payload; preview URLs expire and
//! never leave the asset ledger. Submission is not idempotent, so the
//! submitter refuses re-entry until the in-flight request settles.

use crate::error::{SubmitError, UploadError};
use crate::services::{AssetUpload, FilePayload, SubmissionEndpoint};
use crate::session::{AssetPolicy, FormSession, UploadedAsset};
use serde::Serialize;
use tracing::warn;

/// The wire payload accepted by the submission endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub form_id: String,
    /// Field values keyed by field name, display-only types excluded.
    pub values: serde_json::Map<String, serde_json::Value>,
    /// Every live uploaded asset, in upload order.
    pub assets: Vec<UploadedAsset>,
}

/// Uploads a file for a plain `FILE`/`SIGNATURE`-style field and wires the
/// storage key into the session. Any prior asset for the field is replaced.
pub async fn upload_to_field<U: AssetUpload>(
    session: &mut FormSession,
    field_name: &str,
    uploader: &U,
    file: &FilePayload,
) -> Result<UploadedAsset, UploadError> {
    let receipt = uploader.upload(file).await.map_err(|e| UploadError {
        field: field_name.to_string(),
        message: e.to_string(),
    })?;
    Ok(session.attach_asset(field_name, receipt, AssetPolicy::Replace))
}

/// Converts the session's current state into the wire payload.
///
/// Values for schema fields go in by field name; reserved keys written by
/// selection groups (candidate ids, linked deal ids) are carried as-is so
/// the back office can resolve the cross-references.
pub fn assemble(session: &FormSession) -> SubmissionPayload {
    let form = session.form();
    let mut values = serde_json::Map::new();

    for (field_name, value) in session.values().iter() {
        if let Some(field) = form.field(field_name) {
            if field.field_type.is_display_only() {
                continue;
            }
        }
        match serde_json::to_value(value) {
            Ok(json) => {
                values.insert(field_name.clone(), json);
            }
            Err(e) => {
                warn!(field = %field_name, error = %e, "skipping unserializable value");
            }
        }
    }

    SubmissionPayload {
        form_id: form.id.clone(),
        values,
        assets: session.assets().all().to_vec(),
    }
}

/// Sends the assembled payload exactly once per user action.
pub struct Submitter<E> {
    endpoint: E,
    in_flight: bool,
}

impl<E: SubmissionEndpoint> Submitter<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            in_flight: false,
        }
    }

    /// Whether a submission is currently awaiting its response. Hosts
    /// disable the submit action while this is true.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validates, assembles and sends the submission.
    ///
    /// Validation failures block before any network call. On rejection the
    /// session is left intact so the user can retry without re-entering
    /// anything, and the submit action re-enables.
    pub async fn submit(&mut self, session: &FormSession) -> Result<(), SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }

        let issues = session.field_issues();
        if !issues.is_empty() {
            return Err(SubmitError::Validation(issues));
        }

        self.in_flight = true;
        let payload = assemble(session);
        let result = self.endpoint.submit(&payload).await;
        self.in_flight = false;

        result.map_err(|e| SubmitError::Rejected(e.to_string()))
    }
}
