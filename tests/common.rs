//! Common test utilities: form definitions and in-memory collaborator stubs.
use async_trait::async_trait;
use formflow::prelude::*;
// The prelude glob brings in formflow's single-parameter `Result<T>` alias;
// these collaborator stubs spell out the full two-parameter result type, so
// shadow the alias back to the std definition for this file.
use std::result::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Builds a plain field with no choices and no extraction key.
#[allow(dead_code)]
pub fn field(name: &str, field_type: FieldType, required: bool) -> FieldDefinition {
    FieldDefinition {
        field_name: name.to_string(),
        label: name.to_string(),
        field_type,
        required,
        choices: Vec::new(),
        extraction_source_key: None,
    }
}

/// Builds a field wired to a slot of the extraction result.
#[allow(dead_code)]
pub fn extracted_field(name: &str, source_key: &str) -> FieldDefinition {
    FieldDefinition {
        extraction_source_key: Some(source_key.to_string()),
        ..field(name, FieldType::Text, false)
    }
}

/// An appraisal-style form covering the vehicle lookup fields, a licence
/// capture with two extraction targets, and a repeatable issue list.
#[allow(dead_code)]
pub fn appraisal_form() -> FormDefinition {
    FormDefinition {
        id: "appraisal".to_string(),
        fields: vec![
            field("reg", FieldType::Text, true),
            field("make", FieldType::Text, true),
            field("model", FieldType::Text, false),
            field("colour", FieldType::Text, false),
            field("fuelType", FieldType::Text, false),
            field("yearOfManufacture", FieldType::Number, false),
            field("firstRegistered", FieldType::Date, false),
            field("vehicleId", FieldType::Text, false),
            field("terms", FieldType::SectionHeader, false),
            field("notes", FieldType::Textarea, false),
            field("licence", FieldType::LicenceScan, true),
            extracted_field("holderName", "holder_name"),
            extracted_field("licenceNumber", "licence_number"),
            field("issues", FieldType::PdiIssues, false),
        ],
        static_text: vec!["Sold by {dealer.name}, {dealer.address}".to_string()],
    }
}

/// Registry-source stub returning a fixed response.
#[allow(dead_code)]
pub struct StaticRegistry(pub Result<Option<RegistryRecord>, ServiceError>);

#[async_trait]
impl VehicleRegistryLookup for StaticRegistry {
    async fn lookup(&self, _vrm: &str) -> Result<Option<RegistryRecord>, ServiceError> {
        self.0.clone()
    }
}

/// History-source stub returning a fixed response.
#[allow(dead_code)]
pub struct StaticHistory(pub Result<Option<HistoryRecord>, ServiceError>);

#[async_trait]
impl InspectionHistoryLookup for StaticHistory {
    async fn lookup(&self, _vrm: &str) -> Result<Option<HistoryRecord>, ServiceError> {
        self.0.clone()
    }
}

/// Hints stub; `Err` exercises the swallow-and-degrade path.
#[allow(dead_code)]
pub struct StaticHints(pub Result<Vec<String>, ServiceError>);

#[async_trait]
impl ContextualHints for StaticHints {
    async fn hints(
        &self,
        _make: &str,
        _model: &str,
        _year: Option<u16>,
    ) -> Result<Vec<String>, ServiceError> {
        self.0.clone()
    }
}

#[allow(dead_code)]
pub fn no_hints() -> StaticHints {
    StaticHints(Ok(Vec::new()))
}

/// Upload stub assigning sequential storage keys and throwaway preview URLs.
#[allow(dead_code)]
#[derive(Default)]
pub struct SeqUploader {
    counter: AtomicUsize,
}

#[async_trait]
impl AssetUpload for SeqUploader {
    async fn upload(&self, file: &FilePayload) -> Result<UploadReceipt, ServiceError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(UploadReceipt {
            storage_key: format!("assets/{}/{}", n, file.filename),
            preview_url: format!("https://cdn.test/preview/{}?expires=soon", n),
            filename: file.filename.clone(),
            mime_type: file.mime_type.clone(),
            size: file.bytes.len() as u64,
        })
    }
}

/// Upload stub that always fails.
#[allow(dead_code)]
pub struct FailingUploader;

#[async_trait]
impl AssetUpload for FailingUploader {
    async fn upload(&self, _file: &FilePayload) -> Result<UploadReceipt, ServiceError> {
        Err(ServiceError::new("storage unavailable"))
    }
}

/// Extraction stub returning a fixed response.
#[allow(dead_code)]
pub struct StaticExtraction(pub Result<HashMap<String, String>, ServiceError>);

#[async_trait]
impl DocumentExtraction for StaticExtraction {
    async fn extract(
        &self,
        _image_base64: &str,
        _mime_type: &str,
    ) -> Result<HashMap<String, String>, ServiceError> {
        self.0.clone()
    }
}

/// Inventory search stub answering instantly with fixed candidates.
#[allow(dead_code)]
pub struct InstantSearch(pub Vec<InventoryCandidate>);

#[async_trait]
impl InventorySearch for InstantSearch {
    async fn search(&self, _query: &str) -> Result<Vec<InventoryCandidate>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// Inventory search stub where the query `"slow"` takes a second to answer,
/// for stale-response tests.
#[allow(dead_code)]
pub struct DelayedSearch;

#[async_trait]
impl InventorySearch for DelayedSearch {
    async fn search(&self, query: &str) -> Result<Vec<InventoryCandidate>, ServiceError> {
        if query == "slow" {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        Ok(vec![InventoryCandidate {
            id: format!("match-{}", query),
            ..InventoryCandidate::default()
        }])
    }
}

/// Submission endpoint stub counting calls; optionally failing. Clones share
/// the counter so a test can hand one to the submitter and keep watching.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingEndpoint {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingEndpoint {
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionEndpoint for RecordingEndpoint {
    async fn submit(&self, _payload: &SubmissionPayload) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ServiceError::new("appraisal service returned 503"))
        } else {
            Ok(())
        }
    }
}

/// A small JPEG-ish payload for capture tests.
#[allow(dead_code)]
pub fn photo(name: &str) -> FilePayload {
    FilePayload {
        filename: name.to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

/// A candidate the selection tests pick.
#[allow(dead_code)]
pub fn ford_fiesta() -> InventoryCandidate {
    InventoryCandidate {
        id: "v1".to_string(),
        registration: Some("AB12CDE".to_string()),
        make: Some("Ford".to_string()),
        model: Some("Fiesta".to_string()),
        derivative: Some("Zetec".to_string()),
        mileage: Some(42_000),
        linked_deal_id: Some("deal-77".to_string()),
    }
}
