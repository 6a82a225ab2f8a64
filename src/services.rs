//! External collaborator interfaces.
//!
//! Every network-backed dependency of the engine is expressed as an async
//! trait so hosts can implement it over whatever HTTP stack they already
//! carry. The engine never constructs a client itself and performs no retries
//! of its own.

use crate::error::ServiceError;
use crate::submit::SubmissionPayload;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Raw file bytes handed to the engine by the host's picker/camera layer.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// What the upload service returns for a stored file.
///
/// `storage_key` is permanent and is the only part that may enter the value
/// map; `preview_url` expires and is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(alias = "storageKey")]
    pub storage_key: String,
    #[serde(alias = "previewUrl")]
    pub preview_url: String,
    pub filename: String,
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    pub size: u64,
}

/// Vehicle record from the national registration lookup source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub colour: Option<String>,
    #[serde(alias = "fuelType")]
    pub fuel_type: Option<String>,
    #[serde(alias = "yearOfManufacture")]
    pub year_of_manufacture: Option<u16>,
    #[serde(alias = "firstRegistered")]
    pub first_registered: Option<String>,
}

/// Vehicle record from the inspection-history lookup source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub colour: Option<String>,
    #[serde(alias = "fuelType")]
    pub fuel_type: Option<String>,
    #[serde(alias = "firstUsedDate")]
    pub first_used_date: Option<String>,
    #[serde(alias = "manufactureYear")]
    pub manufacture_year: Option<u16>,
}

/// A stock item returned by the inventory search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InventoryCandidate {
    pub id: String,
    pub registration: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub derivative: Option<String>,
    pub mileage: Option<u32>,
    /// Cross-reference to an open sales deal, when one exists.
    #[serde(alias = "linkedDealId")]
    pub linked_deal_id: Option<String>,
}

/// Identifier lookup against the vehicle registration source.
///
/// `Ok(None)` is the source's explicit not-found; `Err` is a transport or
/// service failure. The enrichment service treats both as "no data from this
/// source" but logs them differently.
#[async_trait]
pub trait VehicleRegistryLookup: Send + Sync {
    async fn lookup(&self, vrm: &str) -> Result<Option<RegistryRecord>, ServiceError>;
}

/// Identifier lookup against the inspection-history source.
#[async_trait]
pub trait InspectionHistoryLookup: Send + Sync {
    async fn lookup(&self, vrm: &str) -> Result<Option<HistoryRecord>, ServiceError>;
}

/// Follow-up "known issues for this make/model/year" suggestion lookup.
/// Failures here are always non-fatal.
#[async_trait]
pub trait ContextualHints: Send + Sync {
    async fn hints(
        &self,
        make: &str,
        model: &str,
        year: Option<u16>,
    ) -> Result<Vec<String>, ServiceError>;
}

/// OCR/extraction service: encoded document image in, named value slots out.
#[async_trait]
pub trait DocumentExtraction: Send + Sync {
    async fn extract(
        &self,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<HashMap<String, String>, ServiceError>;
}

/// File storage service.
#[async_trait]
pub trait AssetUpload: Send + Sync {
    async fn upload(&self, file: &FilePayload) -> Result<UploadReceipt, ServiceError>;
}

/// Live inventory search used while a selection group is in `SEARCHING`.
#[async_trait]
pub trait InventorySearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<InventoryCandidate>, ServiceError>;
}

/// The endpoint that receives the assembled submission. The engine sends the
/// payload at most once per user action and surfaces failures without retry.
#[async_trait]
pub trait SubmissionEndpoint: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), ServiceError>;
}
