//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the formflow crate so hosts
//! can bring the whole working set in with a single `use`.

// Schema and session state
pub use crate::schema::{
    DealerProfile, FieldDefinition, FieldType, FormDefinition, IntoForm, StoredForm,
    substitute_tokens,
};
pub use crate::session::{
    AssetLedger, AssetPolicy, FieldValue, FieldValueMap, FormSession, IssueRecord, OverwritePolicy,
    UploadedAsset,
};

// Field dispatch and validation
pub use crate::registry::{FieldIssue, RenderControl};

// Enrichment, capture, selection, submission
pub use crate::enrich::{EnrichmentOutcome, EnrichmentService, VehicleFacts, normalize_vrm};
pub use crate::extract::{CaptureOutcome, CapturePipeline, ExtractionFill, clear_capture};
pub use crate::issues::{IssueEditor, IssuePatch};
pub use crate::selection::{
    CandidateAttr, CandidateBinding, SearchCoordinator, SearchResponse, SelectionController,
    SelectionEvent, SelectionGroup, SelectionState,
};
pub use crate::submit::{SubmissionPayload, Submitter, assemble, upload_to_field};

// Collaborator interfaces
pub use crate::services::{
    AssetUpload, ContextualHints, DocumentExtraction, FilePayload, HistoryRecord,
    InspectionHistoryLookup, InventoryCandidate, InventorySearch, RegistryRecord,
    SubmissionEndpoint, UploadReceipt, VehicleRegistryLookup,
};

// Error types
pub use crate::error::{
    CaptureError, IssueError, LookupError, SchemaError, ServiceError, SubmitError, UploadError,
};

// Standard library re-exports commonly used with this crate
pub use std::collections::HashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
