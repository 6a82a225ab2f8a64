//! Document capture and OCR auto-fill.
//!
//! Two stages: store the photographed document as an asset, then ask the
//! extraction service for named value slots and map them onto fields that
//! declare a matching `extraction_source_key`. Extraction is an accelerator,
//! never a gate: the captured asset satisfies the field's requirement whether
//! or not any value maps, and the form stays manually completable throughout.

use crate::error::CaptureError;
use crate::services::{AssetUpload, DocumentExtraction, FilePayload};
use crate::session::{AssetPolicy, FieldValue, FormSession, OverwritePolicy};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

/// Active write policy for extracted values: extraction overwrites whatever
/// the field held. Mirrors [`ENRICHMENT_OVERWRITE`](crate::enrich::ENRICHMENT_OVERWRITE).
pub const EXTRACTION_OVERWRITE: OverwritePolicy = OverwritePolicy::Always;

/// Snapshot of what one extraction wrote, so clearing the capture restores
/// the exact pre-extraction state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionFill {
    /// The capture field the document was uploaded against.
    pub capture_field: String,
    /// `(field, value before apply)` for every field the extraction touched.
    previous: Vec<(String, Option<FieldValue>)>,
}

impl ExtractionFill {
    /// Names of the fields this extraction populated.
    pub fn applied_fields(&self) -> impl Iterator<Item = &str> {
        self.previous.iter().map(|(field, _)| field.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }
}

/// Terminal states of one capture attempt that kept the asset.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// At least one field was auto-filled. The user still has to visually
    /// verify the values before submitting.
    Extracted(ExtractionFill),
    /// Extraction succeeded but produced no key matching any field's
    /// `extraction_source_key`. Reported as a soft error, not a silent no-op.
    NoMappableFields,
}

/// Upload-then-extract pipeline for identity documents.
pub struct CapturePipeline<U, X> {
    uploader: U,
    extractor: X,
}

impl<U, X> CapturePipeline<U, X>
where
    U: AssetUpload,
    X: DocumentExtraction,
{
    pub fn new(uploader: U, extractor: X) -> Self {
        Self {
            uploader,
            extractor,
        }
    }

    /// Runs the full pipeline for a captured document image.
    ///
    /// Upload failure aborts before extraction and leaves the session
    /// untouched. Extraction failure keeps the uploaded asset (the field's
    /// requirement stays satisfied) and reports a distinct error.
    pub async fn capture(
        &self,
        session: &mut FormSession,
        field_name: &str,
        file: FilePayload,
    ) -> Result<CaptureOutcome, CaptureError> {
        let receipt = self
            .uploader
            .upload(&file)
            .await
            .map_err(|e| CaptureError::UploadFailed {
                field: field_name.to_string(),
                message: e.to_string(),
            })?;
        session.attach_asset(field_name, receipt, AssetPolicy::Replace);

        let encoded = BASE64.encode(&file.bytes);
        let extracted = self
            .extractor
            .extract(&encoded, &file.mime_type)
            .await
            .map_err(|e| CaptureError::ExtractionFailed(e.to_string()))?;

        // Snapshot first (immutable pass), then write, so clearing can
        // restore the exact prior state.
        let mut fills: Vec<(String, String, Option<FieldValue>)> = Vec::new();
        for field in session.form().extraction_targets() {
            let Some(key) = &field.extraction_source_key else {
                continue;
            };
            let Some(value) = extracted.get(key) else {
                continue;
            };
            fills.push((
                field.field_name.clone(),
                value.clone(),
                session.value(&field.field_name).cloned(),
            ));
        }

        if fills.is_empty() {
            debug!(field = field_name, "extraction returned no mappable keys");
            return Ok(CaptureOutcome::NoMappableFields);
        }

        let mut previous = Vec::with_capacity(fills.len());
        for (target, value, prior) in fills {
            let occupied = prior.as_ref().is_some_and(|v| !v.is_empty());
            if EXTRACTION_OVERWRITE == OverwritePolicy::PreserveExisting && occupied {
                continue;
            }
            session.set_value(target.clone(), FieldValue::Text(value));
            previous.push((target, prior));
        }

        Ok(CaptureOutcome::Extracted(ExtractionFill {
            capture_field: field_name.to_string(),
            previous,
        }))
    }
}

/// Removes the captured asset and restores every field the extraction wrote
/// back to its pre-extraction value. Exact inverse of the apply step in
/// [`CapturePipeline::capture`].
pub fn clear_capture(session: &mut FormSession, fill: ExtractionFill) {
    session.detach_assets(&fill.capture_field);
    for (field, previous) in fill.previous {
        session.restore_value(&field, previous);
    }
}
