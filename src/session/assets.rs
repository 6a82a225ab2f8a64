use crate::services::UploadReceipt;
use serde::{Deserialize, Serialize};

/// A stored file tracked alongside the value map for one session.
///
/// Invariant: `storage_key` is what goes into the value map and the
/// submission payload; `preview_url` expires and exists for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub field_name: String,
    pub storage_key: String,
    pub preview_url: String,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
}

impl UploadedAsset {
    pub fn from_receipt(field_name: &str, receipt: UploadReceipt) -> Self {
        Self {
            field_name: field_name.to_string(),
            storage_key: receipt.storage_key,
            preview_url: receipt.preview_url,
            filename: receipt.filename,
            mime_type: receipt.mime_type,
            size: receipt.size,
        }
    }
}

/// Whether a new upload replaces the field's live asset or appends to a
/// multi-file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPolicy {
    Replace,
    Append,
}

/// Insertion-ordered record of every live uploaded asset in the session.
///
/// At most one live asset per field under [`AssetPolicy::Replace`];
/// multi-file fields append and keep upload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetLedger {
    assets: Vec<UploadedAsset>,
}

impl AssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an asset, dropping any prior asset for the same field.
    pub fn record_replacing(&mut self, asset: UploadedAsset) {
        self.assets.retain(|a| a.field_name != asset.field_name);
        self.assets.push(asset);
    }

    /// Records an asset alongside any existing ones for the field.
    pub fn record_appending(&mut self, asset: UploadedAsset) {
        self.assets.push(asset);
    }

    /// Removes and returns every asset recorded for a field.
    pub fn remove_field(&mut self, field_name: &str) -> Vec<UploadedAsset> {
        let (removed, kept) = self
            .assets
            .drain(..)
            .partition(|a| a.field_name == field_name);
        self.assets = kept;
        removed
    }

    pub fn has_asset(&self, field_name: &str) -> bool {
        self.assets.iter().any(|a| a.field_name == field_name)
    }

    pub fn for_field(&self, field_name: &str) -> impl Iterator<Item = &UploadedAsset> {
        self.assets.iter().filter(move |a| a.field_name == field_name)
    }

    pub fn all(&self) -> &[UploadedAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
