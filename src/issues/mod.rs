//! Repeatable sub-entry editor for the inspection issue list.
//!
//! Generic list CRUD scoped to one `PDI_ISSUES` field: append a blank
//! record, patch one field of one record, delete by position. Single user,
//! single session; insertion order is the only ordering guarantee.

use crate::error::{IssueError, UploadError};
use crate::schema::{FieldDefinition, FieldType};
use crate::services::{AssetUpload, FilePayload};
use crate::session::{FieldValue, FormSession, IssueRecord};

/// A single-field patch applied to one record.
#[derive(Debug, Clone)]
pub enum IssuePatch {
    /// Changing category also resets the dependent subcategory.
    Category(String),
    Subcategory(String),
    Description(String),
    ActionNeeded(String),
    EstimatedCost(f64),
}

/// Edits the issue list stored under one form field.
#[derive(Debug)]
pub struct IssueEditor {
    field: String,
}

impl IssueEditor {
    /// Binds the editor to a `PDI_ISSUES` field.
    pub fn for_field(field: &FieldDefinition) -> Result<Self, IssueError> {
        if field.field_type != FieldType::PdiIssues {
            return Err(IssueError::NotRepeatable(field.field_name.clone()));
        }
        Ok(Self {
            field: field.field_name.clone(),
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Appends a blank record and returns its index.
    pub fn add(&self, session: &mut FormSession) -> usize {
        let mut records = self.take_records(session);
        records.push(IssueRecord::default());
        let index = records.len() - 1;
        session.set_value(self.field.clone(), FieldValue::Issues(records));
        index
    }

    /// Patches one field of the record at `index`.
    pub fn patch(
        &self,
        session: &mut FormSession,
        index: usize,
        patch: IssuePatch,
    ) -> Result<(), IssueError> {
        let mut records = self.take_records(session);
        let len = records.len();
        if index >= len {
            session.set_value(self.field.clone(), FieldValue::Issues(records));
            return Err(IssueError::OutOfRange { index, len });
        }
        let record = &mut records[index];

        match patch {
            IssuePatch::Category(category) => {
                record.category = category;
                // Subcategories belong to a category; a stale one must not
                // survive the switch.
                record.subcategory.clear();
            }
            IssuePatch::Subcategory(subcategory) => record.subcategory = subcategory,
            IssuePatch::Description(description) => record.description = description,
            IssuePatch::ActionNeeded(action) => record.action_needed = action,
            IssuePatch::EstimatedCost(cost) => record.estimated_cost = cost,
        }

        session.set_value(self.field.clone(), FieldValue::Issues(records));
        Ok(())
    }

    /// Deletes the record at `index`, returning it. Later records shift
    /// down; insertion order of the remainder is preserved.
    pub fn remove(
        &self,
        session: &mut FormSession,
        index: usize,
    ) -> Result<IssueRecord, IssueError> {
        let mut records = self.take_records(session);
        let len = records.len();
        if index >= len {
            session.set_value(self.field.clone(), FieldValue::Issues(records));
            return Err(IssueError::OutOfRange { index, len });
        }
        let removed = records.remove(index);
        session.set_value(self.field.clone(), FieldValue::Issues(records));
        Ok(removed)
    }

    /// Uploads a batch of photos for one record, sequentially, preserving
    /// input order in the record's photo list.
    pub async fn attach_photos<U: AssetUpload>(
        &self,
        session: &mut FormSession,
        index: usize,
        uploader: &U,
        files: Vec<FilePayload>,
    ) -> Result<(), IssueError> {
        let len = self.records(session).len();
        if index >= len {
            return Err(IssueError::OutOfRange { index, len });
        }

        for file in files {
            let receipt = match uploader.upload(&file).await {
                Ok(receipt) => receipt,
                Err(e) => {
                    // Field-scoped upload failure: keep what already landed,
                    // surface the rest as a user-retryable error.
                    return Err(IssueError::PhotoUpload(UploadError {
                        field: self.field.clone(),
                        message: e.to_string(),
                    }));
                }
            };
            let asset = session.record_asset(&self.field, receipt);

            let mut records = self.take_records(session);
            if let Some(record) = records.get_mut(index) {
                record.photos.push(asset.storage_key.clone());
            }
            session.set_value(self.field.clone(), FieldValue::Issues(records));
        }
        Ok(())
    }

    /// Current records, empty when the field is unset.
    pub fn records<'a>(&self, session: &'a FormSession) -> &'a [IssueRecord] {
        session
            .value(&self.field)
            .and_then(FieldValue::as_issues)
            .unwrap_or_default()
    }

    fn take_records(&self, session: &mut FormSession) -> Vec<IssueRecord> {
        match session.clear_value(&self.field) {
            Some(FieldValue::Issues(records)) => records,
            _ => Vec::new(),
        }
    }
}
