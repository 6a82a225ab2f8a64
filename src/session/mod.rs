pub mod assets;
pub mod value;

pub use assets::*;
pub use value::*;

use crate::registry::{self, FieldIssue, RenderControl};
use crate::schema::{FieldDefinition, FormDefinition};
use crate::services::UploadReceipt;
use ahash::AHashMap;

/// One field of the render plan: the definition, its resolved control and the
/// current value, in schema order.
#[derive(Debug)]
pub struct RenderedField<'a> {
    pub field: &'a FieldDefinition,
    pub control: RenderControl<'a>,
    pub value: Option<&'a FieldValue>,
}

/// The single owner of all mutable state for one form-fill session.
///
/// Every component (user input, enrichment, extraction, selection) reads and
/// writes through this object; it is discarded on submit or navigation away.
/// There is exactly one writer, so no interior locking is needed.
pub struct FormSession {
    form: FormDefinition,
    values: FieldValueMap,
    assets: AssetLedger,
    /// Fields currently hidden by a selection group, keyed by group.
    hidden: AHashMap<String, Vec<String>>,
}

impl FormSession {
    pub fn new(form: FormDefinition) -> Self {
        Self {
            form,
            values: FieldValueMap::new(),
            assets: AssetLedger::new(),
            hidden: AHashMap::new(),
        }
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn values(&self) -> &FieldValueMap {
        &self.values
    }

    pub fn assets(&self) -> &AssetLedger {
        &self.assets
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Writes a value. Keys are not restricted to schema fields: selection
    /// groups use reserved keys (e.g. a linked deal id) that may not be
    /// rendered controls.
    pub fn set_value(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.set(field, value);
    }

    /// Removes a value, returning the previous one if it existed.
    pub fn clear_value(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// Restores a field to a snapshotted state: `Some` writes the value back,
    /// `None` removes the key entirely.
    pub fn restore_value(&mut self, field: &str, previous: Option<FieldValue>) {
        match previous {
            Some(value) => self.values.set(field.to_string(), value),
            None => {
                self.values.remove(field);
            }
        }
    }

    /// Records an uploaded asset against a field and writes its storage key
    /// (never the preview URL) into the value map.
    pub fn attach_asset(
        &mut self,
        field: &str,
        receipt: UploadReceipt,
        policy: AssetPolicy,
    ) -> UploadedAsset {
        let asset = UploadedAsset::from_receipt(field, receipt);
        match policy {
            AssetPolicy::Replace => {
                self.values.set(
                    field.to_string(),
                    FieldValue::AssetKey(asset.storage_key.clone()),
                );
                self.assets.record_replacing(asset.clone());
            }
            AssetPolicy::Append => {
                let mut keys = match self.values.remove(field) {
                    Some(FieldValue::AssetKeys(keys)) => keys,
                    Some(FieldValue::AssetKey(key)) => vec![key],
                    _ => Vec::new(),
                };
                keys.push(asset.storage_key.clone());
                self.values
                    .set(field.to_string(), FieldValue::AssetKeys(keys));
                self.assets.record_appending(asset.clone());
            }
        }
        asset
    }

    /// Records an asset in the ledger without writing a value-map entry.
    /// Used for photos nested inside repeatable records, whose storage keys
    /// live in the record itself.
    pub fn record_asset(&mut self, field: &str, receipt: UploadReceipt) -> UploadedAsset {
        let asset = UploadedAsset::from_receipt(field, receipt);
        self.assets.record_appending(asset.clone());
        asset
    }

    /// Drops every asset recorded for a field along with its value-map entry.
    pub fn detach_assets(&mut self, field: &str) -> Vec<UploadedAsset> {
        self.values.remove(field);
        self.assets.remove_field(field)
    }

    /// Marks the given fields hidden on behalf of a selection group,
    /// replacing the group's previous hidden set.
    pub fn set_hidden(&mut self, group: impl Into<String>, fields: Vec<String>) {
        let group = group.into();
        if fields.is_empty() {
            self.hidden.remove(&group);
        } else {
            self.hidden.insert(group, fields);
        }
    }

    /// Whether any selection group currently hides this field.
    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden
            .values()
            .any(|fields| fields.iter().any(|f| f == field))
    }

    /// Runs the state-aware required-field check over the whole form.
    ///
    /// Display-only fields are never checked; hidden fields are skipped while
    /// hidden and re-included the moment they become visible again.
    pub fn field_issues(&self) -> Vec<FieldIssue> {
        self.form
            .fields
            .iter()
            .filter(|f| !f.field_type.is_display_only())
            .filter(|f| !self.is_hidden(&f.field_name))
            .filter_map(|f| {
                registry::validate_field(
                    f,
                    self.values.get(&f.field_name),
                    self.assets.has_asset(&f.field_name),
                )
            })
            .collect()
    }

    /// True when no required field blocks submission.
    pub fn is_complete(&self) -> bool {
        self.field_issues().is_empty()
    }

    /// Produces the ordered list of controls to render: schema order, with
    /// selection-hidden fields omitted. Display-only fields are included
    /// (they render, they just carry no value).
    pub fn render_plan(&self) -> Vec<RenderedField<'_>> {
        self.form
            .fields
            .iter()
            .filter(|f| !self.is_hidden(&f.field_name))
            .map(|f| RenderedField {
                field: f,
                control: registry::control_for(f),
                value: self.values.get(&f.field_name),
            })
            .collect()
    }
}
