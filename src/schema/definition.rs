use super::field_type::FieldType;

/// The complete, canonical definition of one dealer-authored form, ready to
/// back a fill session. Immutable for the lifetime of a render session.
///
/// This is the target structure for the stored-format conversion in
/// [`stored`](super::stored); field order is significant and preserved from
/// the source document.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
    pub id: String,
    pub fields: Vec<FieldDefinition>,
    /// Dealer-facing blurbs carrying `{dealer.X}` placeholders.
    pub static_text: Vec<String>,
}

/// Defines a single field (a control or a display element) on the form.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Unique key into the session's value map.
    pub field_name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Populated for `DROPDOWN`/`RADIO`, empty otherwise.
    pub choices: Vec<String>,
    /// Links this field to a named slot in the OCR extraction result.
    pub extraction_source_key: Option<String>,
}

impl FormDefinition {
    /// Looks up a field definition by its unique name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Fields that participate in extraction auto-fill, i.e. carry an
    /// `extraction_source_key`.
    pub fn extraction_targets(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(|f| f.extraction_source_key.is_some())
    }
}
