use super::definition::{FieldDefinition, FormDefinition};
use super::field_type::FieldType;
use crate::error::SchemaError;
use itertools::Itertools;
use serde::Deserialize;

/// A form document as persisted by the schema store (camelCase JSON).
#[derive(Debug, Deserialize)]
pub struct StoredForm {
    pub id: String,
    pub fields: Vec<StoredField>,
    #[serde(default)]
    #[serde(alias = "staticText")]
    pub static_text: Vec<String>,
}

/// One field entry inside a stored form document.
#[derive(Debug, Deserialize)]
pub struct StoredField {
    #[serde(alias = "fieldName")]
    pub field_name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    pub options: Option<StoredFieldOptions>,
    #[serde(alias = "extractionSourceKey")]
    pub extraction_source_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoredFieldOptions {
    #[serde(default)]
    pub choices: Vec<String>,
}

/// A trait for custom schema documents that can be converted into a canonical
/// [`FormDefinition`].
///
/// [`StoredForm`] implements this for the document-database format; hosts with
/// a different schema source implement it on their own structs.
pub trait IntoForm {
    /// Consumes the document and converts it into a canonical form definition.
    fn into_form(self) -> Result<FormDefinition, SchemaError>;
}

impl IntoForm for StoredForm {
    fn into_form(self) -> Result<FormDefinition, SchemaError> {
        if let Some(index) = self.fields.iter().position(|f| f.field_name.is_empty()) {
            return Err(SchemaError::EmptyFieldName { index });
        }

        if let Some(dup) = self
            .fields
            .iter()
            .map(|f| f.field_name.as_str())
            .duplicates()
            .next()
        {
            return Err(SchemaError::DuplicateFieldName(dup.to_string()));
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for stored in self.fields {
            let choices = stored.options.map(|o| o.choices).unwrap_or_default();
            if stored.field_type.is_choice() && choices.is_empty() {
                return Err(SchemaError::MissingChoices {
                    field: stored.field_name,
                });
            }
            fields.push(FieldDefinition {
                field_name: stored.field_name,
                label: stored.label,
                field_type: stored.field_type,
                required: stored.required,
                choices,
                extraction_source_key: stored.extraction_source_key,
            });
        }

        Ok(FormDefinition {
            id: self.id,
            fields,
            static_text: self.static_text,
        })
    }
}

impl FormDefinition {
    /// Parses and converts a stored schema document in one step.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let stored: StoredForm =
            serde_json::from_str(json).map_err(|e| SchemaError::JsonParse(e.to_string()))?;
        stored.into_form()
    }
}
