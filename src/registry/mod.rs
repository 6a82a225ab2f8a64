//! Field-type dispatch: every schema tag resolves to a render control and a
//! validator. Dispatch is total over [`FieldType`]; unknown tags fall back to
//! a plain text control and never fail.

use crate::schema::{FieldDefinition, FieldType};
use crate::session::FieldValue;
use std::fmt;

/// Kinds of temporal input, sharing one control shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Date,
    DateTime,
    Time,
}

/// Presentation of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    Dropdown,
    Radio,
}

/// What the host should render for a field. Pure data; the engine owns the
/// decision, the host owns the pixels.
#[derive(Debug, PartialEq)]
pub enum RenderControl<'a> {
    TextInput { multiline: bool },
    NumberInput,
    DateInput(DateKind),
    ChoiceSelect { choices: &'a [String], style: ChoiceStyle },
    Toggle,
    StarRating { max: u8 },
    FileUpload,
    SignaturePad,
    StaticHeading { text: &'a str },
    StaticParagraph { text: &'a str },
    DocumentCapture,
    IssueList,
}

/// A per-field validation failure, suitable for rendering next to the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Resolves the render control for a field definition. Total over the tag
/// set: an unrecognized tag gets a plain text input.
pub fn control_for(field: &FieldDefinition) -> RenderControl<'_> {
    match field.field_type {
        FieldType::Text | FieldType::Unknown => RenderControl::TextInput { multiline: false },
        FieldType::Textarea => RenderControl::TextInput { multiline: true },
        FieldType::Number => RenderControl::NumberInput,
        FieldType::Date => RenderControl::DateInput(DateKind::Date),
        FieldType::Datetime => RenderControl::DateInput(DateKind::DateTime),
        FieldType::Time => RenderControl::DateInput(DateKind::Time),
        FieldType::Dropdown => RenderControl::ChoiceSelect {
            choices: &field.choices,
            style: ChoiceStyle::Dropdown,
        },
        FieldType::Radio => RenderControl::ChoiceSelect {
            choices: &field.choices,
            style: ChoiceStyle::Radio,
        },
        FieldType::Boolean => RenderControl::Toggle,
        FieldType::Rating => RenderControl::StarRating { max: 5 },
        FieldType::File => RenderControl::FileUpload,
        FieldType::Signature => RenderControl::SignaturePad,
        FieldType::SectionHeader => RenderControl::StaticHeading { text: &field.label },
        FieldType::Paragraph => RenderControl::StaticParagraph { text: &field.label },
        FieldType::LicenceScan => RenderControl::DocumentCapture,
        FieldType::PdiIssues => RenderControl::IssueList,
    }
}

/// Runs the required-field check for one field against its current value.
///
/// Returns `None` when the field does not block submission. Non-required
/// fields never block, whatever their value; display-only fields are the
/// caller's job to skip.
pub fn validate_field(
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    has_asset: bool,
) -> Option<FieldIssue> {
    if !field.required {
        return None;
    }

    let message = match field.field_type {
        FieldType::SectionHeader | FieldType::Paragraph => return None,
        // Absence of a toggle means false, which is a valid answer.
        FieldType::Boolean => return None,

        FieldType::Text | FieldType::Textarea | FieldType::Signature | FieldType::Unknown => {
            if !absent(value) {
                return None;
            }
            "This field is required"
        }
        FieldType::Date | FieldType::Datetime | FieldType::Time => {
            if !absent(value) {
                return None;
            }
            "A date/time is required"
        }
        FieldType::Number => match value.and_then(FieldValue::as_number) {
            Some(n) if !n.is_nan() => return None,
            _ => "A number is required",
        },
        FieldType::Rating => match value.and_then(FieldValue::as_number) {
            Some(n) if (1.0..=5.0).contains(&n) && n.fract() == 0.0 => return None,
            _ => "A rating from 1 to 5 is required",
        },
        FieldType::Dropdown | FieldType::Radio => match value.and_then(FieldValue::as_text) {
            Some(v) if field.choices.iter().any(|c| c == v) => return None,
            _ => "Choose one of the listed options",
        },
        FieldType::File | FieldType::LicenceScan => {
            if has_asset {
                return None;
            }
            "A file must finish uploading first"
        }
        FieldType::PdiIssues => {
            let records = value.and_then(FieldValue::as_issues).unwrap_or_default();
            if records.is_empty() {
                "At least one issue record is required"
            } else if records
                .iter()
                .any(|r| r.category.is_empty() || r.description.is_empty())
            {
                "Each issue needs a category and a description"
            } else {
                return None;
            }
        }
    };

    Some(FieldIssue {
        field: field.field_name.clone(),
        message: message.to_string(),
    })
}

fn absent(value: Option<&FieldValue>) -> bool {
    value.is_none_or(FieldValue::is_empty)
}
