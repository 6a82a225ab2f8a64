use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of control types a dealer can place on a form.
///
/// Stored schemas identify types by an upper-case tag (`"TEXT"`,
/// `"LICENCE_SCAN"`, ...). Tags introduced by a newer schema editor
/// deserialize as [`FieldType::Unknown`], which renders and validates as a
/// plain text input instead of failing the whole form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Datetime,
    Time,
    Dropdown,
    Radio,
    Boolean,
    Rating,
    File,
    Signature,
    SectionHeader,
    Paragraph,
    LicenceScan,
    PdiIssues,
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Display-only types carry no value, are skipped by validation and are
    /// excluded from the submission payload.
    pub fn is_display_only(self) -> bool {
        matches!(self, FieldType::SectionHeader | FieldType::Paragraph)
    }

    /// Types whose value must come from a declared choice list.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Radio)
    }

    /// Types whose value is the storage key of an uploaded asset.
    pub fn is_asset_backed(self) -> bool {
        matches!(self, FieldType::File | FieldType::LicenceScan)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FieldType::Text => "TEXT",
            FieldType::Textarea => "TEXTAREA",
            FieldType::Number => "NUMBER",
            FieldType::Date => "DATE",
            FieldType::Datetime => "DATETIME",
            FieldType::Time => "TIME",
            FieldType::Dropdown => "DROPDOWN",
            FieldType::Radio => "RADIO",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Rating => "RATING",
            FieldType::File => "FILE",
            FieldType::Signature => "SIGNATURE",
            FieldType::SectionHeader => "SECTION_HEADER",
            FieldType::Paragraph => "PARAGRAPH",
            FieldType::LicenceScan => "LICENCE_SCAN",
            FieldType::PdiIssues => "PDI_ISSUES",
            FieldType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", tag)
    }
}
