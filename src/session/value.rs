use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value types held by a form session.
///
/// Asset-backed fields store the permanent storage key only; preview URLs
/// live in the [`AssetLedger`](super::assets::AssetLedger) and never enter
/// the value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    AssetKey(String),
    AssetKeys(Vec<String>),
    Issues(Vec<IssueRecord>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::AssetKey(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_issues(&self) -> Option<&[IssueRecord]> {
        match self {
            FieldValue::Issues(records) => Some(records.as_slice()),
            _ => None,
        }
    }

    /// Whether the value counts as absent for the required-field check.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::AssetKey(s) => s.is_empty(),
            FieldValue::Number(n) => n.is_nan(),
            FieldValue::Bool(_) => false,
            FieldValue::AssetKeys(keys) => keys.is_empty(),
            FieldValue::Issues(records) => records.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::AssetKey(s) => write!(f, "{}", s),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::AssetKeys(keys) => write!(f, "[{} file(s)]", keys.len()),
            FieldValue::Issues(records) => write!(f, "[{} issue(s)]", records.len()),
        }
    }
}

/// One entry of the repeatable inspection-issue list.
///
/// `photos` holds storage keys only; the full asset records (with preview
/// URLs) are tracked in the session's asset ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub action_needed: String,
    pub estimated_cost: f64,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// How a programmatic writer treats a value the user may already have set.
///
/// Both enrichment and extraction currently run with [`Always`]: the last
/// lookup wins, including over manual edits in the same session. Flip the
/// constant at the call site to change that product decision in one place.
///
/// [`Always`]: OverwritePolicy::Always
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Always,
    PreserveExisting,
}

/// The mutable `fieldName -> value` mapping at the heart of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValueMap {
    entries: AHashMap<String, FieldValue>,
}

impl FieldValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.entries.insert(field.into(), value);
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.entries.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.entries.iter()
    }
}
