use crate::registry::FieldIssue;
use thiserror::Error;

/// Transport-level failure reported by an external collaborator.
///
/// Hosts implementing the service traits map their HTTP/SDK errors into this
/// single shape; the engine only ever inspects the message for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur when converting a stored schema document into a
/// [`FormDefinition`](crate::schema::FormDefinition).
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to parse form schema JSON: {0}")]
    JsonParse(String),

    #[error("Field at position {index} has an empty field name")]
    EmptyFieldName { index: usize },

    #[error("Field name '{0}' appears more than once in the schema")]
    DuplicateFieldName(String),

    #[error("Choice field '{field}' declares no choices")]
    MissingChoices { field: String },
}

/// Errors surfaced by the two-source vehicle lookup.
///
/// A single degraded source is not an error; only the total failure of both
/// sources reaches the caller.
#[derive(Error, Debug, Clone)]
pub enum LookupError {
    #[error("No vehicle record found for '{0}'")]
    NotFound(String),
}

/// Errors from the document capture and extraction pipeline.
#[derive(Error, Debug, Clone)]
pub enum CaptureError {
    #[error("Upload for field '{field}' failed: {message}")]
    UploadFailed { field: String, message: String },

    #[error("Document extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Field-scoped upload failure outside the capture pipeline.
#[derive(Error, Debug, Clone)]
#[error("Upload for field '{field}' failed: {message}")]
pub struct UploadError {
    pub field: String,
    pub message: String,
}

/// Errors from the repeatable sub-entry editor.
#[derive(Error, Debug, Clone)]
pub enum IssueError {
    #[error("Record index {index} is out of range (list has {len} record(s))")]
    OutOfRange { index: usize, len: usize },

    #[error("Field '{0}' does not hold a repeatable issue list")]
    NotRepeatable(String),

    #[error(transparent)]
    PhotoUpload(#[from] UploadError),
}

/// Errors raised when assembling or sending the final submission.
#[derive(Error, Debug, Clone)]
pub enum SubmitError {
    #[error("{} required field(s) missing or invalid", .0.len())]
    Validation(Vec<FieldIssue>),

    #[error("A submission is already in flight")]
    InFlight,

    #[error("Submission was rejected: {0}")]
    Rejected(String),
}
