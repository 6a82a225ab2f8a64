//! # Formflow - Schema-Driven Dynamic Form Engine
//!
//! **Formflow** is the form engine behind a dealership back office: it
//! interprets a dealer-authored field schema at fill time, merges vehicle
//! data from multiple unreliable lookup sources, drives an OCR auto-fill
//! pipeline from a photographed document, and assembles the final submission
//! payload with file attachments stored under opaque keys.
//!
//! ## Core Workflow
//!
//! The engine is headless: it owns all form state and decisions, the host
//! owns the pixels and the HTTP clients. The primary workflow is:
//!
//! 1.  **Load the schema**: Parse the stored form document with
//!     [`FormDefinition::from_json`] (or implement [`IntoForm`] for a custom
//!     source). Field order is preserved exactly.
//! 2.  **Open a session**: Create a [`FormSession`], the single owner of the
//!     field-value map and the uploaded-asset ledger for one fill.
//! 3.  **Wire the collaborators**: Implement the async traits in
//!     [`services`] over your HTTP stack and hand them to
//!     [`EnrichmentService`], [`CapturePipeline`], [`SearchCoordinator`] and
//!     [`Submitter`].
//! 4.  **Render and validate**: Ask the session for its
//!     [`render_plan`](session::FormSession::render_plan) and
//!     [`field_issues`](session::FormSession::field_issues); both are
//!     state-aware, so fields hidden by a selection group never block
//!     submission.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let schema = r#"{
//!         "id": "appraisal",
//!         "fields": [
//!             {"fieldName": "reg", "label": "Registration", "type": "TEXT", "required": true},
//!             {"fieldName": "make", "label": "Make", "type": "TEXT", "required": true},
//!             {"fieldName": "notes", "label": "Notes", "type": "TEXTAREA", "required": false}
//!         ]
//!     }"#;
//!
//!     let form = FormDefinition::from_json(schema)?;
//!     let mut session = FormSession::new(form);
//!
//!     session.set_value("reg", FieldValue::text("AB12 CDE"));
//!     session.set_value("make", FieldValue::text("Ford"));
//!
//!     // State-aware required check: empty `notes` never blocks.
//!     assert!(session.is_complete());
//!
//!     // The wire payload, with storage keys (never preview URLs).
//!     let payload = formflow::submit::assemble(&session);
//!     println!("submitting {} value(s)", payload.values.len());
//!     Ok(())
//! }
//! ```
//!
//! [`IntoForm`]: schema::IntoForm
//! [`FormDefinition::from_json`]: schema::FormDefinition::from_json
//! [`FormSession`]: session::FormSession
//! [`EnrichmentService`]: enrich::EnrichmentService
//! [`CapturePipeline`]: extract::CapturePipeline
//! [`SearchCoordinator`]: selection::SearchCoordinator
//! [`Submitter`]: submit::Submitter

pub mod enrich;
pub mod error;
pub mod extract;
pub mod issues;
pub mod prelude;
pub mod registry;
pub mod schema;
pub mod selection;
pub mod services;
pub mod session;
pub mod submit;
