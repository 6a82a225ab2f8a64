//! The search/manual/selected state machine for inventory-backed fields.
//!
//! A selection group governs one "pick an existing stock item or type it
//! yourself" area of the form. The group's dependent sub-fields (make,
//! model) are only visible in `MANUAL`; while hidden their required-ness is
//! waived by the session's state-aware validation.

pub mod search;

pub use search::{SearchCoordinator, SearchResponse};

use crate::services::InventoryCandidate;
use crate::session::{FieldValue, FormSession};
use std::fmt;
use tracing::debug;

/// Mode of one governed field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Live query against inventory; nothing populated yet.
    #[default]
    Searching,
    /// The user typed the vehicle in by hand.
    Manual,
    /// A search candidate was picked and its record populates the group.
    Selected,
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionState::Searching => "SEARCHING",
            SelectionState::Manual => "MANUAL",
            SelectionState::Selected => "SELECTED",
        };
        write!(f, "{}", name)
    }
}

/// User-driven transition events.
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    PickCandidate(InventoryCandidate),
    ChooseManual,
    ChangeSelection,
    SearchInstead,
}

/// Attributes of an [`InventoryCandidate`] that can be bound to form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAttr {
    Registration,
    Make,
    Model,
    Derivative,
    Mileage,
    LinkedDealId,
}

/// Binds one candidate attribute to one field name.
#[derive(Debug, Clone)]
pub struct CandidateBinding {
    pub attr: CandidateAttr,
    pub field: String,
}

/// Static configuration of one governed field group.
#[derive(Debug, Clone)]
pub struct SelectionGroup {
    /// Key identifying the group in the session's hidden-field registry.
    pub key: String,
    /// Field that receives the picked candidate's id.
    pub id_field: String,
    /// Dependent sub-fields, visible (and required) only in `MANUAL`.
    pub manual_fields: Vec<String>,
    /// Candidate attributes copied into fields on `SELECTED`.
    pub bindings: Vec<CandidateBinding>,
}

/// Drives one selection group's transitions and keeps the session's values
/// and hidden set in step with the current state.
pub struct SelectionController {
    group: SelectionGroup,
    state: SelectionState,
}

impl SelectionController {
    /// Starts in `SEARCHING` with the group's manual sub-fields hidden.
    pub fn new(group: SelectionGroup, session: &mut FormSession) -> Self {
        session.set_hidden(group.key.clone(), group.manual_fields.clone());
        Self {
            group,
            state: SelectionState::Searching,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn group(&self) -> &SelectionGroup {
        &self.group
    }

    /// Applies one event. Events that are undefined for the current state
    /// (e.g. picking a candidate while in `MANUAL`) are ignored.
    pub fn handle(&mut self, event: SelectionEvent, session: &mut FormSession) -> SelectionState {
        match (self.state, event) {
            (SelectionState::Searching, SelectionEvent::PickCandidate(candidate)) => {
                self.populate(&candidate, session);
                self.transition(SelectionState::Selected, session);
            }
            (SelectionState::Searching, SelectionEvent::ChooseManual) => {
                self.transition(SelectionState::Manual, session);
            }
            (SelectionState::Selected, SelectionEvent::ChangeSelection)
            | (SelectionState::Manual, SelectionEvent::SearchInstead) => {
                self.clear_group(session);
                self.transition(SelectionState::Searching, session);
            }
            (state, event) => {
                debug!(group = %self.group.key, %state, ?event, "ignoring undefined transition");
            }
        }
        self.state
    }

    fn transition(&mut self, next: SelectionState, session: &mut FormSession) {
        self.state = next;
        let hidden = match next {
            // Sub-fields are typed in only while MANUAL; otherwise the
            // search box (or the picked record) stands in for them.
            SelectionState::Manual => Vec::new(),
            SelectionState::Searching | SelectionState::Selected => {
                self.group.manual_fields.clone()
            }
        };
        session.set_hidden(self.group.key.clone(), hidden);
    }

    /// Copies the candidate record into every bound field, including
    /// cross-references like a linked deal id.
    fn populate(&self, candidate: &InventoryCandidate, session: &mut FormSession) {
        session.set_value(
            self.group.id_field.clone(),
            FieldValue::Text(candidate.id.clone()),
        );
        for binding in &self.group.bindings {
            let value = match binding.attr {
                CandidateAttr::Registration => {
                    candidate.registration.as_deref().map(FieldValue::text)
                }
                CandidateAttr::Make => candidate.make.as_deref().map(FieldValue::text),
                CandidateAttr::Model => candidate.model.as_deref().map(FieldValue::text),
                CandidateAttr::Derivative => {
                    candidate.derivative.as_deref().map(FieldValue::text)
                }
                CandidateAttr::Mileage => {
                    candidate.mileage.map(|m| FieldValue::Number(f64::from(m)))
                }
                CandidateAttr::LinkedDealId => {
                    candidate.linked_deal_id.as_deref().map(FieldValue::text)
                }
            };
            if let Some(value) = value {
                session.set_value(binding.field.clone(), value);
            }
        }
    }

    /// Clears everything the group may have written, whether it was
    /// populated from a candidate or typed manually.
    fn clear_group(&self, session: &mut FormSession) {
        session.clear_value(&self.group.id_field);
        for binding in &self.group.bindings {
            session.clear_value(&binding.field);
        }
        for field in &self.group.manual_fields {
            session.clear_value(field);
        }
    }
}
