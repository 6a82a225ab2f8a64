//! Two-source vehicle lookup and merge.
//!
//! Both external sources are queried concurrently and settle independently:
//! one source failing never cancels or fails the other. Only the loss of
//! both surfaces as an error.

pub mod merge;

pub use merge::{VehicleFacts, merge_sources};

use crate::error::LookupError;
use crate::services::{ContextualHints, InspectionHistoryLookup, VehicleRegistryLookup};
use crate::session::{FormSession, OverwritePolicy};
use tracing::{debug, warn};

/// Active write policy for enrichment results: the last lookup wins, even
/// over fields the user already edited this session. Open product question;
/// changing the answer is a one-line change here, not a refactor.
pub const ENRICHMENT_OVERWRITE: OverwritePolicy = OverwritePolicy::Always;

/// Outcome of a successful (possibly degraded) lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOutcome {
    pub facts: VehicleFacts,
    /// Contextual "known issues" suggestions; empty when the hints lookup
    /// failed or had nothing to say.
    pub hints: Vec<String>,
}

/// Uppercases the identifier and strips all whitespace, so `"ab12 cde"` and
/// `"AB12CDE"` hit the same cache/lookup key.
pub fn normalize_vrm(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Issues both source lookups for a registration number and merges whatever
/// survives.
pub struct EnrichmentService<R, H, C> {
    registry: R,
    history: H,
    hints: C,
}

impl<R, H, C> EnrichmentService<R, H, C>
where
    R: VehicleRegistryLookup,
    H: InspectionHistoryLookup,
    C: ContextualHints,
{
    pub fn new(registry: R, history: H, hints: C) -> Self {
        Self {
            registry,
            history,
            hints,
        }
    }

    /// Looks the identifier up in both sources concurrently and returns the
    /// merged facts.
    ///
    /// Errors only when neither source produced a record; a single degraded
    /// source is logged and absorbed. The follow-up hints lookup is entirely
    /// non-fatal.
    pub async fn lookup(&self, raw_vrm: &str) -> Result<EnrichmentOutcome, LookupError> {
        let vrm = normalize_vrm(raw_vrm);

        let (registry_result, history_result) =
            tokio::join!(self.registry.lookup(&vrm), self.history.lookup(&vrm));

        let registry_record = match registry_result {
            Ok(record) => record,
            Err(e) => {
                warn!(%vrm, error = %e, "registration source degraded, continuing with history only");
                None
            }
        };
        let history_record = match history_result {
            Ok(record) => record,
            Err(e) => {
                warn!(%vrm, error = %e, "inspection-history source degraded, continuing with registry only");
                None
            }
        };

        let facts = merge_sources(registry_record, history_record)
            .ok_or_else(|| LookupError::NotFound(vrm.clone()))?;

        let hints = self.fetch_hints(&facts).await;
        Ok(EnrichmentOutcome { facts, hints })
    }

    /// Separate, independent suggestion lookup keyed by the merged identity.
    /// Failure means an empty suggestion list, nothing more.
    async fn fetch_hints(&self, facts: &VehicleFacts) -> Vec<String> {
        let (Some(make), Some(model)) = (&facts.make, &facts.model) else {
            return Vec::new();
        };
        match self.hints.hints(make, model, facts.year).await {
            Ok(hints) => hints,
            Err(e) => {
                debug!(error = %e, "contextual hints unavailable, showing none");
                Vec::new()
            }
        }
    }
}

/// Writes each merged attribute into the session, but only where the form
/// actually declares the corresponding field. Returns the fields written.
pub fn apply_enrichment(facts: &VehicleFacts, session: &mut FormSession) -> Vec<String> {
    let mut written = Vec::new();
    for (field_name, value) in facts.field_updates() {
        if !session.form().has_field(field_name) {
            continue;
        }
        match ENRICHMENT_OVERWRITE {
            OverwritePolicy::Always => {
                session.set_value(field_name, value);
                written.push(field_name.to_string());
            }
            OverwritePolicy::PreserveExisting => {
                let occupied = session.value(field_name).is_some_and(|v| !v.is_empty());
                if !occupied {
                    session.set_value(field_name, value);
                    written.push(field_name.to_string());
                }
            }
        }
    }
    written
}
