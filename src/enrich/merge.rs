use crate::services::{HistoryRecord, RegistryRecord};
use crate::session::FieldValue;

/// The flat result of merging both lookup sources for one vehicle.
///
/// Ephemeral: only the derived field updates are ever written into a session,
/// the record itself is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFacts {
    pub make: Option<String>,
    pub model: Option<String>,
    pub colour: Option<String>,
    pub fuel_type: Option<String>,
    pub year: Option<u16>,
    pub first_used: Option<String>,
}

impl VehicleFacts {
    /// The canonical form-field name each attribute maps onto.
    pub fn field_updates(&self) -> Vec<(&'static str, FieldValue)> {
        let mut updates = Vec::new();
        if let Some(make) = &self.make {
            updates.push(("make", FieldValue::Text(make.clone())));
        }
        if let Some(model) = &self.model {
            updates.push(("model", FieldValue::Text(model.clone())));
        }
        if let Some(colour) = &self.colour {
            updates.push(("colour", FieldValue::Text(colour.clone())));
        }
        if let Some(fuel) = &self.fuel_type {
            updates.push(("fuelType", FieldValue::Text(fuel.clone())));
        }
        if let Some(year) = self.year {
            updates.push(("yearOfManufacture", FieldValue::Number(f64::from(year))));
        }
        if let Some(first_used) = &self.first_used {
            updates.push(("firstRegistered", FieldValue::Text(first_used.clone())));
        }
        updates
    }
}

/// Merges the two source records under the documented per-attribute
/// precedence:
///
/// - `model` and first-used date: the inspection-history source wins when it
///   has a value;
/// - every other overlapping attribute (make, colour, fuel type, year): the
///   registration source wins when it has a value;
/// - either source fills a gap the other leaves (fallback, not override).
///
/// Returns `None` when neither source produced a record.
pub fn merge_sources(
    registry: Option<RegistryRecord>,
    history: Option<HistoryRecord>,
) -> Option<VehicleFacts> {
    if registry.is_none() && history.is_none() {
        return None;
    }
    let registry = registry.unwrap_or_default();
    let history = history.unwrap_or_default();

    Some(VehicleFacts {
        make: registry.make.or(history.make),
        model: history.model.or(registry.model),
        colour: registry.colour.or(history.colour),
        fuel_type: registry.fuel_type.or(history.fuel_type),
        year: registry.year_of_manufacture.or(history.manufacture_year),
        first_used: history.first_used_date.or(registry.first_registered),
    })
}
