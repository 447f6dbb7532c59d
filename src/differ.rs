// Structural diff between two itinerary sets keyed by route identity
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::duration::format_duration;
use crate::itinerary::{Flight, RouteKey};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub added: Vec<Flight>,
    pub removed: Vec<Flight>,
    pub modified: Vec<RouteChange>,
}

impl ComparisonResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteChange {
    pub route: RouteKey,
    pub changes: FieldChanges,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Change<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Change<String>>,
}

impl FieldChanges {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.duration.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change<T> {
    pub old: T,
    pub new: T,
}

// Route key -> flight, remembering the order keys were first seen in
struct RouteIndex<'a> {
    positions: HashMap<RouteKey, usize>,
    entries: Vec<(RouteKey, &'a Flight)>,
}

impl<'a> RouteIndex<'a> {
    fn build(flights: &'a [Flight], label: &str) -> Self {
        let mut index = RouteIndex {
            positions: HashMap::with_capacity(flights.len()),
            entries: Vec::with_capacity(flights.len()),
        };
        for flight in flights {
            let key = flight.route_key();
            match index.positions.get(&key) {
                Some(&position) => {
                    warn!(set = label, route = %key, "duplicate route, keeping the later itinerary");
                    index.entries[position].1 = flight;
                }
                None => {
                    index.positions.insert(key.clone(), index.entries.len());
                    index.entries.push((key, flight));
                }
            }
        }
        index
    }

    fn get(&self, key: &RouteKey) -> Option<&'a Flight> {
        self.positions.get(key).map(|&position| self.entries[position].1)
    }

    fn contains(&self, key: &RouteKey) -> bool {
        self.positions.contains_key(key)
    }
}

/// Compares two itinerary sets.
///
/// `added` and `modified` follow the order in which routes first appear in
/// `flights2`; `removed` follows `flights1`. When one set holds the same route
/// more than once, the later itinerary is the one compared.
pub fn compare(flights1: &[Flight], flights2: &[Flight]) -> ComparisonResult {
    let before = RouteIndex::build(flights1, "file1");
    let after = RouteIndex::build(flights2, "file2");
    let mut result = ComparisonResult::default();

    for (key, new_flight) in &after.entries {
        match before.get(key) {
            None => result.added.push((*new_flight).clone()),
            Some(old_flight) => {
                let changes = field_changes(old_flight, new_flight);
                if !changes.is_empty() {
                    result.modified.push(RouteChange {
                        route: key.clone(),
                        changes,
                    });
                }
            }
        }
    }

    result.removed = before
        .entries
        .iter()
        .filter(|(key, _)| !after.contains(key))
        .map(|(_, flight)| (*flight).clone())
        .collect();

    debug!(
        added = result.added.len(),
        removed = result.removed.len(),
        modified = result.modified.len(),
        "compared itinerary sets"
    );
    result
}

fn field_changes(old: &Flight, new: &Flight) -> FieldChanges {
    let mut changes = FieldChanges::default();

    if old.total_price != new.total_price {
        changes.price = Some(Change {
            old: old.total_price,
            new: new.total_price,
        });
    }

    let old_seconds = old.total_duration_seconds();
    let new_seconds = new.total_duration_seconds();
    if old_seconds != new_seconds {
        changes.duration = Some(Change {
            old: format_duration(old_seconds),
            new: format_duration(new_seconds),
        });
    }

    changes
}
