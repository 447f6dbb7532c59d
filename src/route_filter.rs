use crate::itinerary::{Flight, RouteQuery};

// Keep flights whose whole itinerary runs from `origin` to `destination`.
// Comparison is exact and case-sensitive; input order is preserved.
pub fn filter_by_route(flights: &[Flight], origin: &str, destination: &str) -> Vec<Flight> {
    flights
        .iter()
        .filter(|f| f.origin() == Some(origin) && f.final_destination() == Some(destination))
        .cloned()
        .collect()
}

pub fn filter_by_query(flights: &[Flight], query: &RouteQuery) -> Vec<Flight> {
    filter_by_route(flights, &query.origin, &query.destination)
}
