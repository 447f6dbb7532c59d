// Extremal flights within a (usually route-filtered) list
//
// Both scans keep the first flight seen on ties, for the minimum and the maximum.
// Flights without a total price take no part in the price ranking.
use std::cmp::Ordering;

use crate::itinerary::Flight;

pub fn cheapest_and_most_expensive(flights: &[Flight]) -> (Option<Flight>, Option<Flight>) {
    let priced = flights
        .iter()
        .filter_map(|f| f.total_price.map(|price| (price, f)));
    let (cheapest, expensive) = min_max_by(priced, f64::total_cmp);
    (cheapest.cloned(), expensive.cloned())
}

pub fn fastest_and_longest(flights: &[Flight]) -> (Option<Flight>, Option<Flight>) {
    let timed = flights.iter().map(|f| (f.total_duration_seconds(), f));
    let (fastest, longest) = min_max_by(timed, i64::cmp);
    (fastest.cloned(), longest.cloned())
}

// Single pass; only a strictly smaller/larger key replaces the current pick
fn min_max_by<'a, K, I, F>(items: I, compare: F) -> (Option<&'a Flight>, Option<&'a Flight>)
where
    K: Copy,
    I: Iterator<Item = (K, &'a Flight)>,
    F: Fn(&K, &K) -> Ordering,
{
    let mut min: Option<(K, &'a Flight)> = None;
    let mut max: Option<(K, &'a Flight)> = None;

    for (key, flight) in items {
        if min.map_or(true, |(current, _)| compare(&key, &current) == Ordering::Less) {
            min = Some((key, flight));
        }
        if max.map_or(true, |(current, _)| compare(&key, &current) == Ordering::Greater) {
            max = Some((key, flight));
        }
    }

    (min.map(|(_, f)| f), max.map(|(_, f)| f))
}
