// Normalized itinerary records produced by the parser
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::duration::{self, elapsed_seconds, format_duration};

// One direct leg of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub carrier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    pub flight_number: String,
    pub source: String,
    pub destination: String,
    #[serde(with = "duration::timestamp_format")]
    pub departure_time: NaiveDateTime,
    #[serde(with = "duration::timestamp_format")]
    pub arrival_time: NaiveDateTime,
    pub duration: String,
}

impl Segment {
    pub fn new(
        carrier: impl Into<String>,
        flight_number: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
    ) -> Self {
        let duration = format_duration(elapsed_seconds(&departure_time, &arrival_time));
        Self {
            carrier: carrier.into(),
            carrier_id: None,
            flight_number: flight_number.into(),
            source: source.into(),
            destination: destination.into(),
            departure_time,
            arrival_time,
            duration,
        }
    }

    pub fn with_carrier_id(mut self, carrier_id: impl Into<String>) -> Self {
        self.carrier_id = Some(carrier_id.into());
        self
    }

    pub fn elapsed_seconds(&self) -> i64 {
        elapsed_seconds(&self.departure_time, &self.arrival_time)
    }
}

/// A priced itinerary: one or more segments in travel order.
///
/// The parser never emits a flight without segments, so `origin` and
/// `final_destination` only return `None` for hand-built values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub segments: Vec<Segment>,
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Flight {
    pub fn new(segments: Vec<Segment>, total_price: Option<f64>) -> Self {
        Self {
            segments,
            total_price,
            currency: None,
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.segments.first().map(|s| s.source.as_str())
    }

    pub fn final_destination(&self) -> Option<&str> {
        self.segments.last().map(|s| s.destination.as_str())
    }

    /// Sum of raw per-segment seconds (not the rounded display strings).
    pub fn total_duration_seconds(&self) -> i64 {
        self.segments.iter().map(Segment::elapsed_seconds).sum()
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.total_duration_seconds())
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey::from(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegKey {
    pub carrier: String,
    pub flight_number: String,
}

/// Identity of a route across two itinerary sets: endpoints plus the ordered
/// carrier/flight-number pairs. Price and timing are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub source: String,
    pub destination: String,
    pub legs: Vec<LegKey>,
}

impl From<&Flight> for RouteKey {
    fn from(flight: &Flight) -> Self {
        RouteKey {
            source: flight.origin().unwrap_or_default().to_string(),
            destination: flight.final_destination().unwrap_or_default().to_string(),
            legs: flight
                .segments
                .iter()
                .map(|s| LegKey {
                    carrier: s.carrier.clone(),
                    flight_number: s.flight_number.clone(),
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.source, self.destination)?;
        for leg in &self.legs {
            write!(f, " {}{}", leg.carrier, leg.flight_number)?;
        }
        Ok(())
    }
}

// Origin and final destination a caller is interested in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
}

impl RouteQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_segment_duration_is_computed_on_construction() {
        let leg = segment("EK", "384", "DXB", "BKK", "2024-06-01T1000", "2024-06-01T1230");
        assert_eq!(leg.duration, "2h 30m");
        assert_eq!(leg.elapsed_seconds(), 9000);
    }

    #[test]
    fn test_total_duration_sums_raw_seconds() {
        let flight = Flight::new(
            vec![
                segment("AI", "996", "DXB", "DEL", "2024-06-01T0005", "2024-06-01T0445"),
                segment("AI", "332", "DEL", "BKK", "2024-06-01T1320", "2024-06-01T1910"),
            ],
            Some(546.8),
        );
        assert_eq!(flight.total_duration_seconds(), 4 * 3600 + 40 * 60 + 5 * 3600 + 50 * 60);
        assert_eq!(flight.formatted_duration(), "10h 30m");
        assert_eq!(flight.origin(), Some("DXB"));
        assert_eq!(flight.final_destination(), Some("BKK"));
    }

    #[test]
    fn test_route_key_ignores_price_and_times() {
        let a = direct("EK", "384", 390, Some(100.0));
        let b = direct("EK", "384", 420, Some(120.0));
        let c = direct("EK", "385", 390, Some(100.0));
        assert_eq!(a.route_key(), b.route_key());
        assert_ne!(a.route_key(), c.route_key());
        assert_eq!(a.route_key().to_string(), "DXB-BKK EK384");
    }

    #[test]
    fn test_segment_serializes_with_feed_timestamps() {
        let leg = direct("EK", "384", 150, Some(100.0)).segments[0]
            .clone()
            .with_carrier_id("EK");
        let json = serde_json::to_value(&leg).unwrap();
        assert_eq!(json["departure_time"], "2024-06-01T1000");
        assert_eq!(json["arrival_time"], "2024-06-01T1230");
        assert_eq!(json["flight_number"], "384");
        assert_eq!(json["carrier_id"], "EK");
        assert_eq!(json["duration"], "2h 30m");

        let back: Segment = serde_json::from_value(json).unwrap();
        assert_eq!(back, leg);
    }
}
