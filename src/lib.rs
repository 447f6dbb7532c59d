// Main library file for the flight itinerary analysis engine

pub mod aggregator;
pub mod analyzer;
pub mod differ;
pub mod duration;
pub mod itinerary;
pub mod parser;
pub mod route_filter;
pub mod sources;
pub mod xml_response;

// Re-export key types for convenience
pub use aggregator::{cheapest_and_most_expensive, fastest_and_longest};
pub use analyzer::{AnalysisError, DocumentSlot, Paired, RouteAnalyzer};
pub use differ::{compare, Change, ComparisonResult, FieldChanges, RouteChange};
pub use duration::{elapsed_seconds, format_duration, parse_timestamp};
pub use itinerary::{Flight, LegKey, RouteKey, RouteQuery, Segment};
pub use parser::{ItineraryParser, ParseError};
pub use route_filter::{filter_by_query, filter_by_route};
pub use sources::{load_pair, BytesSource, FileSource, ItinerarySource, SourceError};
