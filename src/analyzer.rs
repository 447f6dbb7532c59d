// Route analysis over a pair of search responses
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::aggregator::{cheapest_and_most_expensive, fastest_and_longest};
use crate::differ::{compare, ComparisonResult};
use crate::itinerary::{Flight, RouteQuery};
use crate::parser::{ItineraryParser, ParseError};
use crate::route_filter::filter_by_query;
use crate::sources::{load_pair, ItinerarySource, SourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSlot {
    File1,
    File2,
}

impl std::fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSlot::File1 => f.write_str("file1"),
            DocumentSlot::File2 => f.write_str("file2"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: DocumentSlot,
        #[source]
        source: ParseError,
    },
}

// The same question answered for both documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paired<T> {
    pub file1: T,
    pub file2: T,
}

impl<T> Paired<T> {
    fn map<U>(&self, f: impl Fn(&T) -> U) -> Paired<U> {
        Paired {
            file1: f(&self.file1),
            file2: f(&self.file2),
        }
    }
}

/// Both itinerary sets narrowed to one route, ready for aggregation and
/// comparison.
#[derive(Debug, Clone)]
pub struct RouteAnalyzer {
    query: RouteQuery,
    flights: Paired<Vec<Flight>>,
}

impl RouteAnalyzer {
    pub fn new(query: RouteQuery, file1: Vec<Flight>, file2: Vec<Flight>) -> Self {
        let flights = Paired {
            file1: filter_by_query(&file1, &query),
            file2: filter_by_query(&file2, &query),
        };
        Self { query, flights }
    }

    pub fn from_documents(
        parser: &ItineraryParser,
        document1: &[u8],
        document2: &[u8],
        query: &RouteQuery,
    ) -> Result<Self, AnalysisError> {
        let file1 = parser
            .parse(document1)
            .map_err(|source| AnalysisError::Parse {
                file: DocumentSlot::File1,
                source,
            })?;
        let file2 = parser
            .parse(document2)
            .map_err(|source| AnalysisError::Parse {
                file: DocumentSlot::File2,
                source,
            })?;

        let analyzer = Self::new(query.clone(), file1, file2);
        info!(
            origin = %query.origin,
            destination = %query.destination,
            file1 = analyzer.flights.file1.len(),
            file2 = analyzer.flights.file2.len(),
            "filtered itineraries by route"
        );
        Ok(analyzer)
    }

    pub async fn load(
        parser: &ItineraryParser,
        source1: &dyn ItinerarySource,
        source2: &dyn ItinerarySource,
        query: &RouteQuery,
    ) -> Result<Self, AnalysisError> {
        debug!(
            file1 = %source1.describe(),
            file2 = %source2.describe(),
            "loading search responses"
        );
        let (document1, document2) = load_pair(source1, source2).await?;
        Self::from_documents(parser, &document1, &document2, query)
    }

    pub fn query(&self) -> &RouteQuery {
        &self.query
    }

    pub fn filtered(&self) -> Paired<Vec<Flight>> {
        self.flights.clone()
    }

    pub fn cheapest(&self) -> Paired<Option<Flight>> {
        self.flights.map(|f| cheapest_and_most_expensive(f).0)
    }

    pub fn most_expensive(&self) -> Paired<Option<Flight>> {
        self.flights.map(|f| cheapest_and_most_expensive(f).1)
    }

    pub fn fastest(&self) -> Paired<Option<Flight>> {
        self.flights.map(|f| fastest_and_longest(f).0)
    }

    pub fn longest(&self) -> Paired<Option<Flight>> {
        self.flights.map(|f| fastest_and_longest(f).1)
    }

    pub fn compare(&self) -> ComparisonResult {
        compare(&self.flights.file1, &self.flights.file2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SMALL_SAMPLE_XML;
    use crate::sources::{BytesSource, FileSource};

    const FILE1: &str = "samples/RS_ViaOW.xml";
    const FILE2: &str = "samples/RS_Via-3.xml";

    fn leg(number: &str, from: &str, to: &str, departure: &str, arrival: &str) -> String {
        format!(
            "<Flight><Carrier id=\"EK\">Emirates</Carrier><FlightNumber>{number}</FlightNumber>\
             <Source>{from}</Source><Destination>{to}</Destination>\
             <DepartureTimeStamp>{departure}</DepartureTimeStamp>\
             <ArrivalTimeStamp>{arrival}</ArrivalTimeStamp></Flight>"
        )
    }

    fn document(itineraries: &[(String, &str)]) -> Vec<u8> {
        let body: String = itineraries
            .iter()
            .map(|(legs, price)| {
                format!(
                    "<Flights><OnwardPricedItinerary><Flights>{legs}</Flights></OnwardPricedItinerary>\
                     <Pricing currency=\"SGD\"><ServiceCharges type=\"SingleAdult\" ChargeType=\"TotalAmount\">{price}</ServiceCharges></Pricing></Flights>"
                )
            })
            .collect();
        format!("<AirFareSearchResponse><PricedItineraries>{body}</PricedItineraries></AirFareSearchResponse>")
            .into_bytes()
    }

    fn analyzer() -> RouteAnalyzer {
        let first = document(&[
            (leg("384", "DXB", "BKK", "2018-10-27T0950", "2018-10-27T1900"), "400.00"),
            (leg("372", "DXB", "BKK", "2018-10-27T0305", "2018-10-27T1230"), "350.00"),
            (leg("500", "DXB", "DEL", "2018-10-27T0305", "2018-10-27T0800"), "10.00"),
        ]);
        let second = document(&[
            (leg("384", "DXB", "BKK", "2018-10-27T0950", "2018-10-27T1900"), "420.00"),
            (leg("388", "DXB", "BKK", "2018-10-27T2230", "2018-10-28T0750"), "300.00"),
        ]);
        RouteAnalyzer::from_documents(
            &ItineraryParser::new(),
            &first,
            &second,
            &RouteQuery::new("DXB", "BKK"),
        )
        .unwrap()
    }

    fn number(flight: &Option<Flight>) -> &str {
        flight.as_ref().unwrap().segments[0].flight_number.as_str()
    }

    #[test]
    fn test_filtered_uses_the_query_route() {
        let filtered = analyzer().filtered();
        assert_eq!(filtered.file1.len(), 2);
        assert_eq!(filtered.file2.len(), 2);
    }

    #[test]
    fn test_extremes_per_file() {
        let analyzer = analyzer();

        let cheapest = analyzer.cheapest();
        assert_eq!(number(&cheapest.file1), "372");
        assert_eq!(number(&cheapest.file2), "388");

        let expensive = analyzer.most_expensive();
        assert_eq!(number(&expensive.file1), "384");
        assert_eq!(number(&expensive.file2), "384");

        // 384: 9h10m, 372: 9h25m, 388: 9h20m
        let fastest = analyzer.fastest();
        assert_eq!(number(&fastest.file1), "384");
        assert_eq!(number(&fastest.file2), "384");

        let longest = analyzer.longest();
        assert_eq!(number(&longest.file1), "372");
        assert_eq!(number(&longest.file2), "388");
    }

    #[test]
    fn test_compare_files() {
        let result = analyzer().compare();
        assert_eq!(result.added.len(), 1);
        assert_eq!(result.added[0].segments[0].flight_number, "388");
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].segments[0].flight_number, "372");
        assert_eq!(result.modified.len(), 1);
        assert!(result.modified[0].changes.duration.is_none());
    }

    #[test]
    fn test_no_matching_route_gives_empty_results() {
        let doc = SMALL_SAMPLE_XML.as_bytes();
        let analyzer = RouteAnalyzer::from_documents(
            &ItineraryParser::new(),
            doc,
            doc,
            &RouteQuery::new("LHR", "JFK"),
        )
        .unwrap();
        assert!(analyzer.filtered().file1.is_empty());
        assert_eq!(analyzer.cheapest(), Paired { file1: None, file2: None });
        assert_eq!(analyzer.longest(), Paired { file1: None, file2: None });
        assert!(analyzer.compare().is_empty());
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let result = RouteAnalyzer::from_documents(
            &ItineraryParser::new(),
            SMALL_SAMPLE_XML.as_bytes(),
            b"<AirFareSearchResponse><PricedItineraries></Flights>",
            &RouteQuery::new("DXB", "BKK"),
        );
        match result {
            Err(AnalysisError::Parse { file, .. }) => assert_eq!(file, DocumentSlot::File2),
            other => panic!("Expected parse error, got {:?}", other.map(|a| a.filtered())),
        }
    }

    #[tokio::test]
    async fn test_load_sample_files() {
        let analyzer = RouteAnalyzer::load(
            &ItineraryParser::new(),
            &FileSource::new(FILE1),
            &FileSource::new(FILE2),
            &RouteQuery::new("DXB", "BKK"),
        )
        .await
        .unwrap();

        let filtered = analyzer.filtered();
        assert_eq!(filtered.file1.len(), 3);
        assert_eq!(filtered.file2.len(), 3);

        let cheapest = analyzer.cheapest();
        assert_eq!(cheapest.file1.as_ref().unwrap().total_price, Some(546.8));

        let result = analyzer.compare();
        assert_eq!(result.added.len(), 1);
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.modified.len(), 1);
        let changes = &result.modified[0].changes;
        assert!(changes.price.is_some());
        assert!(changes.duration.is_some());
    }

    #[tokio::test]
    async fn test_load_with_missing_source() {
        let result = RouteAnalyzer::load(
            &ItineraryParser::new(),
            &FileSource::new("samples/missing.xml"),
            &BytesSource::new("inline", SMALL_SAMPLE_XML),
            &RouteQuery::new("DXB", "BKK"),
        )
        .await;
        assert!(matches!(
            result,
            Err(AnalysisError::Source(SourceError::Missing { .. }))
        ));
    }
}
