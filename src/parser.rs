// Itinerary parsing: air-fare search response XML into normalized flights
use quick_xml::de::from_str;
use thiserror::Error;
use tracing::{debug, warn};

use crate::duration::parse_timestamp;
use crate::itinerary::{Flight, Segment};
use crate::xml_response::{XmlAirFareSearchResponse, XmlItinerary, XmlLeg, XmlPricing};

// Error types for itinerary parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Document is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Flight leg is missing required field: {0}")]
    MissingLegField(&'static str),

    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("Invalid charge amount: {value:?}")]
    InvalidAmount { value: String },
}

pub const SINGLE_ADULT: &str = "SingleAdult";
pub const TOTAL_AMOUNT: &str = "TotalAmount";

/// Turns raw search responses into [`Flight`]s.
///
/// Itineraries lacking an onward flight list or a pricing block are skipped;
/// anything structurally wrong with the document fails the whole parse.
#[derive(Debug, Clone)]
pub struct ItineraryParser {
    passenger_type: String,
    charge_type: String,
}

impl Default for ItineraryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryParser {
    // Create a parser pricing itineraries by the single-adult total
    pub fn new() -> Self {
        Self {
            passenger_type: SINGLE_ADULT.to_string(),
            charge_type: TOTAL_AMOUNT.to_string(),
        }
    }

    // Select a different service charge as the total price
    pub fn with_charge(
        passenger_type: impl Into<String>,
        charge_type: impl Into<String>,
    ) -> Self {
        Self {
            passenger_type: passenger_type.into(),
            charge_type: charge_type.into(),
        }
    }

    pub fn parse(&self, document: &[u8]) -> Result<Vec<Flight>, ParseError> {
        let xml =
            std::str::from_utf8(document).map_err(|e| ParseError::Encoding(e.to_string()))?;
        self.parse_str(xml)
    }

    pub fn parse_str(&self, xml: &str) -> Result<Vec<Flight>, ParseError> {
        let response: XmlAirFareSearchResponse =
            from_str(xml).map_err(|e| ParseError::Xml(e.to_string()))?;

        let itineraries = response.priced_itineraries.itineraries;
        let mut flights = Vec::with_capacity(itineraries.len());
        for (index, itinerary) in itineraries.iter().enumerate() {
            if let Some(flight) = self.convert_itinerary(index, itinerary)? {
                flights.push(flight);
            }
        }

        debug!(
            itineraries = itineraries.len(),
            flights = flights.len(),
            "parsed search response"
        );
        Ok(flights)
    }

    fn convert_itinerary(
        &self,
        index: usize,
        itinerary: &XmlItinerary,
    ) -> Result<Option<Flight>, ParseError> {
        let onward = itinerary
            .onward_priced_itinerary
            .iter()
            .find_map(|o| o.flights.as_ref());
        let (Some(onward), Some(pricing)) = (onward, itinerary.pricing.first()) else {
            debug!(index, "skipping itinerary without onward flights or pricing");
            return Ok(None);
        };

        let total_price = self.total_price(pricing)?;

        let segments = onward
            .legs
            .iter()
            .map(convert_leg)
            .collect::<Result<Vec<_>, _>>()?;
        if segments.is_empty() {
            warn!(index, "skipping itinerary with an empty onward flight list");
            return Ok(None);
        }

        Ok(Some(Flight {
            segments,
            total_price,
            currency: pricing.currency.clone().filter(|c| !c.is_empty()),
        }))
    }

    // First matching charge wins; no match leaves the price unset
    fn total_price(&self, pricing: &XmlPricing) -> Result<Option<f64>, ParseError> {
        pricing
            .service_charges
            .iter()
            .find(|c| c.passenger_type == self.passenger_type && c.charge_type == self.charge_type)
            .map(|c| parse_amount(&c.amount))
            .transpose()
    }
}

fn convert_leg(leg: &XmlLeg) -> Result<Segment, ParseError> {
    let carrier = leg
        .carrier
        .as_ref()
        .filter(|c| !c.name.trim().is_empty())
        .ok_or(ParseError::MissingLegField("Carrier"))?;
    let departure = parse_timestamp(required(&leg.departure_time_stamp, "DepartureTimeStamp")?)?;
    let arrival = parse_timestamp(required(&leg.arrival_time_stamp, "ArrivalTimeStamp")?)?;

    let segment = Segment::new(
        carrier.name.trim(),
        required(&leg.flight_number, "FlightNumber")?,
        required(&leg.source, "Source")?,
        required(&leg.destination, "Destination")?,
        departure,
        arrival,
    );

    Ok(match carrier.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => segment.with_carrier_id(id),
        _ => segment,
    })
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ParseError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ParseError::MissingLegField(field))
}

// Only finite amounts are prices; NaN and infinities are rejected
fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidAmount {
            value: raw.to_string(),
        })
}

// A small sample for inline testing
pub const SMALL_SAMPLE_XML: &str = r#"
<AirFareSearchResponse RequestTime="28-09-2015 20:23:49" ResponseTime="28-09-2015 20:23:56">
  <RequestId>123ABCD</RequestId>
  <PricedItineraries>
    <Flights>
      <OnwardPricedItinerary>
        <Flights>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>996</FlightNumber>
            <Source>DXB</Source>
            <Destination>DEL</Destination>
            <DepartureTimeStamp>2018-10-22T0005</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T0445</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <FareBasis>
                2820303decf751-5511-447a-aeb1-810a6b10ad7d@@$255_DXB_DEL_996_9_00:05_$255_DEL_BKK_332_9_13:50__A2_0_0
            </FareBasis>
            <WarningText/>
            <TicketType>E</TicketType>
          </Flight>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>332</FlightNumber>
            <Source>DEL</Source>
            <Destination>BKK</Destination>
            <DepartureTimeStamp>2018-10-22T1350</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T1935</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <WarningText/>
            <TicketType>E</TicketType>
          </Flight>
        </Flights>
      </OnwardPricedItinerary>
      <ReturnPricedItinerary/>
      <Pricing currency="SGD">
        <ServiceCharges type="SingleAdult" ChargeType="BaseFare">165.00</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="AirlineTaxes">381.80</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="TotalAmount">546.80</ServiceCharges>
      </Pricing>
    </Flights>
  </PricedItineraries>
</AirFareSearchResponse>
"#;
