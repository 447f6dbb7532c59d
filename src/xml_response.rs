use serde::{Deserialize, Serialize};

// Structures for XML deserialization of an air-fare search response
#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "AirFareSearchResponse")]
pub struct XmlAirFareSearchResponse {
    pub priced_itineraries: XmlPricedItineraries,
}

#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricedItineraries {
    #[serde(rename = "Flights")]
    pub itineraries: Vec<XmlItinerary>,
}

// Repeated blocks are collected; the parser reads the first one
#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlItinerary {
    pub onward_priced_itinerary: Vec<XmlPricedLegs>,
    pub pricing: Vec<XmlPricing>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricedLegs {
    pub flights: Option<XmlLegs>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlLegs {
    #[serde(rename = "Flight")]
    pub legs: Vec<XmlLeg>,
}

// Every field is optional here; the parser decides which ones are required
#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlLeg {
    pub carrier: Option<XmlCarrier>,
    pub flight_number: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_time_stamp: Option<String>,
    pub arrival_time_stamp: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlCarrier {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "$value")]
    pub name: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricing {
    #[serde(rename = "@currency")]
    pub currency: Option<String>,
    #[serde(rename = "ServiceCharges")]
    pub service_charges: Vec<XmlServiceCharge>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlServiceCharge {
    #[serde(rename = "@type")]
    pub passenger_type: String,
    #[serde(rename = "@ChargeType")]
    pub charge_type: String,
    #[serde(rename = "$value")]
    pub amount: String,
}
