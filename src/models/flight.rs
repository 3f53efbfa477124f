use chrono::{NaiveDate, NaiveTime};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    resource::{Embedded, TripItem},
    trip::Trip,
};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightType {
    OneWay,
    RoundTrip,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
    pub airport: String,
    pub code: String,
    pub city: String,
    pub country: String,
    pub flight_no: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "type")]
    pub flight_type: FlightType,
    pub airline: String,
    pub ticket_holder: String,
    pub departure_flight: FlightLeg,
    pub return_flight: Option<FlightLeg>,
}

impl Embedded for Flight {
    const LABEL: &'static str = "Flight";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ApiError> {
        match (&self.flight_type, &self.return_flight) {
            (FlightType::RoundTrip, None) => Err(ApiError::BadRequest(
                "Round-trip flights require a return flight".to_string(),
            )),
            (_, Some(ret)) if ret.date < self.departure_flight.date => Err(ApiError::BadRequest(
                "Return flight departs before the outbound flight".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl TripItem for Flight {
    const PATH: &'static str = "/flights";

    fn items(trip: &Trip) -> &Vec<Self> {
        &trip.flights
    }

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self> {
        &mut trip.flights
    }
}
