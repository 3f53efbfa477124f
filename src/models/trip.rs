use chrono::{DateTime, NaiveDate, Utc};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    activity::Activity, check_date_range, cruise::Cruise, flight::Flight, hotel::Hotel,
    insurance::Insurance, rental::Rental, transportation::Transportation,
};
use crate::error::ApiError;

/// Which planning categories the user switched on for a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Selections {
    pub flights: bool,
    pub hotels: bool,
    pub cruises: bool,
    pub activities: bool,
    pub rentals: bool,
    pub insurance: bool,
    pub transportation: bool,
}

/// Flags sent in a trip update; only the ones present are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionsUpdate {
    pub flights: Option<bool>,
    pub hotels: Option<bool>,
    pub cruises: Option<bool>,
    pub activities: Option<bool>,
    pub rentals: Option<bool>,
    pub insurance: Option<bool>,
    pub transportation: Option<bool>,
}

impl Selections {
    pub fn apply(&mut self, update: &SelectionsUpdate) {
        let flags = [
            (&mut self.flights, update.flights),
            (&mut self.hotels, update.hotels),
            (&mut self.cruises, update.cruises),
            (&mut self.activities, update.activities),
            (&mut self.rentals, update.rentals),
            (&mut self.insurance, update.insurance),
            (&mut self.transportation, update.transportation),
        ];
        for (flag, value) in flags {
            if let Some(value) = value {
                *flag = value;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub selections: Selections,
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub cruises: Vec<Cruise>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub rentals: Vec<Rental>,
    #[serde(default)]
    pub insurance: Vec<Insurance>,
    #[serde(default)]
    pub transportation: Vec<Transportation>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    #[serde(alias = "tripName")]
    pub name: String,
    #[serde(alias = "departureDate")]
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub selections: Option<Selections>,
}

/// Partial update of a trip's own fields. Item arrays are never touched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    #[serde(alias = "tripName")]
    pub name: Option<String>,
    #[serde(alias = "departureDate")]
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub selections: Option<SelectionsUpdate>,
}

impl Trip {
    pub fn from_input(input: TripInput, now: DateTime<Utc>) -> Result<Self, ApiError> {
        let trip = Trip {
            id: Some(ObjectId::new()),
            name: input.name.trim().to_string(),
            start_date: input.start_date,
            end_date: input.end_date,
            selections: input.selections.unwrap_or_default(),
            flights: Vec::new(),
            hotels: Vec::new(),
            cruises: Vec::new(),
            activities: Vec::new(),
            rentals: Vec::new(),
            insurance: Vec::new(),
            transportation: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        trip.validate()?;
        Ok(trip)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::BadRequest("Trip name is required".to_string()));
        }
        check_date_range("Trip", self.start_date, self.end_date)
    }

    /// Applies `update` and re-validates; on error the trip is left as it was.
    pub fn apply(&mut self, update: TripUpdate, now: DateTime<Utc>) -> Result<(), ApiError> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if update.start_date.is_some() {
            next.start_date = update.start_date;
        }
        if update.end_date.is_some() {
            next.end_date = update.end_date;
        }
        if let Some(selections) = &update.selections {
            next.selections.apply(selections);
        }
        next.validate()?;

        next.updated_at = Some(now);
        *self = next;
        Ok(())
    }
}
