use chrono::{NaiveDate, NaiveTime};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    check_date_range,
    resource::{Embedded, TripItem},
    trip::Trip,
};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub vehicle_type: Option<String>,
    pub confirmation_no: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
}

impl Embedded for Rental {
    const LABEL: &'static str = "Rental";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ApiError> {
        check_date_range(Self::LABEL, self.start_date, self.end_date)
    }
}

impl TripItem for Rental {
    const PATH: &'static str = "/rentals";

    fn items(trip: &Trip) -> &Vec<Self> {
        &trip.rentals
    }

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self> {
        &mut trip.rentals
    }
}
