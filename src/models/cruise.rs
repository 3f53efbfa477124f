use chrono::NaiveDate;
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
pub struct Cruise {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub ship: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub confirmation_no: Option<String>,
    pub cabin_no: Option<String>,
}

impl Embedded for Cruise {
    const LABEL: &'static str = "Cruise";

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

impl TripItem for Cruise {
    const PATH: &'static str = "/cruises";

    fn items(trip: &Trip) -> &Vec<Self> {
        &trip.cruises
    }

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self> {
        &mut trip.cruises
    }
}
