use chrono::NaiveDate;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    resource::{Embedded, TripItem},
    trip::Trip,
};

/// Ground legs that are neither flights nor rentals: trains, ferries, shuttles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

impl Embedded for Transportation {
    const LABEL: &'static str = "Transportation";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl TripItem for Transportation {
    const PATH: &'static str = "/transportation";

    fn items(trip: &Trip) -> &Vec<Self> {
        &trip.transportation
    }

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self> {
        &mut trip.transportation
    }
}
