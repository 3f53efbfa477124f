use chrono::{NaiveDate, NaiveTime};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    resource::{Embedded, TripItem},
    trip::Trip,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub activity_name: String,
    pub activity_date: Option<NaiveDate>,
    pub activity_time: Option<NaiveTime>,
    pub location: Option<String>,
}

impl Embedded for Activity {
    const LABEL: &'static str = "Activity";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl TripItem for Activity {
    const PATH: &'static str = "/activities";

    fn items(trip: &Trip) -> &Vec<Self> {
        &trip.activities
    }

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self> {
        &mut trip.activities
    }
}
