use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    resource::{Embedded, TripItem},
    trip::Trip,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub insurance_provider: String,
    pub policy_no: Option<String>,
    pub comments: Option<String>,
}

impl Embedded for Insurance {
    const LABEL: &'static str = "Insurance";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl TripItem for Insurance {
    const PATH: &'static str = "/insurance";

    fn items(trip: &Trip) -> &Vec<Self> {
        &trip.insurance
    }

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self> {
        &mut trip.insurance
    }
}
