use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    resource::{Embedded, UserItem},
    user::User,
};

/// Frequent flyer, hotel loyalty and similar memberships.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardProgram {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub program_name: String,
    pub membership_id: String,
}

impl Embedded for RewardProgram {
    const LABEL: &'static str = "Reward Program";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl UserItem for RewardProgram {
    const PATH: &'static str = "/rewardPrograms";

    fn items(user: &User) -> &Vec<Self> {
        &user.reward_programs
    }

    fn items_mut(user: &mut User) -> &mut Vec<Self> {
        &mut user.reward_programs
    }
}
