use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{
    resource::{Embedded, UserItem},
    user::User,
};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Note {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub note: String,
}

impl Embedded for Note {
    const LABEL: &'static str = "Note";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.note.trim().is_empty() {
            return Err(ApiError::BadRequest("Note cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl UserItem for Note {
    const PATH: &'static str = "/notes";

    fn items(user: &User) -> &Vec<Self> {
        &user.notes
    }

    fn items_mut(user: &mut User) -> &mut Vec<Self> {
        &mut user.notes
    }
}
