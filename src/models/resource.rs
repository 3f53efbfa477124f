use bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;
use crate::models::{trip::Trip, user::User};

/// A record embedded in the user aggregate, addressed by its own `_id`.
pub trait Embedded: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Human readable name used in messages, e.g. "Hotel".
    const LABEL: &'static str;

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);

    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Items stored in one of a trip's arrays.
pub trait TripItem: Embedded {
    /// Mount point of the collection, e.g. "/hotels".
    const PATH: &'static str;

    fn items(trip: &Trip) -> &Vec<Self>;

    fn items_mut(trip: &mut Trip) -> &mut Vec<Self>;
}

/// Items stored directly on the user.
pub trait UserItem: Embedded {
    const PATH: &'static str;

    fn items(user: &User) -> &Vec<Self>;

    fn items_mut(user: &mut User) -> &mut Vec<Self>;
}
