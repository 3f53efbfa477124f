//! In-memory mutations of the user aggregate. Callers load the user, run one
//! of these functions, then persist the whole document.
//!
//! Items are located by a linear scan over trips and their arrays, which is
//! fine at the size a single traveller's data reaches.

use chrono::Utc;
use bson::oid::ObjectId;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{
    resource::{Embedded, TripItem, UserItem},
    trip::{Trip, TripInput, TripUpdate},
    user::User,
};

/// Keys a patch may carry but which never overwrite stored fields.
const PROTECTED_KEYS: [&str; 2] = ["_id", "tripId"];

/// Parses a client supplied identifier. Malformed ids cannot match anything,
/// so they surface as not found.
pub fn parse_id(raw: &str, label: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ApiError::not_found(label))
}

pub fn find_trip<'a>(user: &'a User, trip_id: &str) -> Result<&'a Trip, ApiError> {
    let id = parse_id(trip_id, "Trip")?;
    user.trips
        .iter()
        .find(|trip| trip.id == Some(id))
        .ok_or_else(|| ApiError::not_found("Trip"))
}

fn trip_index(user: &User, trip_id: &str) -> Result<usize, ApiError> {
    let id = parse_id(trip_id, "Trip")?;
    user.trips
        .iter()
        .position(|trip| trip.id == Some(id))
        .ok_or_else(|| ApiError::not_found("Trip"))
}

pub fn add_trip(user: &mut User, input: TripInput) -> Result<Trip, ApiError> {
    let trip = Trip::from_input(input, Utc::now())?;
    user.trips.push(trip.clone());
    user.touch();
    Ok(trip)
}

pub fn update_trip(user: &mut User, trip_id: &str, update: TripUpdate) -> Result<Trip, ApiError> {
    let index = trip_index(user, trip_id)?;
    let trip = &mut user.trips[index];
    trip.apply(update, Utc::now())?;
    let updated = trip.clone();
    user.touch();
    Ok(updated)
}

pub fn remove_trip(user: &mut User, trip_id: &str) -> Result<Trip, ApiError> {
    let index = trip_index(user, trip_id)?;
    let removed = user.trips.remove(index);
    user.touch();
    Ok(removed)
}

/// Items of kind `T` in one trip, or across every trip when no id is given.
pub fn list_trip_items<T: TripItem>(user: &User, trip_id: Option<&str>) -> Result<Vec<T>, ApiError> {
    match trip_id {
        Some(trip_id) => Ok(T::items(find_trip(user, trip_id)?).clone()),
        None => Ok(user
            .trips
            .iter()
            .flat_map(|trip| T::items(trip).iter().cloned())
            .collect()),
    }
}

pub fn push_trip_item<T: TripItem>(user: &mut User, trip_id: &str, mut item: T) -> Result<T, ApiError> {
    let index = trip_index(user, trip_id)?;
    item.validate()?;
    item.set_id(ObjectId::new());

    T::items_mut(&mut user.trips[index]).push(item.clone());
    user.trips[index].updated_at = Some(Utc::now());
    user.touch();
    Ok(item)
}

/// Position of item `id` as (trip index, item index).
pub fn locate_trip_item<T: TripItem>(user: &User, id: &ObjectId) -> Option<(usize, usize)> {
    user.trips.iter().enumerate().find_map(|(trip_index, trip)| {
        T::items(trip)
            .iter()
            .position(|item| item.id().as_ref() == Some(id))
            .map(|item_index| (trip_index, item_index))
    })
}

pub fn update_trip_item<T: TripItem>(user: &mut User, item_id: &str, patch: &Value) -> Result<T, ApiError> {
    let id = parse_id(item_id, T::LABEL)?;
    let (trip_index, item_index) =
        locate_trip_item::<T>(user, &id).ok_or_else(|| ApiError::not_found(T::LABEL))?;

    let slot = &mut T::items_mut(&mut user.trips[trip_index])[item_index];
    let updated = merge_patch(slot, patch)?;
    *slot = updated.clone();

    user.trips[trip_index].updated_at = Some(Utc::now());
    user.touch();
    Ok(updated)
}

pub fn remove_trip_item<T: TripItem>(user: &mut User, item_id: &str) -> Result<T, ApiError> {
    let id = parse_id(item_id, T::LABEL)?;
    let (trip_index, item_index) =
        locate_trip_item::<T>(user, &id).ok_or_else(|| ApiError::not_found(T::LABEL))?;

    let removed = T::items_mut(&mut user.trips[trip_index]).remove(item_index);
    user.trips[trip_index].updated_at = Some(Utc::now());
    user.touch();
    Ok(removed)
}

pub fn push_user_item<T: UserItem>(user: &mut User, mut item: T) -> Result<T, ApiError> {
    item.validate()?;
    item.set_id(ObjectId::new());
    T::items_mut(user).push(item.clone());
    user.touch();
    Ok(item)
}

fn user_item_index<T: UserItem>(user: &User, item_id: &str) -> Result<usize, ApiError> {
    let id = parse_id(item_id, T::LABEL)?;
    T::items(user)
        .iter()
        .position(|item| item.id() == Some(id))
        .ok_or_else(|| ApiError::not_found(T::LABEL))
}

pub fn update_user_item<T: UserItem>(user: &mut User, item_id: &str, patch: &Value) -> Result<T, ApiError> {
    let index = user_item_index::<T>(user, item_id)?;
    let slot = &mut T::items_mut(user)[index];
    let updated = merge_patch(slot, patch)?;
    *slot = updated.clone();
    user.touch();
    Ok(updated)
}

pub fn remove_user_item<T: UserItem>(user: &mut User, item_id: &str) -> Result<T, ApiError> {
    let index = user_item_index::<T>(user, item_id)?;
    let removed = T::items_mut(user).remove(index);
    user.touch();
    Ok(removed)
}

/// Builds a new item from a create payload. Client supplied `_id` and
/// `tripId` keys are dropped; identifiers are always assigned on push.
pub fn item_from_payload<T: Embedded>(mut payload: Value) -> Result<T, ApiError> {
    let fields = payload
        .as_object_mut()
        .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".to_string()))?;
    for key in PROTECTED_KEYS {
        fields.remove(key);
    }

    serde_json::from_value(payload)
        .map_err(|err| ApiError::BadRequest(format!("Invalid {}: {}", T::LABEL, err)))
}

/// Overlays the keys present in `patch` onto `current` and returns the
/// validated result. The item keeps its identifier.
pub fn merge_patch<T: Embedded>(current: &T, patch: &Value) -> Result<T, ApiError> {
    let changes = patch
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".to_string()))?;

    let mut merged = serde_json::to_value(current)
        .map_err(|err| ApiError::Internal(format!("failed to serialize {}: {}", T::LABEL, err)))?;
    let fields = merged
        .as_object_mut()
        .ok_or_else(|| ApiError::Internal(format!("{} did not serialize to an object", T::LABEL)))?;

    fields.remove("_id");
    for (key, value) in changes {
        if !PROTECTED_KEYS.contains(&key.as_str()) {
            fields.insert(key.clone(), value.clone());
        }
    }

    let mut updated: T = serde_json::from_value(merged)
        .map_err(|err| ApiError::BadRequest(format!("Invalid {} update: {}", T::LABEL, err)))?;
    if let Some(id) = current.id() {
        updated.set_id(id);
    }
    updated.validate()?;
    Ok(updated)
}
