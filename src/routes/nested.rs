//! One handler set for every embedded collection. A resource kind plugs in by
//! implementing `TripItem` or `UserItem`; its routes are then mounted with
//! [`trip_routes`] or [`user_routes`].

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::db::UserStore;
use crate::error::ApiError;
use crate::middleware::{auth::AuthMiddleware, auth_context::CurrentUser};
use crate::models::resource::{TripItem, UserItem};
use crate::services::aggregate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFilter {
    pub trip_id: Option<String>,
}

fn trip_id_of(payload: &Value) -> Result<String, ApiError> {
    payload
        .get("tripId")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| ApiError::BadRequest("tripId is required".to_string()))
}

/// Catch-all for verbs a route does not support.
pub async fn unsupported(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::unsupported(req.method().as_str(), req.path()))
}

/*
    GET /{items}?tripId=
*/
pub async fn list_trip_items<T: TripItem>(
    user: CurrentUser,
    filter: web::Query<TripFilter>,
) -> Result<HttpResponse, ApiError> {
    let user = user.into_inner();
    let items = aggregate::list_trip_items::<T>(&user, filter.trip_id.as_deref())?;
    Ok(HttpResponse::Ok().json(items))
}

/*
    POST /{items}/add
*/
pub async fn add_trip_item<T: TripItem>(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    input: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let payload = input.into_inner();
    let trip_id = trip_id_of(&payload)?;
    let item: T = aggregate::item_from_payload(payload)?;
    let mut user = user.into_inner();

    let created = aggregate::push_trip_item(&mut user, &trip_id, item)?;
    store.save(&user).await?;

    log::info!("{} added to trip {} for {}", T::LABEL, trip_id, user.username);
    Ok(HttpResponse::Created().json(created))
}

/*
    PUT /{items}/{item_id}
*/
pub async fn update_trip_item<T: TripItem>(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    path: web::Path<String>,
    patch: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let mut user = user.into_inner();

    let updated: T = aggregate::update_trip_item(&mut user, &item_id, &patch)?;
    store.save(&user).await?;

    log::info!("{} {} updated for {}", T::LABEL, item_id, user.username);
    Ok(HttpResponse::Ok().json(updated))
}

/*
    DELETE /{items}/{item_id}
*/
pub async fn delete_trip_item<T: TripItem>(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let mut user = user.into_inner();

    let removed: T = aggregate::remove_trip_item(&mut user, &item_id)?;
    store.save(&user).await?;

    log::info!("{} {} deleted for {}", T::LABEL, item_id, user.username);
    Ok(HttpResponse::Ok().json(removed))
}

pub async fn list_user_items<T: UserItem>(user: CurrentUser) -> Result<HttpResponse, ApiError> {
    let user = user.into_inner();
    Ok(HttpResponse::Ok().json(T::items(&user)))
}

pub async fn add_user_item<T: UserItem>(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    input: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let item: T = aggregate::item_from_payload(input.into_inner())?;
    let mut user = user.into_inner();

    let created = aggregate::push_user_item(&mut user, item)?;
    store.save(&user).await?;

    log::info!("{} added for {}", T::LABEL, user.username);
    Ok(HttpResponse::Created().json(created))
}

pub async fn update_user_item<T: UserItem>(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    path: web::Path<String>,
    patch: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let mut user = user.into_inner();

    let updated: T = aggregate::update_user_item(&mut user, &item_id, &patch)?;
    store.save(&user).await?;

    log::info!("{} {} updated for {}", T::LABEL, item_id, user.username);
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_user_item<T: UserItem>(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let mut user = user.into_inner();

    let removed: T = aggregate::remove_user_item(&mut user, &item_id)?;
    store.save(&user).await?;

    log::info!("{} {} deleted for {}", T::LABEL, item_id, user.username);
    Ok(HttpResponse::Ok().json(removed))
}

/// `/{items}`, `/{items}/add` and `/{items}/{item_id}` for a trip-scoped kind.
pub fn trip_routes<T: TripItem>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(T::PATH)
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(list_trip_items::<T>))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/add")
                    .route(web::post().to(add_trip_item::<T>))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/{item_id}")
                    .route(web::put().to(update_trip_item::<T>))
                    .route(web::delete().to(delete_trip_item::<T>))
                    .default_service(web::to(unsupported)),
            ),
    );
}

/// Same layout as [`trip_routes`] for collections stored on the user.
pub fn user_routes<T: UserItem>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(T::PATH)
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(list_user_items::<T>))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/add")
                    .route(web::post().to(add_user_item::<T>))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/{item_id}")
                    .route(web::put().to(update_user_item::<T>))
                    .route(web::delete().to(delete_user_item::<T>))
                    .default_service(web::to(unsupported)),
            ),
    );
}
