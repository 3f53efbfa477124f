use actix_web::{web, HttpResponse};

use crate::db::UserStore;
use crate::error::ApiError;
use crate::middleware::{auth::AuthMiddleware, auth_context::CurrentUser};
use crate::models::trip::{TripInput, TripUpdate};
use crate::routes::nested::unsupported;
use crate::services::aggregate;

/*
    GET /trips
*/
pub async fn list(user: CurrentUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(&user.0.trips))
}

/*
    POST /trips/add
*/
pub async fn add(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    input: web::Json<TripInput>,
) -> Result<HttpResponse, ApiError> {
    let mut user = user.into_inner();

    let trip = aggregate::add_trip(&mut user, input.into_inner())?;
    store.save(&user).await?;

    log::info!("Trip {} created for {}", trip.name, user.username);
    Ok(HttpResponse::Created().json(trip))
}

/*
    GET /trips/{trip_id}
*/
pub async fn get_by_id(user: CurrentUser, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let trip = aggregate::find_trip(&user.0, &path)?;
    Ok(HttpResponse::Ok().json(trip))
}

/*
    PUT /trips/{trip_id}
*/
pub async fn update(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    path: web::Path<String>,
    input: web::Json<TripUpdate>,
) -> Result<HttpResponse, ApiError> {
    let mut user = user.into_inner();

    let trip = aggregate::update_trip(&mut user, &path, input.into_inner())?;
    store.save(&user).await?;

    log::info!("Trip {} updated for {}", trip.name, user.username);
    Ok(HttpResponse::Ok().json(trip))
}

/*
    DELETE /trips/{trip_id}
*/
pub async fn delete(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let mut user = user.into_inner();

    let trip = aggregate::remove_trip(&mut user, &path)?;
    store.save(&user).await?;

    log::info!("Trip {} deleted for {}", trip.name, user.username);
    Ok(HttpResponse::Ok().json(trip))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trips")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(list))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/add")
                    .route(web::post().to(add))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/{trip_id}")
                    .route(web::get().to(get_by_id))
                    .route(web::put().to(update))
                    .route(web::delete().to(delete))
                    .default_service(web::to(unsupported)),
            ),
    );
}
