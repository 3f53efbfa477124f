use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

use crate::error::ApiError;
use crate::models::{
    activity::Activity, cruise::Cruise, flight::Flight, hotel::Hotel, insurance::Insurance,
    note::Note, rental::Rental, reward_program::RewardProgram, transportation::Transportation,
};

pub mod health;
pub mod nested;
pub mod trips;
pub mod users;

fn bad_request(message: String) -> actix_web::Error {
    let response: HttpResponse = ApiError::BadRequest(message.clone()).error_response();
    InternalError::from_response(message, response).into()
}

/// The whole route tree. Expects `web::Data<dyn UserStore>` and
/// `web::Data<AppConfig>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .route("/health", web::get().to(health::health_check))
        .configure(users::config)
        .configure(trips::config)
        .configure(nested::trip_routes::<Flight>)
        .configure(nested::trip_routes::<Hotel>)
        .configure(nested::trip_routes::<Cruise>)
        .configure(nested::trip_routes::<Activity>)
        .configure(nested::trip_routes::<Rental>)
        .configure(nested::trip_routes::<Insurance>)
        .configure(nested::trip_routes::<Transportation>)
        .configure(nested::user_routes::<Note>)
        .configure(nested::user_routes::<RewardProgram>);
}
