use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::db::UserStore;
use crate::error::ApiError;
use crate::middleware::auth::AuthMiddleware;
use crate::models::user::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::routes::nested::unsupported;
use crate::services::auth_service;

/*
    POST /users/register
*/
pub async fn register(
    store: web::Data<dyn UserStore>,
    config: web::Data<AppConfig>,
    input: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = auth_service::register(store.get_ref(), &config.auth, input.into_inner()).await?;
    let token = auth_service::issue_token(&user, &config.auth)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        status: "Registration Successful!".to_string(),
        token,
    }))
}

/*
    POST /users/login
*/
pub async fn login(
    store: web::Data<dyn UserStore>,
    config: web::Data<AppConfig>,
    input: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let credentials = input.into_inner();
    let user =
        auth_service::authenticate_local(store.get_ref(), &credentials.username, &credentials.password)
            .await?;
    let token = auth_service::issue_token(&user, &config.auth)?;

    log::info!("User {} signed in", user.username);
    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        status: "Login Successful!".to_string(),
        token,
    }))
}

/*
    GET /users/{username}
*/
pub async fn get_by_username(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    match store.find_by_username(&path).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserProfile::from(user))),
        None => Err(ApiError::not_found("User")),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("")
                    .wrap(AuthMiddleware)
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/register")
                    .route(web::post().to(register))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/login")
                    .route(web::post().to(login))
                    .default_service(web::to(unsupported)),
            )
            .service(
                web::resource("/{username}")
                    .route(web::get().to(get_by_username))
                    .default_service(web::to(unsupported)),
            ),
    );
}
