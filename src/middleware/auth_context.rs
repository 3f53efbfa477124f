use actix_http::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::db::UserStore;
use crate::error::ApiError;
use crate::middleware::auth::Claims;
use crate::models::user::User;

/// The user behind the bearer token, loaded fresh from the store for every
/// request. Only usable on routes wrapped by `AuthMiddleware`.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let store = req.app_data::<web::Data<dyn UserStore>>().cloned();

        Box::pin(async move {
            let claims =
                claims.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))?;
            let store = store
                .ok_or_else(|| ApiError::Internal("user store is not registered".to_string()))?;
            let user_id = claims
                .user_id()
                .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

            match store.find_by_id(&user_id).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => {
                    log::warn!("Token for {} refers to a missing user", claims.username);
                    Err(ApiError::Unauthorized("Unauthorized: User not found".to_string()))
                }
            }
        })
    }
}
