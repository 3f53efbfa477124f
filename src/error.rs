use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

const INTERNAL_MESSAGE: &str = "An internal server error has occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ApiError {
    pub fn not_found(label: &str) -> Self {
        ApiError::NotFound(format!("{} not found", label))
    }

    pub fn unsupported(method: &str, path: &str) -> Self {
        ApiError::Forbidden(format!("{} operation not supported on {}", method, path))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Unsupported verbs answer in plain text, everything else in JSON.
            ApiError::Forbidden(message) => HttpResponse::Forbidden()
                .insert_header(ContentType::plaintext())
                .body(message.clone()),
            ApiError::Internal(detail) => {
                log::error!("{}", detail);
                HttpResponse::InternalServerError()
                    .insert_header(ContentType::plaintext())
                    .body(INTERNAL_MESSAGE)
            }
            ApiError::NotFound(message)
            | ApiError::Unauthorized(message)
            | ApiError::BadRequest(message)
            | ApiError::Conflict(message) => {
                HttpResponse::build(self.status_code()).json(ErrorBody { message })
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => {
                ApiError::Conflict(format!("A user with the username {} already exists", username))
            }
            StoreError::MissingUser(_) => ApiError::NotFound("Unauthorized: User not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Internal(format!("token signing failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn not_found_renders_json_message() {
        let response = ApiError::not_found("Hotel").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Hotel not found");
    }

    #[actix_rt::test]
    async fn forbidden_renders_plain_text() {
        let response = ApiError::unsupported("GET", "/hotels/add").error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, "GET operation not supported on /hotels/add");
    }

    #[actix_rt::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("connection reset".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, INTERNAL_MESSAGE);
    }

    #[test]
    fn duplicate_username_maps_to_conflict() {
        let err: ApiError = StoreError::DuplicateUsername("amelia".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
