use actix_cors::Cors;
use actix_web::http::header;

use crate::config::AppConfig;

/// Every origin is accepted in development; otherwise only the configured
/// allow-list. Requests from other origins are still served, just without
/// CORS headers, so browsers refuse to expose the response.
pub fn build_cors(config: &AppConfig) -> Cors {
    let base = if config.is_development() {
        Cors::default().allow_any_origin()
    } else {
        let allowed = config.cors_origins.clone();
        Cors::default().allowed_origin_fn(move |origin, _req_head| {
            origin
                .to_str()
                .map(|origin| allowed.iter().any(|allowed| allowed == origin))
                .unwrap_or(false)
        })
    };

    base.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .block_on_origin_mismatch(false)
        .max_age(3600)
}
