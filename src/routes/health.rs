use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::db::UserStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    store: web::Data<dyn UserStore>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: config.environment.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store_result = check_store(store.get_ref()).await;
    health
        .services
        .insert("store".to_string(), store_result.clone());

    if store_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_store(store: &dyn UserStore) -> ServiceStatus {
    match store.ping().await {
        Ok(()) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(err) => {
            log::warn!("Health check could not reach the user store: {}", err);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(err.to_string()),
            }
        }
    }
}
