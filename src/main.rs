use std::{io, sync::Arc};

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use journi_api::config::{AppConfig, StorageBackend};
use journi_api::db::{memory::MemoryUserStore, mongo::MongoUserStore, UserStore};
use journi_api::middleware::cors::build_cors;
use journi_api::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    log::info!("Starting in {} mode", config.environment.as_str());

    let store: Arc<dyn UserStore> = match &config.storage {
        StorageBackend::Mongo { uri, database } => {
            let store = MongoUserStore::connect(uri, database)
                .await
                .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
            log::info!("Using MongoDB database {}", database);
            Arc::new(store)
        }
        StorageBackend::Memory => {
            log::warn!("Using the in-memory store, data is lost on shutdown");
            Arc::new(MemoryUserStore::new())
        }
    };

    let bind_to = (config.host.clone(), config.port);
    log::info!("Attempting to bind to {}:{}", bind_to.0, bind_to.1);

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&app_config))
            .wrap(Logger::default())
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .configure(routes::configure)
    })
    .bind(bind_to)?
    .run()
    .await
}
