use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opensplit::config::Config;
use opensplit::repository::{GroupRepository, InMemoryGroupRepository, MongoGroupRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|err| {
        tracing::error!("{}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    })?;

    let repository: Arc<dyn GroupRepository> = match &config.mongodb_uri {
        Some(uri) => {
            tracing::info!(database = %config.database, "Using MongoDB store");
            let repository = MongoGroupRepository::connect(uri, &config.database)
                .await
                .map_err(|err| {
                    tracing::error!("Failed to connect to MongoDB: {}", err);
                    std::io::Error::new(std::io::ErrorKind::Other, err)
                })?;
            Arc::new(repository)
        }
        None if config.seed_demo => {
            tracing::info!("Using in-memory store seeded with demo groups");
            Arc::new(InMemoryGroupRepository::with_demo_data())
        }
        None => {
            tracing::info!("Using in-memory store");
            Arc::new(InMemoryGroupRepository::new())
        }
    };
    let repository = web::Data::from(repository);

    tracing::info!("Listening on {}:{}", config.host, config.port);
    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };
        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(repository.clone())
            .configure(opensplit::routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
