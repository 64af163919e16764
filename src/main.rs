use std::time::Duration;

use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    database_interface::DatabaseInterface, http::create_app, local_store::LocalStore,
};
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod availability_manager;
mod backend;
mod booking_service;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_store;
mod schema;
#[cfg(test)]
mod testutils;
mod trainer_directory;
mod types;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, "Failed to bind {address}");
            return;
        }
    };
    info!("Trainer booking service listening on {address}");

    let app = if let Some(database_url) = configuration.database_url() {
        if configuration.example_data() {
            warn!("Example data is only inserted into the in-memory store");
        }
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(%err, "Failed to establish database connection. Retry in 1 sec. Start without --database-url to keep records in memory.");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(backend, configuration)
    } else {
        let backend = LocalStore::default();
        if configuration.example_data() {
            match backend.insert_example_data() {
                Ok(data) => info!(
                    trainer_id = %data.trainer_id,
                    client_ids = ?data.client_ids,
                    workout_id = %data.workout_id,
                    "Inserted example data"
                ),
                Err(err) => error!(%err, "Failed to insert example data"),
            }
        }
        info!("Keeping records in memory");
        create_app(backend, configuration)
    };

    if let Err(err) = axum::serve(listener, app).await {
        error!(%err, "Server stopped");
    }
}
