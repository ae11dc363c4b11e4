//! Backend entry-point: loads settings, opens the store, seeds demo data and
//! serves the REST API with its OpenAPI docs.

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use service_finder::demo_data::{DemoDataSettings, seed_demo_data_on_startup};
use service_finder::inbound::http::health::HealthState;
use service_finder::outbound::persistence::{BackendSelection, PoolConfig, connect};
use service_finder::settings::ServerSettings;

mod server;

use server::{ServerConfig, create_server};

/// Settings come from `SERVICE_FINDER_*` and `DEMO_DATA_*` environment values.
fn load_settings() -> std::io::Result<(ServerSettings, DemoDataSettings)> {
    let program = || [OsString::from("service-finder")];
    let server = ServerSettings::load_from_iter(program())
        .map_err(|err| std::io::Error::other(format!("invalid server settings: {err}")))?;
    let demo = DemoDataSettings::load_from_iter(program())
        .map_err(|err| std::io::Error::other(format!("invalid demo data settings: {err}")))?;
    Ok((server, demo))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let (settings, demo_settings) = load_settings()?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let selection = BackendSelection::from_env(&settings.sqlite_path())
        .map_err(std::io::Error::other)?;
    let database = connect(PoolConfig::new(selection).with_max_size(settings.max_connections))
        .await
        .map_err(std::io::Error::other)?;
    database
        .ensure_schema()
        .await
        .map_err(|err| std::io::Error::other(format!("schema setup failed: {err}")))?;

    seed_demo_data_on_startup(&demo_settings, &database)
        .await
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(bind_addr, database);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "service finder listening");
    server.await
}
