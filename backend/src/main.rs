//! CourseNote entry-point: loads settings, wires the MongoDB-backed services
//! into the REST API, and serves it.

mod server;

use std::ffi::OsString;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use coursenote::config::{MongoSettings, ServerSettings, legacy_db_name, settings_error};
use coursenote::inbound::http::health::HealthState;
use server::{ServerConfig, create_server};

/// Settings come from the environment and configuration files only; the two
/// settings structs would otherwise compete for the same CLI flags.
fn settings_args() -> Vec<OsString> {
    std::env::args_os().take(1).collect()
}

fn load_settings() -> std::io::Result<(MongoSettings, ServerSettings)> {
    let mongo = MongoSettings::load_from_iter(settings_args())
        .map_err(|err| settings_error("MongoDB", err))?
        .with_db_name_fallback(legacy_db_name());
    let server = ServerSettings::load_from_iter(settings_args())
        .map_err(|err| settings_error("server", err))?;
    Ok((mongo, server))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("coursenote")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(err) => {
            warn!(error = %err, "Prometheus metrics disabled");
            None
        }
    }
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

    let (mongo, settings) = load_settings()?;
    let config = ServerConfig::new(settings.bind_addr(), mongo.connection_config());
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
