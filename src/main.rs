//! HomeWatch Agent - Main Entry Point
//!
//! Polls the sensor store, classifies each reading with the emergency
//! model, derives the home risk level and reports it upstream on a
//! risk-driven cadence.

mod config;
pub mod constants;
mod logic;

use std::process::ExitCode;

use config::AgentConfig;
use logic::monitor::{Monitor, MonitorSettings};
use logic::store::HttpSensorStore;
use logic::telemetry::HttpTelemetrySink;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AgentConfig::from_env();

    log::info!(
        "Starting {} agent v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );
    log::info!("   Store: {}", config.store_url);
    log::info!(
        "   Sink: {} (reporting {})",
        config.sink_url,
        if config.reporting_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    log::info!(
        "   Intervals: normal {:?}, risk {:?}, poll {:?}",
        config.normal_interval,
        config.risk_interval,
        config.poll_interval
    );

    // No model, no agent. Anything wrong with the artifact is fatal here
    // and never inside the loop.
    let classifier = match logic::model::load(&config.model_path, config.model_sha256.as_deref()) {
        Ok(model) => {
            log::info!(
                "✅ Emergency model loaded ({} trees) from {}",
                model.tree_count(),
                config.model_path
            );
            model
        }
        Err(e) => {
            log::error!("cannot start without a classifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match HttpSensorStore::new(&config.store_url, config.http_timeout) {
        Ok(source) => source,
        Err(e) => {
            log::error!("failed to build store client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sink = match HttpTelemetrySink::new(&config.sink_url, config.http_timeout) {
        Ok(sink) => sink,
        Err(e) => {
            log::error!("failed to build sink client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = MonitorSettings::from_config(&config);
    let mut monitor = Monitor::new(settings, source, sink, classifier);

    monitor
        .run(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {}
                Err(e) => {
                    // Without a signal handler the loop simply runs until
                    // killed externally.
                    log::warn!("ctrl-c handler unavailable: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await;

    ExitCode::SUCCESS
}
