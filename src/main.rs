use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use clap::Parser;
use prometheus::IntGauge;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use wiznet_admin::api::endpoints::configure;
use wiznet_admin::api::middleware::timing_middleware;
use wiznet_admin::api::state::AppState;
use wiznet_admin::model::config::{ApplicationArguments, Config, LoggingConfig};
use wiznet_admin::service::clock::SystemClock;

/**
 * Main entry point of the back office server.
 */
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = ApplicationArguments::parse();

    let config = get_config(&args.config_file)?;

    init_tracing(&config.logging)?;

    let state = AppState::from_workspace(config.workspace.clone(), Arc::new(SystemClock)).map_err(|err| std::io::Error::other(format!("Failed to initialize workspace: {err}")))?;
    let state = web::Data::new(state);

    let prometheus = PrometheusMetricsBuilder::new("")
        .endpoint("/metrics")
        .mask_unmatched_patterns("UNKNOWN")
        .build()
        .map_err(|err| std::io::Error::other(format!("Failed to create Prometheus metrics: {err}")))?;

    // Initialize custom metrics
    let customers_gauge = IntGauge::new("customers_total", "Customers in the directory").map_err(|err| std::io::Error::other(format!("Failed to create customers_total gauge: {err}")))?;
    let tickets_gauge = IntGauge::new("tickets_total", "Tickets in the tracker").map_err(|err| std::io::Error::other(format!("Failed to create tickets_total gauge: {err}")))?;
    let outstanding_gauge = IntGauge::new("tickets_outstanding", "Open or in progress tickets").map_err(|err| std::io::Error::other(format!("Failed to create tickets_outstanding gauge: {err}")))?;
    register_prometheus_metrics(&prometheus, &customers_gauge)?;
    register_prometheus_metrics(&prometheus, &tickets_gauge)?;
    register_prometheus_metrics(&prometheus, &outstanding_gauge)?;

    gather_workspace_metrics(customers_gauge, tickets_gauge, outstanding_gauge, state.clone());

    info!(http_port = config.server.http_port, workers = config.server.workers, lookup_mode = ?config.workspace.lookup_mode, "Starting back office server");

    HttpServer::new(move || App::new().wrap(prometheus.clone()).wrap(from_fn(timing_middleware)).app_data(state.clone()).configure(configure))
        .bind(("127.0.0.1", config.server.http_port))?
        .workers(config.server.workers)
        .run()
        .await
}

/**
 * Initializes structured logging for the application.
 *
 * #Arguments
 * `logging`: Format, filter directives and destination of the logs.
 *
 * #Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing(logging: &LoggingConfig) -> Result<(), std::io::Error> {
    let mut filter = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();
    for directive in &logging.directives {
        filter = filter.add_directive(directive.parse().map_err(|err| std::io::Error::other(format!("Invalid logging directive {directive}: {err}")))?);
    }

    let writer = match &logging.logfile {
        Some(logfile) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(logfile).map_err(|err| std::io::Error::other(format!("Failed to open log file {logfile}: {err}")))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(logging.target)
        .with_thread_ids(logging.thread_ids)
        .with_thread_names(logging.thread_names)
        .with_line_number(logging.line_number)
        .with_level(logging.level)
        .with_ansi(logging.ansi)
        .with_file(logging.file)
        .with_writer(writer)
        .try_init()
        .map_err(|err| std::io::Error::other(format!("Failed to initialize logging: {err}")))
}

/**
 * Registers custom Prometheus metrics.
 *
 * #Arguments
 * `prometheus_metrics`: The Prometheus metrics instance to register the gauge with.
 * `gauge`: The gauge to register.
 */
fn register_prometheus_metrics(prometheus_metrics: &PrometheusMetrics, gauge: &IntGauge) -> Result<(), std::io::Error> {
    prometheus_metrics.registry.register(Box::new(gauge.clone())).map_err(|err| std::io::Error::other(format!("Failed to register Prometheus gauge: {err}")))?;
    Ok(())
}

/**
 * Gathers collection sizes once a second on a background task.
 *
 * #Arguments
 * `customers_gauge`: Gauge for the number of customers.
 * `tickets_gauge`: Gauge for the number of tickets.
 * `outstanding_gauge`: Gauge for open and in progress tickets.
 * `state`: The shared collections.
 */
fn gather_workspace_metrics(customers_gauge: IntGauge, tickets_gauge: IntGauge, outstanding_gauge: IntGauge, state: web::Data<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            let tickets = state.ticket_service.snapshot();
            let outstanding = tickets.iter().filter(|ticket| ticket.status.is_outstanding()).count();
            customers_gauge.set(i64::try_from(state.customer_service.count()).unwrap_or(i64::MAX));
            tickets_gauge.set(i64::try_from(tickets.len()).unwrap_or(i64::MAX));
            outstanding_gauge.set(i64::try_from(outstanding).unwrap_or(i64::MAX));
        }
    });
}

/**
 * Reads the configuration from the specified file.
 *
 * #Arguments
 * `config_file`: The path to the configuration file.
 *
 * #Returns
 * A `Result` containing the parsed `Config` or an `std::io::Error` if reading or parsing fails.
*/
fn get_config(config_file: &str) -> Result<Config, std::io::Error> {
    let config_str: String = std::fs::read_to_string(config_file).map_err(|err| std::io::Error::other(format!("Failed to read config file: {err}")))?;
    let config: Config = toml::from_str(&config_str).map_err(|err| std::io::Error::other(format!("Failed to parse config file: {err}")))?;
    Ok(config)
}
