//! API server entry point.

use api::config::{Config, StoreBackend};
use api::routes::meals::AppState;
use meal_store::{InMemoryMealStore, MealStore, PostgresConfig, PostgresMealStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn serve<S: MealStore + 'static>(config: &Config, store: S, metrics_handle: PrometheusHandle) {
    let app = api::create_app(AppState::new(store), metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, store = ?config.store, "starting food server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    api::telemetry::init_tracing(&config);

    let metrics_handle = api::telemetry::install_metrics()
        .expect("failed to install Prometheus recorder");

    match config.store {
        StoreBackend::Memory => serve(&config, InMemoryMealStore::new(), metrics_handle).await,
        StoreBackend::Postgres => {
            let db_config = PostgresConfig::from_env();
            let store = match PostgresMealStore::connect(&db_config).await {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!(error = %err, host = %db_config.host, "failed to open meal database");
                    std::process::exit(1);
                }
            };
            serve(&config, store, metrics_handle).await;
        }
    }
}
