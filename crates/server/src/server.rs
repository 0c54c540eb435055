//! Router construction and server startup.
//!
//! The route tables are built here, in one place, so the full surface of
//! each API is visible at a glance. The validation middleware wraps every
//! route; the latency middleware wraps the validation so a configured delay
//! applies to error responses too, as it does in the real service.

use crate::config::ServerConfig;
use crate::middleware::{simulate_latency, validate_query_request, validate_services_request};
use crate::routes::{duplicates, query, summary, targets};
use crate::state::ServerState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the management API router.
pub fn vws_router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/targets",
            post(targets::add_target).get(targets::target_list),
        )
        .route(
            "/targets/{target_id}",
            get(targets::get_target)
                .put(targets::update_target)
                .delete(targets::delete_target),
        )
        .route("/summary", get(summary::database_summary))
        .route("/summary/{target_id}", get(summary::target_summary))
        .route("/duplicates/{target_id}", get(duplicates::get_duplicates))
        .layer(from_fn_with_state(state.clone(), validate_services_request))
        .layer(from_fn_with_state(state.clone(), simulate_latency))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the query API router.
pub fn vwq_router(state: ServerState) -> Router {
    Router::new()
        .route("/v1/query", post(query::query))
        .layer(from_fn_with_state(state.clone(), validate_query_request))
        .layer(from_fn_with_state(state.clone(), simulate_latency))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start both emulator APIs and block until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false)
        .init();

    let vws_addr = config.vws_socket_addr()?;
    let vwq_addr = config.vwq_socket_addr()?;
    let state = ServerState::new(config);

    let vws = axum::serve(
        tokio::net::TcpListener::bind(vws_addr).await?,
        vws_router(state.clone()),
    )
    .with_graceful_shutdown(shutdown_signal());
    let vwq = axum::serve(
        tokio::net::TcpListener::bind(vwq_addr).await?,
        vwq_router(state),
    )
    .with_graceful_shutdown(shutdown_signal());

    tracing::info!(%vws_addr, %vwq_addr, "emulator listening");
    let (vws_result, vwq_result) = tokio::join!(vws, vwq);
    vws_result?;
    vwq_result?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
