use std::sync::Arc;

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::AdapterConfig;
use crate::database::{DatabaseManager, PgAppStore};
use crate::handlers;
use crate::middleware::api_key_middleware;
use crate::state::AppState;

/// Build the full router. `/health` is public; everything under `/apps`
/// goes through bearer authentication.
pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Protected
        .merge(apps_routes(state.clone()))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn apps_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::apps;

    Router::new()
        .route("/apps", get(apps::apps_get))
        .route(
            "/apps/by-ids",
            get(apps::apps_by_ids_get)
                .post(apps::apps_by_ids_post)
                // id lists have no upper bound; the body is only read after auth
                .layer(DefaultBodyLimit::disable()),
        )
        // route_layer: unmatched paths reach the 404 fallback, not auth
        .route_layer(middleware::from_fn_with_state(state, api_key_middleware))
}

/// Run the HTTP server until Ctrl-C / SIGTERM
pub async fn serve(config: AdapterConfig) -> anyhow::Result<()> {
    info!("Starting app adapter in {:?} mode", config.environment);

    if config.security.api_key.is_empty() {
        warn!("ADAPTER_API_KEY is not set. API will reject all requests.");
    }

    let database = DatabaseManager::connect_lazy(&config.database)
        .context("failed to configure database pool")?;
    let store = Arc::new(PgAppStore::new(database.pool().clone()));
    let state = AppState::from_config(&config, store);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("App adapter listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config.server.enable_cors))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    info!("App adapter stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
