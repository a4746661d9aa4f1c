pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::middleware::from_fn_with_state;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::Config;
use services::{FmcsaClient, LoadStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub fmcsa: FmcsaClient,
    pub store: LoadStore,
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let fmcsa = FmcsaClient::new(config.fmcsa.clone())?;
        let store = LoadStore::new(config.database.clone());

        let state = AppState {
            config: config.clone(),
            fmcsa,
            store,
        };

        // Every business route sits behind the API key gate; only the
        // banner and health probes are reachable without a key.
        let gated = Router::new()
            .route("/verify-carrier", post(handlers::verify_carrier))
            .route("/api/verify", post(handlers::verify_carrier))
            .route(
                "/api/verify/:mc_number",
                get(handlers::verify_carrier_by_path),
            )
            .route("/search-loads", post(handlers::search_loads))
            .route("/carriers-calls", post(handlers::record_carrier_call))
            .layer(from_fn_with_state(
                state.clone(),
                middleware::require_api_key,
            ));

        let router = Router::new()
            .route("/", get(handlers::home))
            .route("/health", get(handlers::health_check))
            .merge(gated)
            .fallback(handlers::not_found_fallback)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            anyhow::Error::new(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, "carrier-service listening");

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
