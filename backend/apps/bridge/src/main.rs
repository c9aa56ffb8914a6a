//! Bridge Server Entry Point
//!
//! Exposes the auth and data adapters as JSON endpoints.
//! Uses `anyhow` for startup errors; request-level errors render through
//! `kernel::error::AppError`.
//!
//! With `BRIDGE_IN_MEMORY=1` both adapters run against in-memory backends
//! and no Firebase project is needed.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthAdapter, AuthConfig, FirebaseAuthBackend, InMemoryAuthBackend, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use data::{DataAdapter, DataConfig, FirestoreDocumentStore, InMemoryDocumentStore, data_router};
use platform::config::FirebaseConfig;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bridge=info,auth=info,data=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (auth_config, data_config) = if cfg!(debug_assertions) {
        (AuthConfig::development(), DataConfig::development())
    } else {
        (AuthConfig::default(), DataConfig::default())
    };
    let data_config = match env::var("DATA_API_URL") {
        Ok(url) => data_config.with_api_url(url),
        Err(_) => data_config,
    };

    let in_memory = env::var("BRIDGE_IN_MEMORY").is_ok_and(|v| v == "1" || v == "true");
    let (auth_routes, data_routes) = if in_memory {
        tracing::warn!("BRIDGE_IN_MEMORY is set, serving in-memory backends");
        in_memory_routes(auth_config, data_config)
    } else {
        firebase_routes(auth_config, data_config)?
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/data", data_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BRIDGE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routers backed by the process-wide Firebase app
fn firebase_routes(
    auth_config: AuthConfig,
    data_config: DataConfig,
) -> anyhow::Result<(Router, Router)> {
    let config = FirebaseConfig::from_env()?;
    let app = platform::firebase::initialize(config)?;
    tracing::info!(
        project_id = %app.config().project_id,
        "Firebase initialized"
    );

    let auth = AuthAdapter::new(Arc::new(FirebaseAuthBackend::from_app(app)), auth_config);
    let data = DataAdapter::new(Arc::new(FirestoreDocumentStore::from_app(app)), data_config);
    Ok((auth_router(auth), data_router(data)))
}

/// Routers backed by in-memory stores, optionally seeded with one account
fn in_memory_routes(auth_config: AuthConfig, data_config: DataConfig) -> (Router, Router) {
    let backend = match (env::var("BRIDGE_DEMO_EMAIL"), env::var("BRIDGE_DEMO_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            tracing::info!(email = %email, "Seeded demo account");
            InMemoryAuthBackend::new().with_user(&email, &password)
        }
        _ => InMemoryAuthBackend::new(),
    };

    let auth = AuthAdapter::new(Arc::new(backend), auth_config);
    let data = DataAdapter::new(Arc::new(InMemoryDocumentStore::new()), data_config);
    (auth_router(auth), data_router(data))
}
