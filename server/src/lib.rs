mod catalog;
mod error;
mod routes;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use config::Config;
use fitquest_core::Catalog;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::catalog::{load_catalog, parse_catalog};
pub use crate::error::{AppError, AppResult};

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    cors_origins: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    server: ServerConfig,
    #[serde(default)]
    catalog: CatalogConfig,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

pub fn build_router(state: AppState, cors_layer: CorsLayer) -> Router {
    routes::api()
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

fn load_config() -> AppResult<AppConfig> {
    Config::builder()
        .set_default("server.port", i64::from(DEFAULT_PORT))
        .map_err(|err| AppError::Internal(format!("failed to set config default: {err}")))?
        .add_source(
            config::Environment::with_prefix("FITQUEST")
                .separator("__")
                .list_separator(",")
                .try_parsing(true)
                .with_list_parse_key("server.cors_origins"),
        )
        .build()
        .map_err(|err| AppError::Internal(format!("failed to load config: {err}")))?
        .try_deserialize()
        .map_err(|err| AppError::Internal(format!("failed to parse config: {err}")))
}

fn build_cors_layer(origins: &[String]) -> AppResult<CorsLayer> {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .map_err(|err| AppError::Internal(format!("invalid CORS origin '{origin}': {err}")))
        })
        .collect::<Result<_, _>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(allowed_origins)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,fitquest_server=info,tower_http=warn"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(env_filter);

    let _ = subscriber.try_init();
}

pub async fn run() -> AppResult<()> {
    init_tracing();

    let app_config = load_config()?;
    let cors_layer = build_cors_layer(&app_config.server.cors_origins)?;

    let catalog = load_catalog(app_config.catalog.path.as_deref()).await?;

    let app = build_router(
        AppState {
            catalog: Arc::new(catalog),
        },
        cors_layer,
    );

    let addr: SocketAddr = ([0, 0, 0, 0], app_config.server.port).into();
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
