//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::core::client::Relay;
use crate::core::config::ServerConfig;
use crate::core::errors::RelayError;
use crate::core::models::TranslationRequest;

/// Caller-facing error messages
pub const EMPTY_TEXT_MESSAGE: &str = "Texto vacío";
pub const INVALID_BODY_MESSAGE: &str = "Cuerpo JSON inválido";
pub const MISSING_KEY_MESSAGE: &str = "Falta GROQ_API_KEY en .env";
pub const UPSTREAM_MESSAGE: &str = "Error al llamar a Groq API";
pub const INTERNAL_MESSAGE: &str = "Error interno del servidor";

/// Application state
#[derive(Clone)]
pub struct AppState {
    relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    model: String,
    style: String,
}

/// Body of `POST /api/traducir`
#[derive(Debug, Deserialize)]
pub struct TraducirRequest {
    #[serde(default)]
    pub texto: Option<String>,
}

/// Successful translation
#[derive(Debug, Serialize)]
pub struct TraducirResponse {
    pub traduccion: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error as seen by HTTP callers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::EmptyText => ApiError::new(StatusCode::BAD_REQUEST, EMPTY_TEXT_MESSAGE),
            RelayError::MissingApiKey => {
                error!("Translation requested without GROQ_API_KEY");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE)
            }
            ref e if e.is_upstream() => {
                warn!("Upstream call failed: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_MESSAGE)
            }
            e => {
                error!("Error en /api/traducir: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message.to_string(),
        });
        (self.status, body).into_response()
    }
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.relay.config();
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: config.model.clone(),
        style: config.style.name().to_string(),
    })
}

/// Translation handler
async fn traducir(
    State(state): State<AppState>,
    payload: Result<Json<TraducirRequest>, JsonRejection>,
) -> Result<Json<TraducirResponse>, ApiError> {
    let texto = match payload {
        Ok(Json(payload)) => payload.texto,
        // Non-JSON content types carry no fields
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            return Err(ApiError::new(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE));
        }
    };

    let request = TranslationRequest::new(texto.unwrap_or_default());
    let result = state.relay.translate(&request).await?;

    Ok(Json(TraducirResponse {
        traduccion: result.translation,
    }))
}

/// Build the router, with a static fallback when the directory exists
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/traducir", post(traducir));

    if let Some(dir) = server.static_dir.as_ref().filter(|dir| dir.is_dir()) {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener; `host` may be a name, IPv4 or IPv6 address
pub async fn bind_listener(server: &ServerConfig) -> anyhow::Result<tokio::net::TcpListener> {
    let listener = tokio::net::TcpListener::bind((server.host.as_str(), server.port)).await?;
    Ok(listener)
}

/// Run the HTTP server
pub async fn run_server(relay: Relay, server: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(relay);
    let app = build_router(state, &server);

    let listener = bind_listener(&server).await?;
    info!("Servidor (Groq) funcionando en http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
