//! HTTP routes and server startup.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use tokio::task::AbortHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::error::{ApiError, MESSAGE_REQUIRED};
use super::types::{ChatRequest, ChatResponse, HealthResponse};
use crate::agent::{build_agent, Agent, AgentInfo};
use crate::config::{Config, SERVICE_NAME};
use crate::llm::GeminiClient;

/// Process-wide state, built once and shared read-only by every handler.
pub struct AppState {
    pub config: Config,
    pub agent: Arc<Agent>,
}

/// Build the router: API routes first, everything else from the UI bundle.
pub fn router(state: Arc<AppState>) -> Router {
    let static_files =
        ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/agent", get(agent_info))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the agent from `config` and serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm = Arc::new(GeminiClient::new(
        config.api_key.clone(),
        config.gemini_base_url.clone(),
    )?);
    let agent = Arc::new(build_agent(&config, llm)?);
    info!(
        agent = agent.name(),
        tools = agent.tools().len(),
        "Agent ready"
    );

    let addr = format!("{}:{}", config.host, config.port);
    if !config.static_dir.is_dir() {
        warn!(
            path = %config.static_dir.display(),
            "Static UI directory not found; only API routes will respond"
        );
    }

    let state = Arc::new(AppState { config, agent });
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Aborts the agent task when the request future is dropped.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// GET /health - Liveness probe; never touches the agent.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /api/agent - Describe the configured agent and its tools.
async fn agent_info(State(state): State<Arc<AppState>>) -> Json<AgentInfo> {
    Json(state.agent.info())
}

/// POST /api/chat - Run one message through the agent.
async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let message = request
        .validated_message()
        .ok_or_else(|| ApiError::InvalidInput(MESSAGE_REQUIRED.to_string()))?
        .to_string();

    info!(bytes = message.len(), "Chat request");

    // The agent runs on its own task so a panic surfaces as a JoinError
    // instead of tearing down the connection. The deadline lives inside the
    // task and the guard aborts it if the client goes away first.
    let agent = state.agent.clone();
    let timeout = state.config.agent_timeout;
    let task = tokio::spawn(async move {
        tokio::time::timeout(timeout, agent.process(&message)).await
    });
    let _guard = AbortOnDrop(task.abort_handle());

    match task.await {
        Ok(Ok(Ok(response))) => Ok(Json(ChatResponse { response })),
        Ok(Ok(Err(e))) => {
            warn!(error = %e, "Agent failed");
            Err(ApiError::AgentFailure(e))
        }
        Ok(Err(_)) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Agent timed out");
            Err(ApiError::Timeout(timeout))
        }
        Err(e) => {
            error!(error = %e, "Agent task aborted");
            Err(ApiError::Internal)
        }
    }
}
