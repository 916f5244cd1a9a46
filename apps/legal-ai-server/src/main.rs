//! Legal Document Simplifier Server
//!
//! Serves a single-page UI and a JSON API for:
//!
//! - Document upload and text preview (PDF/DOCX/TXT)
//! - Plain-English summaries and a sidebar clause explainer
//! - Keyword risk clause highlighting with per-clause risk ratings
//! - Executive summary, risk distribution chart and keyword glossary
//! - A contract Q&A chat assistant
//!
//! ## Architecture
//!
//! All language work is delegated to a hosted Gemini model. Each request maps
//! to one action on an in-memory session. Sessions are never persisted and
//! are discarded when the page ends them or after an idle timeout.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use clause_engine::RISK_KEYWORDS;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod llm;
mod state;
#[cfg(test)]
mod tests;

use api::{
    handle_analysis, handle_chat_state, handle_chat_toggle, handle_clause_action,
    handle_create_session, handle_end_session, handle_explain, handle_glossary, handle_health,
    handle_index, handle_insights, handle_keywords, handle_preview, handle_send_chat,
    handle_simplify, handle_upload,
};
use llm::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Command-line arguments for the legal document server
#[derive(Parser, Debug)]
#[command(name = "legal-ai-server")]
#[command(about = "Legal document simplifier with risk clause analysis and contract Q&A")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Maximum upload request size in megabytes
    #[arg(long, default_value = "25")]
    max_upload_mb: usize,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: String,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Gemini REST base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    gemini_base_url: String,

    /// Timeout for each Gemini request in seconds (none by default)
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Idle minutes before a session is discarded
    #[arg(long, env = "SESSION_TTL_MINS", default_value = "60")]
    session_ttl_mins: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Routes shared by the binary and the test suite
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let sessions = Router::new()
        .route("/", post(handle_create_session))
        .route("/:id", axum::routing::delete(handle_end_session))
        .route("/:id/document", post(handle_upload).get(handle_preview))
        .route("/:id/simplify", post(handle_simplify))
        .route("/:id/explain", post(handle_explain))
        .route("/:id/analysis", post(handle_analysis))
        .route("/:id/insights", post(handle_insights))
        .route("/:id/clauses/:index/:action", post(handle_clause_action))
        .route("/:id/chat", get(handle_chat_state).post(handle_send_chat))
        .route("/:id/chat/toggle", post(handle_chat_toggle));

    Router::new()
        .route("/", get(handle_index))
        // Health check
        .route("/health", get(handle_health))
        // Reference data
        .route("/api/glossary", get(handle_glossary))
        .route("/api/keywords", get(handle_keywords))
        // Session actions
        .nest("/api/sessions", sessions)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting legal-ai-server on {}:{}", args.host, args.port);

    let generator = GeminiClient::new(GeminiConfig {
        api_key: args.gemini_api_key.clone(),
        model: args.model.clone(),
        base_url: args.gemini_base_url.clone(),
        timeout: args.request_timeout_secs.map(Duration::from_secs),
    })?;

    let state = AppState::new(
        Arc::new(generator),
        RISK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    );

    // Discard idle sessions
    let sessions = state.sessions.clone();
    let session_ttl = Duration::from_secs(args.session_ttl_mins * 60);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.sweep_idle(session_ttl).await;
        }
    });

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state, args.max_upload_mb * 1024 * 1024)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Model: {}", args.model);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Session idle timeout: {} minutes", args.session_ttl_mins);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
