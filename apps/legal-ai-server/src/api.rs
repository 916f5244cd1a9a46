//! API handlers for the legal document server
//!
//! Every session endpoint is one user action. The session stays locked until
//! the action completes, so actions on one session never interleave.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clause_engine::{ChatState, ClauseAction, RiskAnalysis, RiskInsights, GLOSSARY};
use serde::{Deserialize, Serialize};
use shared_types::{ChatTurn, GlossaryEntry, MediaType};
use tracing::info;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Handler: GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "legal-ai-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct GlossaryResponse {
    pub success: bool,
    pub entries: Vec<GlossaryEntry>,
}

/// Handler: GET /api/glossary
pub async fn handle_glossary() -> Json<GlossaryResponse> {
    Json(GlossaryResponse {
        success: true,
        entries: GLOSSARY.to_vec(),
    })
}

#[derive(Serialize)]
pub struct KeywordsResponse {
    pub success: bool,
    pub keywords: Vec<String>,
}

/// Handler: GET /api/keywords
pub async fn handle_keywords(State(state): State<AppState>) -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        success: true,
        keywords: state.keywords.as_ref().clone(),
    })
}

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub success: bool,
    pub session_id: Uuid,
}

/// Handler: POST /api/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let session_id = state.sessions.create().await;
    Json(SessionCreatedResponse {
        success: true,
        session_id,
    })
}

/// Handler: DELETE /api/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload request body
#[derive(Deserialize)]
pub struct UploadRequest {
    /// Original file name (e.g., "lease.pdf")
    pub name: String,

    /// Declared MIME type; guessed from the file name when absent
    pub media_type: Option<String>,

    /// Base64-encoded file content
    pub data_base64: String,
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub success: bool,
    pub name: String,
    pub media_type: MediaType,
    pub char_count: usize,
    pub preview: String,
}

/// Handler: POST /api/sessions/:id/document
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<DocumentResponse>, ServerError> {
    let session = state.sessions.get(id).await?;

    let data = STANDARD
        .decode(req.data_base64.trim())
        .map_err(|e| ServerError::InvalidRequest(format!("data_base64 is not valid base64: {}", e)))?;
    let media_type = resolve_media_type(req.media_type.as_deref(), &req.name);
    info!("Upload: name={}, type={}, bytes={}", req.name, media_type.mime(), data.len());

    let document = tokio::task::spawn_blocking(move || {
        doc_extract::load_document(&req.name, media_type, &data)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("extraction task failed: {}", e)))??;

    let response = DocumentResponse {
        success: true,
        name: document.name.clone(),
        media_type: document.media_type,
        char_count: document.raw_text.chars().count(),
        preview: document.preview(),
    };

    session.lock().await.upload(document);

    Ok(Json(response))
}

/// Declared MIME type wins; otherwise use the extension
pub fn resolve_media_type(declared: Option<&str>, file_name: &str) -> MediaType {
    match declared {
        Some(mime) if !mime.trim().is_empty() => MediaType::from_mime(mime),
        _ => MediaType::from_file_name(file_name),
    }
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub name: String,
    pub preview: String,
}

/// Handler: GET /api/sessions/:id/document
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    let preview = session.preview()?;
    let name = session
        .document
        .as_ref()
        .map(|d| d.name.clone())
        .unwrap_or_default();

    Ok(Json(PreviewResponse {
        success: true,
        name,
        preview,
    }))
}

#[derive(Serialize)]
pub struct TextResponse {
    pub success: bool,
    pub text: String,
}

/// Handler: POST /api/sessions/:id/simplify
pub async fn handle_simplify(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TextResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let text = session
        .lock()
        .await
        .simplify_document(state.generator.as_ref())
        .await?;
    Ok(Json(TextResponse { success: true, text }))
}

#[derive(Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub clause: String,
}

/// Handler: POST /api/sessions/:id/explain
pub async fn handle_explain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ExplainRequest>,
) -> Result<Json<TextResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let text = session
        .lock()
        .await
        .explain_clause(&req.clause, state.generator.as_ref())
        .await?;
    Ok(Json(TextResponse { success: true, text }))
}

#[derive(Serialize)]
pub struct AnalysisResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub result: T,
}

/// Handler: POST /api/sessions/:id/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResponse<RiskAnalysis>>, ServerError> {
    let session = state.sessions.get(id).await?;
    let result = session
        .lock()
        .await
        .analyze_risk(state.generator.as_ref(), state.keywords.as_slice())
        .await?;

    info!(
        "Risk analysis: {} clauses, {} failures",
        result.cards.len(),
        result.failures.len()
    );
    Ok(Json(AnalysisResponse {
        success: true,
        result,
    }))
}

/// Handler: POST /api/sessions/:id/insights
pub async fn handle_insights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResponse<RiskInsights>>, ServerError> {
    let session = state.sessions.get(id).await?;
    let result = session
        .lock()
        .await
        .risk_insights(state.generator.as_ref(), state.keywords.as_slice())
        .await?;

    Ok(Json(AnalysisResponse {
        success: true,
        result,
    }))
}

/// Parse the `:action` path segment of a clause card button
pub fn parse_clause_action(action: &str) -> Result<ClauseAction, ServerError> {
    match action.to_lowercase().as_str() {
        "explain" => Ok(ClauseAction::Explain),
        "suggest" | "suggest_fair_terms" => Ok(ClauseAction::SuggestFairTerms),
        other => Err(ServerError::InvalidRequest(format!(
            "Unknown clause action '{}'. Must be 'explain' or 'suggest'",
            other
        ))),
    }
}

/// Handler: POST /api/sessions/:id/clauses/:index/:action
pub async fn handle_clause_action(
    State(state): State<AppState>,
    Path((id, index, action)): Path<(Uuid, usize, String)>,
) -> Result<Json<TextResponse>, ServerError> {
    let action = parse_clause_action(&action)?;
    let session = state.sessions.get(id).await?;
    let text = session
        .lock()
        .await
        .clause_action(index, action, state.generator.as_ref())
        .await?;
    Ok(Json(TextResponse { success: true, text }))
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(flatten)]
    pub chat: ChatState,
}

/// Handler: GET /api/sessions/:id/chat
pub async fn handle_chat_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let chat = session.lock().await.chat.clone();
    Ok(Json(ChatResponse {
        success: true,
        chat,
    }))
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub expanded: bool,
}

/// Handler: POST /api/sessions/:id/chat/toggle
pub async fn handle_chat_toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let expanded = session.lock().await.toggle_chat();
    Ok(Json(ToggleResponse {
        success: true,
        expanded,
    }))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatReplyResponse {
    pub success: bool,
    pub reply: ChatTurn,
    pub transcript: Vec<ChatTurn>,
}

/// Handler: POST /api/sessions/:id/chat
pub async fn handle_send_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReplyResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    let reply = session
        .send_chat(&req.message, state.generator.as_ref())
        .await?;
    let transcript = session.chat.transcript.clone();

    Ok(Json(ChatReplyResponse {
        success: true,
        reply,
        transcript,
    }))
}
