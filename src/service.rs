use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::analysis::{AnalysisResponder, parse_view_flag};
use crate::export::{EXPORT_FILENAME, render_report};
use crate::models::{AnalysisInput, ReportPayload};
use crate::store::{MongoSessionStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub responder: AnalysisResponder,
    pub store: Arc<dyn SessionStore>,
}

pub async fn create_app() -> Router {
    let store = Arc::new(MongoSessionStore::from_env().await);
    build_router(store)
}

pub fn build_router(store: Arc<dyn SessionStore>) -> Router {
    let state = AppState {
        responder: AnalysisResponder::new(store.clone()),
        store,
    };

    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze))
        .route("/export", post(export_report))
        .route("/test", get(store_status))
        // Media uploads are discarded but must still fit through the body limit
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "RAFAEL backend running" }))
}

/// Reads the multipart form permissively: unknown fields are ignored,
/// uploaded media contributes only its filename, and the body content is
/// discarded. Always answers 200 with the report.
async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Json<ReportPayload> {
    let mut role = String::new();
    let mut simple_view = String::from("false");
    let mut symptoms = None;
    let mut vitals = None;
    let mut history = None;
    let mut image_filename = None;
    let mut video_filename = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "role" => role = field.text().await.unwrap_or_default(),
            "simple_view" => simple_view = field.text().await.unwrap_or_default(),
            "symptoms" => symptoms = Some(field.text().await.unwrap_or_default()),
            "vitals" => vitals = Some(field.text().await.unwrap_or_default()),
            "history" => history = Some(field.text().await.unwrap_or_default()),
            // Browsers send an empty filename for unselected file inputs;
            // those count as absent.
            "image" => {
                image_filename = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
            }
            "video" => {
                video_filename = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
            }
            _ => {}
        }
    }

    let input = AnalysisInput {
        role,
        simple_view: parse_view_flag(&simple_view),
        symptoms,
        vitals,
        history,
        image_filename,
        video_filename,
    };

    Json(state.responder.analyze(input).await)
}

/// Streams the rendered report as a download. The bytes are plain text but
/// the media type stays `application/pdf` for wire compatibility with the
/// existing frontend.
async fn export_report(Json(data): Json<Value>) -> impl IntoResponse {
    let content = render_report(&data);
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        content,
    )
}

async fn store_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "backend": "✅ Running",
        "database": if state.store.is_available() {
            "✅ Available"
        } else {
            "❌ Not Available"
        },
    }))
}
