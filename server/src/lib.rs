use anyhow::Result;
use axum::{extract::{Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use spellcore::persist::{load_index, IndexPaths};
use spellcore::{
    DirectSpellChecker, IndexHandle, QueryConverter, SpellCheckerConfig, SpellError, SpellRequest,
    SpellcheckResponse, SpellingQueryConverter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellParams {
    #[serde(default)]
    pub q: String,
    pub count: Option<usize>,
    pub only_more_popular: Option<bool>,
    pub extended_results: Option<bool>,
    pub accuracy: Option<f32>,
}

#[derive(Serialize)]
pub struct SpellResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub spellcheck: SpellcheckResponse,
}

#[derive(Clone)]
pub struct AppState {
    pub index_paths_root: PathBuf,
    pub index: Arc<IndexHandle>,
    pub checker: Arc<DirectSpellChecker>,
    pub converter: SpellingQueryConverter,
    pub admin_token: Option<String>,
}

pub fn build_app(index_dir: String, config: SpellCheckerConfig) -> Result<Router> {
    // Load the persisted index and validate the spellchecker against its schema at startup
    let index_paths = IndexPaths::new(&index_dir);
    let index = load_index(&index_paths)?;
    let checker = DirectSpellChecker::configure(config, &index.schema)?;
    let analyzer = index.schema.spellcheck_field(checker.field())?.analyzer;
    let handle = IndexHandle::from_index(&index)?;
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState {
        index_paths_root: PathBuf::from(&index_dir),
        index: Arc::new(handle),
        checker: Arc::new(checker),
        converter: SpellingQueryConverter::new(analyzer),
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/spell", get(spell_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn spell_handler(State(state): State<AppState>, Query(params): Query<SpellParams>) -> Result<Json<SpellResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let tokens = state.converter.convert(&params.q);
    let request = SpellRequest {
        count: params.count,
        only_more_popular: params.only_more_popular,
        extended_results: params.extended_results,
        accuracy: params.accuracy,
    };
    let extended = request.extended_results.unwrap_or(state.checker.config().extended_results);
    let result = state.checker.check(&state.index, tokens, &request).map_err(internal_error)?;
    tracing::debug!(query = %params.q, tokens = result.len(), correctly_spelled = result.correctly_spelled(), "spellcheck");

    let elapsed = start.elapsed();
    Ok(Json(SpellResponse {
        query: params.q,
        took_ms: elapsed.as_millis(),
        took_s: elapsed.as_secs_f64(),
        spellcheck: result.render(extended),
    }))
}

fn internal_error(err: SpellError) -> (StatusCode, String) {
    tracing::error!(error = %err, "spellcheck failed");
    let status = match err {
        SpellError::NoSnapshot => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

// --- Admin endpoints ---
async fn reload_handler(State(state): State<AppState>, headers: axum::http::HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let index = load_index(&IndexPaths::new(&state.index_paths_root))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("reload failed: {e:#}")))?;
    state.index.publish(&index).map_err(internal_error)?;
    Ok(Json(serde_json::json!({ "reloaded": true, "num_docs": index.num_docs })))
}

fn authorize(state: &AppState, headers: &axum::http::HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
