use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use newsfind_core::corpus::load_corpus;
use newsfind_core::{DocId, Document, RankingModel, SearchEngine, SearchError, SearchOptions, Thesaurus};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

type ApiError = (StatusCode, String);

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub boosts: bool,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: String,
    pub model: String,
    pub took_ms: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub id: DocId,
    pub score: f64,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub date: String,
    pub source: String,
    pub tags: Vec<String>,
}

impl SearchHit {
    fn new(doc: &Document, score: f64) -> Self {
        Self {
            id: doc.id,
            score,
            title: doc.title.clone(),
            summary: doc.summary.clone(),
            date: doc.date.clone(),
            source: doc.source.clone(),
            tags: doc.tags.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub corpus_path: PathBuf,
    pub admin_token: Option<String>,
}

/// Load the corpus at `corpus_path` and build the router around it.
pub fn build_app(corpus_path: PathBuf, thesaurus: Thesaurus) -> Result<Router> {
    let documents = load_corpus(&corpus_path)?;
    let engine = Arc::new(SearchEngine::with_documents(thesaurus, documents));
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    Ok(router(AppState { engine, corpus_path, admin_token }))
}

pub fn router(state: AppState) -> Router {
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn reject(err: SearchError) -> ApiError {
    let status = match err {
        SearchError::EmptyQuery | SearchError::UnknownModel(_) => StatusCode::BAD_REQUEST,
        SearchError::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, err.to_string())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let model = match params.model.as_deref() {
        Some(m) => m.parse::<RankingModel>().map_err(reject)?,
        None => RankingModel::default(),
    };
    let options = SearchOptions { model, field_boosts: params.boosts };
    let query = params.q.trim().to_string();

    let response = state
        .engine
        .search(&query, &options, |outcome| SearchResponse {
            query: query.clone(),
            mode: outcome.query.mode.to_string(),
            model: model.to_string(),
            took_ms: outcome.elapsed_ms,
            total_hits: outcome.len(),
            results: outcome.hits.iter().map(|h| SearchHit::new(h.document, h.score)).collect(),
        })
        .map_err(reject)?;
    Ok(Json(response))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<Document>, ApiError> {
    let index = state.engine.snapshot().map_err(reject)?;
    match index.document(doc_id) {
        Some(doc) => Ok(Json(doc.clone())),
        None => Err((StatusCode::NOT_FOUND, format!("article {doc_id} not found"))),
    }
}

async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, ApiError> {
    authorize(&state, &headers)?;
    let documents = load_corpus(&state.corpus_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    let index = state.engine.load(documents);
    tracing::info!(num_docs = index.num_docs(), "corpus reloaded");
    Ok(Json(serde_json::json!({ "num_docs": index.num_docs(), "num_terms": index.document_frequencies().len() })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
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
