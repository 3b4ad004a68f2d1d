use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use littlesearch_core::tokenizer::keyword;
use littlesearch_core::{build_index, Corpus, Hit, IndexStats, KeywordIndex, NoiseWords, Occurrence, TOP_K};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub kw1: String,
    #[serde(default)]
    pub kw2: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { TOP_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub kw1: String,
    pub kw2: String,
    pub took_s: f64,
    /// `null` when neither keyword is indexed.
    pub results: Option<Vec<Hit>>,
}

#[derive(Serialize)]
pub struct KeywordResponse {
    pub keyword: String,
    pub occurrences: Vec<Occurrence>,
}

pub struct AppConfig {
    pub corpus: Corpus,
    pub admin_token: Option<String>,
}

impl AppConfig {
    /// Admin token from `ADMIN_TOKEN`; rebuilds are refused when it is unset.
    pub fn from_env(corpus: Corpus) -> Self {
        Self { corpus, admin_token: std::env::var("ADMIN_TOKEN").ok() }
    }
}

/// A fully built index together with the noise words it was built with.
pub struct Snapshot {
    pub index: KeywordIndex,
    pub noise: NoiseWords,
}

impl Snapshot {
    pub fn load(corpus: &Corpus) -> littlesearch_core::Result<Self> {
        let noise = corpus.noise_words()?;
        let (documents, source) = corpus.documents()?;
        let index = build_index(&documents, &source, &noise)?;
        Ok(Self { index, noise })
    }

    /// Normalize a query word the way document text was normalized.
    fn query_keyword(&self, word: &str) -> String {
        keyword(word, &self.noise).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
    pub admin_token: Option<String>,
    /// Replaced wholesale on rebuild; readers never see a partially merged index.
    pub snapshot: Arc<RwLock<Arc<Snapshot>>>,
}

impl AppState {
    fn current(&self) -> Arc<Snapshot> { self.snapshot.read().clone() }
}

pub fn build_app(config: AppConfig) -> Result<Router> {
    // Build the index at startup
    let snapshot = Snapshot::load(&config.corpus)?;
    let stats = snapshot.index.stats();
    tracing::info!(documents = stats.documents, keywords = stats.keywords, "index ready");
    let app_state = AppState {
        corpus: Arc::new(config.corpus),
        admin_token: config.admin_token,
        snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
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
        .route("/search", get(search_handler))
        .route("/keyword/:keyword", get(keyword_handler))
        .route("/stats", get(stats_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let snapshot = state.current();
    let kw1 = snapshot.query_keyword(&params.kw1);
    let kw2 = snapshot.query_keyword(&params.kw2);
    let k = params.k.clamp(1, MAX_K);
    let results = snapshot.index.search(&kw1, &kw2, k);

    let elapsed = start.elapsed();
    Json(SearchResponse { kw1, kw2, took_s: elapsed.as_secs_f64(), results })
}

pub async fn keyword_handler(State(state): State<AppState>, Path(word): Path<String>) -> Result<Json<KeywordResponse>, (StatusCode, String)> {
    let snapshot = state.current();
    let kw = snapshot.query_keyword(&word);
    match snapshot.index.occurrences(&kw) {
        Some(occs) => Ok(Json(KeywordResponse { keyword: kw, occurrences: occs.to_vec() })),
        None => Err((StatusCode::NOT_FOUND, format!("keyword not indexed: {word}"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.current().index.stats())
}

// --- Admin endpoints ---
async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<IndexStats>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let corpus = state.corpus.clone();
    let snapshot = tokio::task::spawn_blocking(move || Snapshot::load(&corpus))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            let status = if e.is_not_found() { StatusCode::NOT_FOUND } else { StatusCode::INTERNAL_SERVER_ERROR };
            (status, e.to_string())
        })?;

    let stats = snapshot.index.stats();
    *state.snapshot.write() = Arc::new(snapshot);
    tracing::info!(documents = stats.documents, keywords = stats.keywords, "index rebuilt");
    Ok(Json(stats))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        tracing::warn!("rejected admin request with invalid token");
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
