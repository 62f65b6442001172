use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use stage_flow::Pipeline;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::Config;
use crate::firecrawl::FirecrawlClient;
use crate::llm::OpenRouterLlm;
use crate::models::{ResearchRequest, ResearchResponse, ResearchState};
use crate::workflow::{build_research_pipeline, run_research};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline<ResearchState>>,
}

/// Build the HTTP application around one shared pipeline. Each request runs
/// against its own fresh state, so concurrent queries never interact.
pub fn create_app(config: &Config) -> Router {
    let search = Arc::new(FirecrawlClient::new(config.firecrawl_api_key.clone()));
    let llm = Arc::new(OpenRouterLlm::new(
        &config.openrouter_api_key,
        config.model.clone(),
    ));
    let pipeline = Arc::new(build_research_pipeline(search, llm));

    build_router(AppState { pipeline })
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/research", post(run_research_query))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Drug Research Service",
        "version": "0.1.0",
        "description": "Drug interaction, dosage and alternative-medication research",
        "endpoints": {
            "POST /research": "Run a research query",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn run_research_query(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> ApiResult<ResearchResponse> {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return Err(bad_request_error("Query is required"));
    }

    let research_id = Uuid::new_v4().to_string();
    info!(research_id = %research_id, query = %query, "Starting research run");

    match run_research(&state.pipeline, &query).await {
        Ok(final_state) => {
            info!(
                research_id = %research_id,
                drugs = final_state.drug_info.len(),
                interactions = final_state.interactions.len(),
                "Research run completed"
            );
            Ok(Json(ResearchResponse {
                research_id,
                query,
                state: final_state,
            }))
        }
        Err(e) => {
            error!(research_id = %research_id, error = %e, "Research run failed");
            Err(internal_error("Research run failed", &e.to_string()))
        }
    }
}
