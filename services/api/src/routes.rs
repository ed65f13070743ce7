use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use innovation_scoring::config::ScoringConfig;
use innovation_scoring::error::AppError;
use innovation_scoring::scoring::{
    compute_composite, compute_overall, rank, track, Candidate, CompletionReport, Composite,
    Criterion, FieldSet, FieldState, IdeaAssessment, IdeaScorecard, MatchRequest, MatchWeights,
    OverallScore, RankedCandidate, ReadinessTable,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct CompositeRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) criteria: Vec<Criterion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverallRequest {
    pub(crate) composites: Vec<CompositeRequest>,
    #[serde(default)]
    pub(crate) weights: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub(crate) bands: Option<ReadinessTable>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverallResponse {
    #[serde(flatten)]
    pub(crate) score: OverallScore,
    pub(crate) band: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    pub(crate) required_attributes: BTreeSet<String>,
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    #[serde(default)]
    pub(crate) weights: Option<MatchWeights>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankResponse {
    pub(crate) weights: MatchWeights,
    pub(crate) results: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionRequest {
    pub(crate) fields: Vec<FieldState>,
    #[serde(default)]
    pub(crate) status_table: Option<ReadinessTable>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletionResponse {
    #[serde(flatten)]
    pub(crate) report: CompletionReport,
    pub(crate) is_complete: bool,
    pub(crate) status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    pub(crate) score: f64,
    #[serde(default)]
    pub(crate) table: Option<ReadinessTable>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) score: f64,
    pub(crate) label: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdeaRequest {
    #[serde(flatten)]
    pub(crate) assessment: IdeaAssessment,
    #[serde(default)]
    pub(crate) bands: Option<ReadinessTable>,
}

/// Offline request envelope accepted by the `score` command.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum ScoringRequest {
    Composite(CompositeRequest),
    Overall(OverallRequest),
    Rank(RankRequest),
    Completion(CompletionRequest),
    Classify(ClassifyRequest),
    Idea(IdeaRequest),
}

impl ScoringRequest {
    pub(crate) fn evaluate(self, config: &ScoringConfig) -> Result<serde_json::Value, AppError> {
        let value = match self {
            ScoringRequest::Composite(request) => {
                serde_json::to_value(evaluate_composite(request)?)?
            }
            ScoringRequest::Overall(request) => {
                serde_json::to_value(evaluate_overall(request, config)?)?
            }
            ScoringRequest::Rank(request) => {
                serde_json::to_value(evaluate_rank(request, config)?)?
            }
            ScoringRequest::Completion(request) => {
                serde_json::to_value(evaluate_completion(request)?)?
            }
            ScoringRequest::Classify(request) => {
                serde_json::to_value(evaluate_classify(request, config))?
            }
            ScoringRequest::Idea(request) => {
                serde_json::to_value(evaluate_idea(request, config)?)?
            }
        };
        Ok(value)
    }
}

pub(crate) fn evaluate_composite(request: CompositeRequest) -> Result<Composite, AppError> {
    Ok(compute_composite(request.name, &request.criteria)?)
}

pub(crate) fn evaluate_overall(
    request: OverallRequest,
    config: &ScoringConfig,
) -> Result<OverallResponse, AppError> {
    let composites = request
        .composites
        .into_iter()
        .map(evaluate_composite)
        .collect::<Result<Vec<_>, _>>()?;
    let score = compute_overall(composites, request.weights.as_ref())?;
    let bands = request.bands.unwrap_or_else(|| config.score_bands());
    let band = bands.classify(f64::from(score.overall)).to_string();

    Ok(OverallResponse { score, band })
}

pub(crate) fn evaluate_rank(
    request: RankRequest,
    config: &ScoringConfig,
) -> Result<RankResponse, AppError> {
    let weights = request.weights.unwrap_or(config.match_weights);
    let match_request = MatchRequest {
        required_attributes: request.required_attributes,
    };
    let results = rank(&match_request, &request.candidates, weights, request.limit)?;
    debug!(returned = results.len(), "rank request served");

    Ok(RankResponse { weights, results })
}

pub(crate) fn evaluate_completion(
    request: CompletionRequest,
) -> Result<CompletionResponse, AppError> {
    let fields = FieldSet::new(
        request
            .fields
            .into_iter()
            .map(|field| (field.name, field.filled)),
    )?;
    let report = track(&fields);
    let table = request
        .status_table
        .unwrap_or_else(ReadinessTable::completion_status);
    let status = table
        .classify(f64::from(report.completion_percent))
        .to_string();

    Ok(CompletionResponse {
        is_complete: report.is_complete(),
        report,
        status,
    })
}

pub(crate) fn evaluate_classify(
    request: ClassifyRequest,
    config: &ScoringConfig,
) -> ClassifyResponse {
    let table = request.table.unwrap_or_else(|| config.score_bands());
    ClassifyResponse {
        score: request.score,
        label: table.classify(request.score).to_string(),
    }
}

pub(crate) fn evaluate_idea(
    request: IdeaRequest,
    config: &ScoringConfig,
) -> Result<IdeaScorecard, AppError> {
    let bands = request.bands.unwrap_or_else(|| config.score_bands());
    Ok(request.assessment.scorecard(&bands)?)
}

pub(crate) fn scoring_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/scoring/composite", post(composite_endpoint))
        .route("/api/v1/scoring/overall", post(overall_endpoint))
        .route("/api/v1/scoring/rank", post(rank_endpoint))
        .route("/api/v1/scoring/completion", post(completion_endpoint))
        .route("/api/v1/scoring/classify", post(classify_endpoint))
        .route("/api/v1/scoring/idea", post(idea_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn composite_endpoint(
    Json(payload): Json<CompositeRequest>,
) -> Result<Json<Composite>, AppError> {
    Ok(Json(evaluate_composite(payload)?))
}

pub(crate) async fn overall_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<OverallRequest>,
) -> Result<Json<OverallResponse>, AppError> {
    Ok(Json(evaluate_overall(payload, &state.scoring)?))
}

pub(crate) async fn rank_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    Ok(Json(evaluate_rank(payload, &state.scoring)?))
}

pub(crate) async fn completion_endpoint(
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, AppError> {
    Ok(Json(evaluate_completion(payload)?))
}

pub(crate) async fn classify_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    Json(evaluate_classify(payload, &state.scoring))
}

pub(crate) async fn idea_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<IdeaRequest>,
) -> Result<Json<IdeaScorecard>, AppError> {
    Ok(Json(evaluate_idea(payload, &state.scoring)?))
}
