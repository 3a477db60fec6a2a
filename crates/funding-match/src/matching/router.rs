use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::domain::{FundingSource, Match};
use super::intake::MatchRequest;
use super::repository::SourceRepository;
use super::service::{MatchError, MatchService};

/// Router builder exposing the match and catalog endpoints.
pub fn match_router<R>(service: Arc<MatchService<R>>, repository: Arc<R>) -> Router
where
    R: SourceRepository + 'static,
{
    Router::new()
        .route("/api/v1/match", post(match_handler::<R>))
        .route("/api/v1/sources", get(sources_handler::<R>))
        .with_state(RouterState {
            service,
            repository,
        })
}

pub(crate) struct RouterState<R> {
    service: Arc<MatchService<R>>,
    repository: Arc<R>,
}

impl<R> Clone for RouterState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            repository: self.repository.clone(),
        }
    }
}

/// Response envelope for a match pass.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub ok: bool,
    pub count: usize,
    pub matches: Vec<MatchView>,
}

/// Serialized match: scores rounded to one decimal, amounts untouched,
/// deadline as RFC 3339 or null.
#[derive(Debug, Serialize)]
pub struct MatchView {
    pub source: SourceView,
    pub overall_score: f64,
    pub eligibility_score: f64,
    pub success_probability: f64,
    pub effort_score: f64,
    pub timeline_score: f64,
    pub fit_score: f64,
    pub match_reasons: Vec<String>,
    pub eligibility_gaps: Vec<String>,
    pub competitive_advantages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SourceView {
    pub id: u64,
    pub name: String,
    pub provider_name: String,
    pub source_type: &'static str,
    pub min_amount: f64,
    pub max_amount: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub deadline_type: String,
    pub application_url: Option<String>,
    pub requirements_text: String,
}

const REQUIREMENTS_PREVIEW_LIMIT: usize = 500;

impl MatchView {
    pub fn from_match(matched: Match) -> Self {
        let Match {
            source,
            overall_score,
            scores,
            explanations,
        } = matched;

        Self {
            source: SourceView::from_source(source),
            overall_score: round1(overall_score),
            eligibility_score: round1(scores.eligibility),
            success_probability: round1(scores.success_probability),
            effort_score: round1(scores.effort),
            timeline_score: round1(scores.timeline),
            fit_score: round1(scores.fit),
            match_reasons: explanations.match_reasons,
            eligibility_gaps: explanations.eligibility_gaps,
            competitive_advantages: explanations.competitive_advantages,
        }
    }
}

impl SourceView {
    pub fn from_source(source: FundingSource) -> Self {
        let mut requirements_text = source.requirements_text;
        if requirements_text.chars().count() > REQUIREMENTS_PREVIEW_LIMIT {
            requirements_text = requirements_text
                .chars()
                .take(REQUIREMENTS_PREVIEW_LIMIT)
                .collect();
        }

        Self {
            id: source.id,
            name: source.name,
            provider_name: source.provider_name,
            source_type: source.source_type.label(),
            min_amount: source.min_amount,
            max_amount: source.max_amount,
            deadline: source.deadline,
            deadline_type: source.deadline_type,
            application_url: source.application_url,
            requirements_text,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) async fn match_handler<R>(
    State(state): State<RouterState<R>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    R: SourceRepository + 'static,
{
    let max_results = request.max_results();
    let profile = request.into_profile();

    match state.service.match_profile(&profile, max_results) {
        Ok(matches) => {
            let views: Vec<MatchView> = matches.into_iter().map(MatchView::from_match).collect();
            let body = MatchResponse {
                ok: true,
                count: views.len(),
                matches: views,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(MatchError::Repository(error)) => {
            let payload = json!({
                "ok": false,
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn sources_handler<R>(State(state): State<RouterState<R>>) -> Response
where
    R: SourceRepository + 'static,
{
    match state.repository.list_active() {
        Ok(sources) => {
            let views: Vec<SourceView> =
                sources.into_iter().map(SourceView::from_source).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
