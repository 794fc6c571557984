use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::domain::LoanApplication;
use super::repository::ProfileRepository;
use super::service::{DecisionServiceError, LoanDecisionService};

pub const DECISION_PATH: &str = "/loan-decision/application";

/// Router builder exposing the loan decision endpoint.
pub fn decision_router<R>(service: Arc<LoanDecisionService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(DECISION_PATH, post(decision_handler::<R>))
        .with_state(service)
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<LoanDecisionService<R>>>,
    payload: Result<Json<LoanApplication>, JsonRejection>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let Json(application) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    match service.decide(application) {
        Ok(decision) => (StatusCode::OK, Json(decision.view())).into_response(),
        Err(DecisionServiceError::InvalidInput(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(DecisionServiceError::InvalidProfile(_)) => {
            let payload = json!({ "error": "credit profile data is inconsistent" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Err(DecisionServiceError::LookupFailure(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}
