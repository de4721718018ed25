//! HTTP handlers for the REST API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use jetlag_core::{get_sleep_recommendations, RecommendationReport, TravelPlan};

use super::error::AppError;
use super::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Body of `POST /calculate`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    /// e.g. "America/New_York"
    pub origin_tz: String,
    /// e.g. "Europe/London"
    pub dest_tz: String,
    /// "YYYY-MM-DD HH:MM" in the origin zone
    pub departure_time: String,
    #[serde(default)]
    pub flight_duration_hours: f64,
}

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Jetlag Sleep Calculator API",
        "endpoints": {
            "/": "This message",
            "/calculate": "POST - Calculate jetlag sleep recommendations",
            "/timezones": "GET - List common timezones",
        }
    }))
}

/// GET /timezones
pub async fn list_timezones(State(state): State<AppState>) -> Json<Value> {
    let timezones: Map<String, Value> = state
        .catalog
        .entries()
        .iter()
        .map(|entry| (entry.name.clone(), Value::String(entry.display_label())))
        .collect();
    Json(json!({ "timezones": timezones }))
}

/// POST /calculate
pub async fn calculate(
    State(state): State<AppState>,
    request: Result<Json<CalculateRequest>, JsonRejection>,
) -> HandlerResult<RecommendationReport> {
    let Json(request) = request?;
    let plan = TravelPlan::from_input(
        &request.origin_tz,
        &request.dest_tz,
        &request.departure_time,
        request.flight_duration_hours,
    )?;
    let rec = get_sleep_recommendations(&plan, (state.clock)())?;

    tracing::info!(
        origin = %plan.origin(),
        destination = %plan.destination(),
        offset_hours = rec.offset_hours,
        "calculated recommendation"
    );

    Ok(Json(RecommendationReport::new(&rec, &plan, &state.catalog)))
}
