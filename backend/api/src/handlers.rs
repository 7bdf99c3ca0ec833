use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::models::{
    DrivingSchool, DrivingSchoolData, DrivingSchoolInput, SchoolDirectory, SchoolStats,
};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    state::AppState,
    validation::{
        check_field, extractors::body_rejection, validate_school, FieldError, SchoolField,
        UnknownField, ValidatedJson, ValidationErrors,
    },
};

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();
    let schools = state.store.count().await;

    tracing::debug!(uptime_secs = uptime, schools, "health check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": now,
            "uptime_secs": uptime,
            "schools": schools
        })),
    )
}

/// Prometheus text exposition of the service registry
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        metrics::gather_metrics(&state.registry),
    )
}

/// School list page: every school plus the aggregate stats
pub async fn list_schools(State(state): State<AppState>) -> Json<SchoolDirectory> {
    Json(SchoolDirectory::new(state.store.list().await))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<SchoolStats> {
    Json(state.store.stats().await)
}

pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DrivingSchool>> {
    Ok(Json(state.store.get(id).await?))
}

pub async fn create_school(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<DrivingSchoolInput>, ValidationErrors>,
) -> Result<(StatusCode, Json<DrivingSchool>), ValidationErrors> {
    let ValidatedJson(data) = payload.map_err(|errors| {
        metrics::observe_validation_failure(&errors);
        tracing::info!(fields = ?errors.fields(), "driving school rejected");
        errors
    })?;

    let school = state.store.create(data).await;
    metrics::SCHOOLS_CREATED.inc();
    Ok((StatusCode::CREATED, Json(school)))
}

/// Save the edit form for an existing school
pub async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<ValidatedJson<DrivingSchoolInput>, ValidationErrors>,
) -> Result<Json<DrivingSchool>, Response> {
    let ValidatedJson(data) = payload.map_err(|errors| {
        metrics::observe_validation_failure(&errors);
        tracing::info!(school_id = %id, fields = ?errors.fields(), "driving school edit rejected");
        errors.into_response()
    })?;

    let school = state
        .store
        .update(id, data)
        .await
        .map_err(|err| ApiError::from(err).into_response())?;
    Ok(Json(school))
}

#[derive(Debug, Serialize)]
pub struct ValidSchool {
    pub valid: bool,
    pub school: DrivingSchoolData,
}

/// Dry run of the full pipeline, as done on submit
pub async fn validate_school_payload(
    payload: Result<Json<DrivingSchoolInput>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(body_rejection)
        .and_then(|Json(input)| validate_school(&input));

    match result {
        Ok(school) => (
            StatusCode::OK,
            Json(ValidSchool {
                valid: true,
                school,
            }),
        )
            .into_response(),
        Err(errors) => {
            metrics::observe_validation_failure(&errors);
            errors.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct FieldCheck {
    pub field: &'static str,
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// Per-field check for live form feedback
pub async fn validate_single_field(
    Path(field): Path<String>,
    payload: Result<Json<FieldValue>, JsonRejection>,
) -> Result<Json<FieldCheck>, Response> {
    let field: SchoolField = field.parse().map_err(|err: UnknownField| {
        ApiError::not_found("UnknownField", err.to_string()).into_response()
    })?;
    let Json(FieldValue { value }) = payload.map_err(|err| body_rejection(err).into_response())?;

    let errors = match check_field(field, &value) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.into_errors(),
    };

    Ok(Json(FieldCheck {
        field: field.key(),
        valid: errors.is_empty(),
        errors,
    }))
}

pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"})))
}
