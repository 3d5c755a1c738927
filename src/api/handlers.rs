use axum::{extract::State, http::StatusCode, Json};
use utoipa::OpenApi;

use super::{
    dto::{
        FanState, GraphParams, LightState, SensorDataRequest, SensorReadingDto, SettingsDto,
        SettingsRequest,
    },
    errors::AppError,
    extract::{AppJson, AppQuery},
    state::AppState,
};
use crate::db::models::WriteOutcome;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Create the settings record, or replace the existing one.
///
/// `user_light` may be `"sunset"`, in which case today's sunset time at the
/// hub's location is looked up. `light_off_time` is `user_light +
/// light_duration` on the 24-hour clock.
#[utoipa::path(
    put,
    path = "/settings",
    request_body = SettingsRequest,
    responses(
        (status = 200, description = "Existing settings updated", body = SettingsDto),
        (status = 201, description = "Settings created", body = SettingsDto),
        (status = 400, description = "Malformed time or duration"),
        (status = 502, description = "Sunset lookup failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "settings"
)]
pub async fn put_settings(
    State(state): State<AppState>,
    AppJson(body): AppJson<SettingsRequest>,
) -> Result<(StatusCode, Json<SettingsDto>), AppError> {
    let write = state.settings.write_settings(body.into()).await?;

    let status = match write.outcome {
        WriteOutcome::Created => StatusCode::CREATED,
        WriteOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(write.settings.into())))
}

// ---------------------------------------------------------------------------
// Sensor data
// ---------------------------------------------------------------------------

/// Record a sensor reading stamped with the server's time of day.
#[utoipa::path(
    post,
    path = "/sensorData",
    request_body = SensorDataRequest,
    responses(
        (status = 201, description = "Reading recorded", body = SensorReadingDto),
        (status = 400, description = "Invalid reading"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn post_sensor_data(
    State(state): State<AppState>,
    AppJson(body): AppJson<SensorDataRequest>,
) -> Result<(StatusCode, Json<SensorReadingDto>), AppError> {
    let reading = state.sensors.record_sensor(body.into()).await?;
    Ok((StatusCode::CREATED, Json(reading.into())))
}

/// Recent sensor readings for charting, oldest first.
#[utoipa::path(
    get,
    path = "/graph",
    params(
        ("size" = Option<u32>, Query, description = "Return only the N most recent readings"),
    ),
    responses(
        (status = 200, description = "Sensor readings", body = Vec<SensorReadingDto>),
        (status = 400, description = "Invalid size"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn get_graph(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GraphParams>,
) -> Result<Json<Vec<SensorReadingDto>>, AppError> {
    let readings = state.sensors.history(params.size).await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Whether the fan should run, from the latest reading and the settings.
#[utoipa::path(
    get,
    path = "/fan",
    responses(
        (status = 200, description = "Fan state", body = FanState),
        (status = 409, description = "No sensor reading or settings yet"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "control"
)]
pub async fn get_fan(State(state): State<AppState>) -> Result<Json<FanState>, AppError> {
    let fan = state.control.evaluate_fan().await?;
    Ok(Json(FanState { fan }))
}

/// Whether the light should be on, from the latest reading and the settings.
#[utoipa::path(
    get,
    path = "/light",
    responses(
        (status = 200, description = "Light state", body = LightState),
        (status = 409, description = "No sensor reading or settings yet"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "control"
)]
pub async fn get_light(State(state): State<AppState>) -> Result<Json<LightState>, AppError> {
    let light = state.control.evaluate_light().await?;
    Ok(Json(LightState { light }))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(put_settings, post_sensor_data, get_graph, get_fan, get_light, health),
    components(schemas(
        SettingsRequest,
        SettingsDto,
        SensorDataRequest,
        SensorReadingDto,
        FanState,
        LightState,
    )),
    tags(
        (name = "settings", description = "User preferences"),
        (name = "sensors",  description = "Sensor ingestion and history"),
        (name = "control",  description = "Derived actuator states"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Smart Hub API",
        version = "0.1.0",
        description = "REST API for the home-automation hub: settings, sensor data, fan and light control"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
