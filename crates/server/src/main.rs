// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use rosterd_api::{
    ApiError, BulkRequest, BulkResponse, CopyPreviousResponse, CreateScheduleRequest,
    CreateShiftRequest, CreateShiftTypeRequest, ScheduleResponse, ScheduleShiftsResponse,
    ShiftResponse, ShiftTypeResponse, UpdateScheduleRequest, UpdateShiftRequest,
    UpdateShiftTimesRequest, UpdateShiftTypeRequest,
};
use rosterd_persistence::Persistence;

/// rosterd - HTTP server for the staff-scheduling backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialized behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters for listing schedules.
#[derive(Debug, Deserialize)]
struct ListSchedulesQuery {
    /// Optional status filter (`draft` or `published`).
    status: Option<String>,
    /// 1-based page number.
    page: Option<i64>,
    /// Page size.
    limit: Option<i64>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The JSON body.
    body: serde_json::Value,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                body: serde_json::json!({ "error": true, "message": err.to_string() }),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                body: serde_json::json!({ "error": true, "message": err.to_string() }),
            },
            ApiError::ShiftConflict { message, conflicts } => Self {
                status: StatusCode::CONFLICT,
                body: serde_json::json!({ "message": message, "conflicts": conflicts }),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::CONFLICT,
                body: serde_json::json!({ "error": true, "message": err.to_string() }),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: serde_json::json!({ "error": true, "message": err.to_string() }),
                }
            }
        }
    }
}

// ============================================================================
// Schedule handlers
// ============================================================================

async fn handle_create_schedule(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::create_schedule(&mut persistence, &request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_list_schedules(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::list_schedules(
        &mut persistence,
        query.status.as_deref(),
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )?;
    Ok(Json(response))
}

async fn handle_get_schedule(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::get_schedule(&mut persistence, schedule_id)?;
    Ok(Json(response))
}

async fn handle_update_schedule(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::update_schedule(&mut persistence, schedule_id, &request)?;
    Ok(Json(response))
}

async fn handle_delete_schedule(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    rosterd_api::delete_schedule(&mut persistence, schedule_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_publish_schedule(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::publish_schedule(&mut persistence, schedule_id)?;
    Ok(Json(response))
}

// ============================================================================
// Shift-type handlers
// ============================================================================

async fn handle_create_shift_type(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateShiftTypeRequest>,
) -> Result<(StatusCode, Json<ShiftTypeResponse>), HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::create_shift_type(&mut persistence, &request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_list_shift_types(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<ShiftTypeResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::list_shift_types(&mut persistence)?;
    Ok(Json(response))
}

async fn handle_get_shift_type(
    AxumState(state): AxumState<AppState>,
    Path(shift_type_id): Path<i64>,
) -> Result<Json<ShiftTypeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::get_shift_type(&mut persistence, shift_type_id)?;
    Ok(Json(response))
}

async fn handle_update_shift_type(
    AxumState(state): AxumState<AppState>,
    Path(shift_type_id): Path<i64>,
    Json(request): Json<UpdateShiftTypeRequest>,
) -> Result<Json<ShiftTypeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::update_shift_type(&mut persistence, shift_type_id, &request)?;
    Ok(Json(response))
}

async fn handle_delete_shift_type(
    AxumState(state): AxumState<AppState>,
    Path(shift_type_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    rosterd_api::delete_shift_type(&mut persistence, shift_type_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Shift handlers
// ============================================================================

async fn handle_create_shift(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
    Json(request): Json<CreateShiftRequest>,
) -> Result<(StatusCode, Json<ShiftResponse>), HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::create_shift(&mut persistence, schedule_id, &request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_list_shifts(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<ScheduleShiftsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::list_shifts(&mut persistence, schedule_id)?;
    Ok(Json(response))
}

async fn handle_update_shift(
    AxumState(state): AxumState<AppState>,
    Path((schedule_id, shift_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateShiftRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::update_shift(&mut persistence, schedule_id, shift_id, &request)?;
    Ok(Json(response))
}

async fn handle_update_shift_times(
    AxumState(state): AxumState<AppState>,
    Path((schedule_id, shift_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateShiftTimesRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response =
        rosterd_api::update_shift_times(&mut persistence, schedule_id, shift_id, &request)?;
    Ok(Json(response))
}

async fn handle_delete_shift(
    AxumState(state): AxumState<AppState>,
    Path((schedule_id, shift_id)): Path<(i64, i64)>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    rosterd_api::remove_shift(&mut persistence, schedule_id, shift_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_copy_previous(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<(StatusCode, Json<CopyPreviousResponse>), HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::copy_previous(&mut persistence, schedule_id)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_bulk_operations(
    AxumState(state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
    Json(request): Json<BulkRequest>,
) -> Result<(StatusCode, Json<BulkResponse>), HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = rosterd_api::execute_bulk(&mut persistence, schedule_id, &request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Builds the application router under the versioned base path.
fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/schedules", post(handle_create_schedule))
        .route("/schedules", get(handle_list_schedules))
        .route("/schedules/{schedule_id}", get(handle_get_schedule))
        .route("/schedules/{schedule_id}", patch(handle_update_schedule))
        .route("/schedules/{schedule_id}", delete(handle_delete_schedule))
        .route(
            "/schedules/{schedule_id}/publish",
            post(handle_publish_schedule),
        )
        .route("/shift-types", post(handle_create_shift_type))
        .route("/shift-types", get(handle_list_shift_types))
        .route("/shift-types/{shift_type_id}", get(handle_get_shift_type))
        .route(
            "/shift-types/{shift_type_id}",
            patch(handle_update_shift_type),
        )
        .route(
            "/shift-types/{shift_type_id}",
            delete(handle_delete_shift_type),
        )
        .route("/schedules/{schedule_id}/shifts", post(handle_create_shift))
        .route("/schedules/{schedule_id}/shifts", get(handle_list_shifts))
        .route(
            "/schedules/{schedule_id}/shifts/{shift_id}",
            patch(handle_update_shift),
        )
        .route(
            "/schedules/{schedule_id}/shifts/{shift_id}",
            delete(handle_delete_shift),
        )
        .route(
            "/schedules/{schedule_id}/shifts/{shift_id}/times",
            patch(handle_update_shift_times),
        )
        .route(
            "/schedules/{schedule_id}/shifts/copy-previous",
            post(handle_copy_previous),
        )
        .route(
            "/schedules/{schedule_id}/shifts/bulk",
            post(handle_bulk_operations),
        );

    Router::new().nest("/api/v1", api).with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing rosterd server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
