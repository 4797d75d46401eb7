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
    routing::{get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use scolaris::SemesterLifecycle;
use scolaris_api::{
    AdvanceEntry, ApiError, AuthenticatedActor, CreateSemesterRequest, FinishSemesterRequest,
    FinishSemesterResponse, InitSemesterResponse, InterruptResponse, RepeatingBatchResponse,
    Role, RpcRequest, RpcResponse, SemesterResponse, UpdateSemesterRequest, authenticate_stub,
    create_semester, current_semester, dispatch, finish_semester, init_semester,
    interrupt_finish_semester, list_semesters, repeating_students, semesters_by_year,
    update_semester,
};
use scolaris_audit::Cause;
use scolaris_persistence::Persistence;

/// Scolaris Server - HTTP server for the Scolaris school administration
/// system.
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
///
/// The lifecycle engine owns the single database connection; the Mutex
/// serializes requests against it.
#[derive(Clone)]
struct AppState {
    lifecycle: Arc<Mutex<SemesterLifecycle>>,
}

/// Actor identification carried by read requests.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// API request for creating a semester.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateSemesterApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The school year (e.g., 2026).
    year: u16,
    /// The ordinal within the year (1 or 2).
    ordinal: u8,
}

/// API request for correcting a semester's term key.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateSemesterApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The new school year.
    year: u16,
    /// The new ordinal.
    ordinal: u8,
}

/// API request for init and interrupt operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DirectiveActionRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for finishing the active semester.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct FinishSemesterApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The students marked to repeat their section.
    students_repeat: Vec<i64>,
    /// The explicit next-section assignments.
    students_advance: Vec<AdvanceEntry>,
}

/// The uniform response envelope every endpoint wraps its payload in.
#[derive(Debug, Clone, Serialize)]
struct ApiEnvelope<T: Serialize> {
    /// Success indicator.
    success: bool,
    /// The payload of a successful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<T>,
    /// The failure message of an unsuccessful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T: Serialize> ApiEnvelope<T> {
    const fn ok(body: T) -> Self {
        Self {
            success: true,
            body: Some(body),
            message: None,
        }
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ApiEnvelope<()>> = Json(ApiEnvelope {
            success: false,
            body: None,
            message: Some(self.message),
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidState { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "directive" => Ok(Role::Directive),
        "teacher" => Ok(Role::Teacher),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid role: '{role_str}'. Must be 'directive' or 'teacher'"),
        }),
    }
}

/// Parses and authenticates the actor named in a request.
fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(actor_role)?;
    authenticate_stub(actor_id.to_string(), role).map_err(|err| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: err.to_string(),
    })
}

/// Handler for GET `/semesters`.
async fn handle_list_semesters(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ApiEnvelope<Vec<SemesterResponse>>>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;

    let mut lifecycle = state.lifecycle.lock().await;
    let semesters: Vec<SemesterResponse> = list_semesters(&mut lifecycle, &actor)?;

    Ok(Json(ApiEnvelope::ok(semesters)))
}

/// Handler for GET `/semesters/current`.
async fn handle_current_semester(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ApiEnvelope<Option<SemesterResponse>>>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;

    let mut lifecycle = state.lifecycle.lock().await;
    let current: Option<SemesterResponse> = current_semester(&mut lifecycle, &actor)?;

    Ok(Json(ApiEnvelope::ok(current)))
}

/// Handler for GET `/semesters/year/{year}`.
async fn handle_semesters_by_year(
    AxumState(state): AxumState<AppState>,
    Path(year): Path<u16>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ApiEnvelope<Vec<SemesterResponse>>>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;

    let mut lifecycle = state.lifecycle.lock().await;
    let semesters: Vec<SemesterResponse> = semesters_by_year(&mut lifecycle, &actor, year)?;

    Ok(Json(ApiEnvelope::ok(semesters)))
}

/// Handler for POST `/semesters`.
async fn handle_create_semester(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateSemesterApiRequest>,
) -> Result<Json<ApiEnvelope<SemesterResponse>>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        year = req.year,
        ordinal = req.ordinal,
        "Handling create_semester request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: CreateSemesterRequest = CreateSemesterRequest {
        year: req.year,
        ordinal: req.ordinal,
    };

    let mut lifecycle = state.lifecycle.lock().await;
    let semester: SemesterResponse = create_semester(&mut lifecycle, &request, &actor, cause)?;

    Ok(Json(ApiEnvelope::ok(semester)))
}

/// Handler for PATCH `/semesters/{id}`.
async fn handle_update_semester(
    AxumState(state): AxumState<AppState>,
    Path(semester_id): Path<i64>,
    Json(req): Json<UpdateSemesterApiRequest>,
) -> Result<Json<ApiEnvelope<SemesterResponse>>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        semester_id,
        year = req.year,
        ordinal = req.ordinal,
        "Handling update_semester request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: UpdateSemesterRequest = UpdateSemesterRequest {
        year: req.year,
        ordinal: req.ordinal,
    };

    let mut lifecycle = state.lifecycle.lock().await;
    let semester: SemesterResponse =
        update_semester(&mut lifecycle, semester_id, &request, &actor, cause)?;

    Ok(Json(ApiEnvelope::ok(semester)))
}

/// Handler for POST `/semesters/{id}/init`.
async fn handle_init_semester(
    AxumState(state): AxumState<AppState>,
    Path(semester_id): Path<i64>,
    Json(req): Json<DirectiveActionRequest>,
) -> Result<Json<ApiEnvelope<InitSemesterResponse>>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        semester_id,
        "Handling init_semester request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);

    let mut lifecycle = state.lifecycle.lock().await;
    let response: InitSemesterResponse =
        init_semester(&mut lifecycle, semester_id, &actor, cause)?;

    info!(
        semester_id,
        inserted = response.inserted_modules.len(),
        "Successfully initialized semester"
    );

    Ok(Json(ApiEnvelope::ok(response)))
}

/// Handler for POST `/semesters/finish`.
async fn handle_finish_semester(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<FinishSemesterApiRequest>,
) -> Result<Json<ApiEnvelope<FinishSemesterResponse>>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        repeating = req.students_repeat.len(),
        advancing = req.students_advance.len(),
        "Handling finish_semester request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: FinishSemesterRequest = FinishSemesterRequest {
        students_repeat: req.students_repeat,
        students_advance: req.students_advance,
    };

    let mut lifecycle = state.lifecycle.lock().await;
    let response: FinishSemesterResponse =
        finish_semester(&mut lifecycle, &request, &actor, cause)?;

    info!(
        moved = response.moved.len(),
        failed = response.failed.len(),
        "Successfully finished semester"
    );

    Ok(Json(ApiEnvelope::ok(response)))
}

/// Handler for POST `/semesters/finish/interrupt`.
async fn handle_interrupt_finish(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<DirectiveActionRequest>,
) -> Result<Json<ApiEnvelope<InterruptResponse>>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling interrupt_finish_semester request");

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);

    let mut lifecycle = state.lifecycle.lock().await;
    let response: InterruptResponse = interrupt_finish_semester(&mut lifecycle, &actor, cause)?;

    Ok(Json(ApiEnvelope::ok(response)))
}

/// Handler for GET `/semesters/{id}/repeating`.
async fn handle_repeating_students(
    AxumState(state): AxumState<AppState>,
    Path(semester_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ApiEnvelope<Vec<RepeatingBatchResponse>>>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;

    let mut lifecycle = state.lifecycle.lock().await;
    let batches: Vec<RepeatingBatchResponse> =
        repeating_students(&mut lifecycle, semester_id, &actor)?;

    Ok(Json(ApiEnvelope::ok(batches)))
}

/// Handler for POST `/internal/rpc`.
///
/// Transport adapter for the pattern-matched message surface consumed by
/// sibling services.
async fn handle_rpc(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<RpcRequest>,
) -> Result<Json<ApiEnvelope<RpcResponse>>, HttpError> {
    let mut lifecycle = state.lifecycle.lock().await;
    let response: RpcResponse = dispatch(&mut lifecycle, &request)?;

    Ok(Json(ApiEnvelope::ok(response)))
}

/// Assembles the application router.
fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/semesters",
            get(handle_list_semesters).post(handle_create_semester),
        )
        .route("/semesters/current", get(handle_current_semester))
        .route("/semesters/year/{year}", get(handle_semesters_by_year))
        .route("/semesters/{id}", patch(handle_update_semester))
        .route("/semesters/{id}/init", post(handle_init_semester))
        .route("/semesters/finish", post(handle_finish_semester))
        .route(
            "/semesters/finish/interrupt",
            post(handle_interrupt_finish),
        )
        .route(
            "/semesters/{id}/repeating",
            get(handle_repeating_students),
        )
        .route("/internal/rpc", post(handle_rpc))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let persistence: Persistence = match &args.database {
        Some(path) => match Persistence::new_with_file(path) {
            Ok(persistence) => {
                info!(path = %path, "Opened database");
                persistence
            }
            Err(err) => {
                error!(error = %err, path = %path, "Failed to open database");
                std::process::exit(1);
            }
        },
        None => match Persistence::new_in_memory() {
            Ok(persistence) => {
                info!("Using in-memory database");
                persistence
            }
            Err(err) => {
                error!(error = %err, "Failed to initialize in-memory database");
                std::process::exit(1);
            }
        },
    };

    let state: AppState = AppState {
        lifecycle: Arc::new(Mutex::new(persistence.lifecycle())),
    };
    let app: Router = router(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, port = args.port, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(port = args.port, "Scolaris server listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server error");
        std::process::exit(1);
    }
}
