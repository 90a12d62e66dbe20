use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::schedule_dto::WorkScheduleDetailResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::work_schedule::{
    CreateWorkScheduleRequest, GenerateWorkScheduleRequest, ReplaceWorkScheduleRequest,
    WorkScheduleFilters,
};
use crate::services::authorization_service::{authorize, Action};
use crate::services::work_schedule_service::WorkScheduleService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_work_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/", get(list_schedules))
        .route("/generate", post(generate_from_recurrence))
        .route("/shift/:shift_id/date/:date", put(replace_for_shift_date))
        .route("/:id", delete(delete_assignment))
}

async fn create_assignment(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateWorkScheduleRequest>,
) -> Result<Json<ApiResponse<Vec<WorkScheduleDetailResponse>>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageSchedules)?;

    let service = WorkScheduleService::new(state.pool.clone());
    let entries = service.create_assignment(request).await?;
    Ok(Json(ApiResponse::success(entries)))
}

async fn generate_from_recurrence(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<GenerateWorkScheduleRequest>,
) -> Result<Json<ApiResponse<Vec<WorkScheduleDetailResponse>>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageSchedules)?;

    let service = WorkScheduleService::new(state.pool.clone());
    let entries = service.expand_recurring(request).await?;
    Ok(Json(ApiResponse::success(entries)))
}

async fn list_schedules(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(filters): Query<WorkScheduleFilters>,
) -> Result<Json<Vec<WorkScheduleDetailResponse>>, AppError> {
    let scope = authorize(user.role, user.employee_id, Action::ReadSchedules)?;

    let service = WorkScheduleService::new(state.pool.clone());
    let entries = service.list(filters, &scope).await?;
    Ok(Json(entries))
}

async fn replace_for_shift_date(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path((shift_id, date)): Path<(Uuid, NaiveDate)>,
    Json(request): Json<ReplaceWorkScheduleRequest>,
) -> Result<Json<ApiResponse<Vec<WorkScheduleDetailResponse>>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageSchedules)?;

    let service = WorkScheduleService::new(state.pool.clone());
    let entries = service.replace_for_shift_date(shift_id, date, request).await?;
    Ok(Json(ApiResponse::success(entries)))
}

async fn delete_assignment(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageSchedules)?;

    let service = WorkScheduleService::new(state.pool.clone());
    service.delete_assignment(id).await?;
    Ok(Json(ApiResponse::message_only(
        "Work schedule entry deleted".to_string(),
    )))
}
