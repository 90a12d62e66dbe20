use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::shift::{CreateShiftRequest, ShiftFilters, ShiftResponse, UpdateShiftRequest};
use crate::services::authorization_service::{authorize, Action};
use crate::services::shift_service::ShiftService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_shift_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_shift))
        .route("/", get(list_shifts))
        .route("/:id", get(get_shift))
        .route("/:id", put(update_shift))
        .route("/:id", delete(delete_shift))
}

async fn create_shift(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateShiftRequest>,
) -> Result<Json<ApiResponse<ShiftResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageShifts)?;

    let service = ShiftService::new(state.pool.clone());
    let shift = service.create(request).await?;
    Ok(Json(ApiResponse::success(ShiftResponse::from(shift))))
}

async fn list_shifts(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(filters): Query<ShiftFilters>,
) -> Result<Json<Vec<ShiftResponse>>, AppError> {
    // Las definiciones de turno son datos de referencia legibles por todos
    authorize(user.role, user.employee_id, Action::ReadShifts)?;

    let service = ShiftService::new(state.pool.clone());
    let shifts = service.list(&filters).await?;
    Ok(Json(shifts.into_iter().map(ShiftResponse::from).collect()))
}

async fn get_shift(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShiftResponse>, AppError> {
    authorize(user.role, user.employee_id, Action::ReadShifts)?;

    let service = ShiftService::new(state.pool.clone());
    let shift = service.get(id).await?;
    Ok(Json(ShiftResponse::from(shift)))
}

async fn update_shift(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShiftRequest>,
) -> Result<Json<ApiResponse<ShiftResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageShifts)?;

    let service = ShiftService::new(state.pool.clone());
    let shift = service.update(id, request).await?;
    Ok(Json(ApiResponse::success(ShiftResponse::from(shift))))
}

async fn delete_shift(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageShifts)?;

    let service = ShiftService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(ApiResponse::message_only("Shift deleted".to_string())))
}
