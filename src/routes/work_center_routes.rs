use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::work_center::{
    CreateWorkCenterRequest, UpdateWorkCenterRequest, WorkCenterFilters, WorkCenterResponse,
};
use crate::services::authorization_service::{authorize, Action, Scope};
use crate::services::work_center_service::WorkCenterService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_work_center_router() -> Router<AppState> {
    Router::new()
        .route("/", post(assign_employee))
        .route("/", get(list_assignments))
        .route("/:id", get(get_assignment))
        .route("/:id", put(update_assignment))
        .route("/:id", delete(end_assignment))
}

async fn assign_employee(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateWorkCenterRequest>,
) -> Result<Json<ApiResponse<WorkCenterResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageWorkCenters)?;

    let service = WorkCenterService::new(state.pool.clone());
    let assignment = service.assign(request).await?;
    Ok(Json(ApiResponse::success(WorkCenterResponse::from(assignment))))
}

async fn list_assignments(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(filters): Query<WorkCenterFilters>,
) -> Result<Json<Vec<WorkCenterResponse>>, AppError> {
    let scope = authorize(user.role, user.employee_id, Action::ReadWorkCenters)?;

    let service = WorkCenterService::new(state.pool.clone());
    let assignments = service.list(filters, &scope).await?;
    Ok(Json(assignments.into_iter().map(WorkCenterResponse::from).collect()))
}

async fn get_assignment(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkCenterResponse>, AppError> {
    let scope = authorize(user.role, user.employee_id, Action::ReadWorkCenters)?;

    let service = WorkCenterService::new(state.pool.clone());
    let assignment = service.get(id).await?;

    match scope {
        Scope::All => {}
        Scope::OwnEmployee(employee_id) | Scope::OwnEmployeeAndCenters(employee_id) => {
            if assignment.employee_id != employee_id {
                return Err(AppError::Forbidden(
                    "Cannot access another employee's assignment".to_string(),
                ));
            }
        }
    }

    Ok(Json(WorkCenterResponse::from(assignment)))
}

async fn update_assignment(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWorkCenterRequest>,
) -> Result<Json<ApiResponse<WorkCenterResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageWorkCenters)?;

    let service = WorkCenterService::new(state.pool.clone());
    let assignment = service.update(id, request).await?;
    Ok(Json(ApiResponse::success(WorkCenterResponse::from(assignment))))
}

/// DELETE es una baja lógica: fija end_date = hoy sin borrar la fila
async fn end_assignment(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WorkCenterResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageWorkCenters)?;

    let service = WorkCenterService::new(state.pool.clone());
    let assignment = service.end(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        WorkCenterResponse::from(assignment),
        "Assignment ended".to_string(),
    )))
}
