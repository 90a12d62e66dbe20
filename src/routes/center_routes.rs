use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::center_controller::CenterController;
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::service_center::{CenterFilters, CenterResponse, CreateCenterRequest, UpdateCenterRequest};
use crate::services::authorization_service::{authorize, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_center_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_center))
        .route("/", get(list_centers))
        .route("/:id", get(get_center))
        .route("/:id", put(update_center))
        .route("/:id", delete(delete_center))
}

async fn create_center(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateCenterRequest>,
) -> Result<Json<ApiResponse<CenterResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageCenters)?;

    let controller = CenterController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_centers(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(filters): Query<CenterFilters>,
) -> Result<Json<Vec<CenterResponse>>, AppError> {
    // Los centros son datos de referencia: el scope no restringe su lectura
    authorize(user.role, user.employee_id, Action::ReadCenters)?;

    let controller = CenterController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_center(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CenterResponse>, AppError> {
    authorize(user.role, user.employee_id, Action::ReadCenters)?;

    let controller = CenterController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_center(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCenterRequest>,
) -> Result<Json<ApiResponse<CenterResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageCenters)?;

    let controller = CenterController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_center(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageCenters)?;

    let controller = CenterController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message_only(
        "Service center deleted".to_string(),
    )))
}
