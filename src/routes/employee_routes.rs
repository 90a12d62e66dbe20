use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::employee_controller::EmployeeController;
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::employee::{CreateEmployeeRequest, EmployeeResponse, UpdateEmployeeRequest};
use crate::services::authorization_service::{authorize, Action, Scope};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct Pagination {
    limit: Option<i64>,
    offset: Option<i64>,
}

pub fn create_employee_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_employee))
        .route("/", get(list_employees))
        .route("/:id", get(get_employee))
        .route("/:id", put(update_employee))
        .route("/:id", delete(delete_employee))
}

async fn create_employee(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageEmployees)?;

    let controller = EmployeeController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_employees(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let scope = authorize(user.role, user.employee_id, Action::ReadEmployees)?;

    let controller = EmployeeController::new(state.pool.clone());
    let response = match scope {
        Scope::All => {
            controller
                .list(pagination.limit.unwrap_or(50), pagination.offset.unwrap_or(0))
                .await?
        }
        // STAFF/TECHNICIAN solo ven su propio perfil
        Scope::OwnEmployee(employee_id) | Scope::OwnEmployeeAndCenters(employee_id) => {
            vec![controller.get_by_id(employee_id).await?]
        }
    };

    Ok(Json(response))
}

async fn get_employee(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let scope = authorize(user.role, user.employee_id, Action::ReadEmployees)?;

    match scope {
        Scope::All => {}
        Scope::OwnEmployee(employee_id) | Scope::OwnEmployeeAndCenters(employee_id) => {
            if employee_id != id {
                return Err(AppError::Forbidden(
                    "Cannot access another employee's profile".to_string(),
                ));
            }
        }
    }

    let controller = EmployeeController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_employee(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageEmployees)?;

    let controller = EmployeeController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_employee(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authorize(user.role, user.employee_id, Action::ManageEmployees)?;

    let controller = EmployeeController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message_only("Employee deleted".to_string())))
}
