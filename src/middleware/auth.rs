//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de cuentas autenticadas.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::account::{Account, AccountRole},
    state::AppState,
    utils::errors::AppError,
    utils::jwt::verify_token,
};

/// Cuenta autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub account_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub role: AccountRole,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    // Decodificar y validar JWT
    let claims = verify_token(auth_header, &state.config)?;

    let account_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid account id in token".to_string()))?;

    // Verificar que la cuenta existe y sigue activa
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    if !account.is_active {
        return Err(AppError::Unauthorized(
            "Account is inactive or suspended".to_string(),
        ));
    }

    // Perfil de empleado asociado, si existe
    let employee_id: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM employees WHERE account_id = $1")
            .bind(account.id)
            .fetch_optional(&state.pool)
            .await?;

    let authenticated_user = AuthenticatedUser {
        account_id: account.id,
        employee_id: employee_id.map(|(id,)| id),
        role: account.role,
    };

    // Inyectar la cuenta autenticada en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
