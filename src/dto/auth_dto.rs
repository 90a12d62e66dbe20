//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::account::AccountRole;

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

/// Response de login con el token emitido
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account_id: Uuid,
    pub email: String,
    pub role: AccountRole,
}

/// Request para registrar la cuenta administradora inicial
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

/// Response con los datos de la cuenta autenticada
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub account_id: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub employee_id: Option<Uuid>,
}
