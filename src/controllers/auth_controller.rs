use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse, RegisterAdminRequest};
use crate::models::account::AccountRole;
use crate::repositories::account_repository::AccountRepository;
use crate::repositories::employee_repository::EmployeeRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AuthController {
    pool: PgPool,
    account_repo: AccountRepository,
    employee_repo: EmployeeRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            account_repo: AccountRepository::new(pool.clone()),
            employee_repo: EmployeeRepository::new(pool.clone()),
            pool,
            config,
        }
    }

    /// Registrar la cuenta administradora inicial de la plataforma.
    /// Solo disponible mientras no exista ningún admin.
    pub async fn register_admin(
        &self,
        request: RegisterAdminRequest,
    ) -> Result<LoginResponse, AppError> {
        request.validate()?;

        if self.account_repo.admin_exists().await? {
            return Err(AppError::Conflict(
                "An administrator account already exists".to_string(),
            ));
        }

        if self.account_repo.email_exists(&request.email).await? {
            return Err(AppError::Conflict(format!(
                "Account with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let mut tx = self.pool.begin().await?;
        let account = AccountRepository::create(
            &mut tx,
            Uuid::new_v4(),
            &request.email,
            &password_hash,
            AccountRole::Admin,
        )
        .await?;
        tx.commit().await?;

        let token = create_token(account.id, account.role.as_str(), &self.config)?;

        Ok(LoginResponse {
            token,
            account_id: account.id,
            email: account.email,
            role: account.role,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let account = self
            .account_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = verify(&request.password, &account.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        if !account.is_active {
            return Err(AppError::Unauthorized(
                "Account is inactive or suspended".to_string(),
            ));
        }

        let token = create_token(account.id, account.role.as_str(), &self.config)?;

        tracing::info!("Login correcto para la cuenta {}", account.email);

        Ok(LoginResponse {
            token,
            account_id: account.id,
            email: account.email,
            role: account.role,
        })
    }

    pub async fn me(&self, account_id: Uuid) -> Result<MeResponse, AppError> {
        let account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

        let employee = self.employee_repo.find_by_account_id(account.id).await?;

        Ok(MeResponse {
            account_id: account.id,
            email: account.email,
            role: account.role,
            employee_id: employee.map(|e| e.id),
        })
    }
}
