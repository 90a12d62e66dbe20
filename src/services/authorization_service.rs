//! Servicio de autorización
//!
//! Política única de permisos: cada operación declara una acción y el
//! chequeo se evalúa una sola vez a la entrada del handler, devolviendo
//! el scope de filas que el llamador puede ver.

use uuid::Uuid;

use crate::models::account::AccountRole;
use crate::utils::errors::AppError;

/// Acciones de la plataforma sujetas a autorización
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageCenters,
    ManageEmployees,
    ManageShifts,
    ManageWorkCenters,
    ManageSchedules,
    ReadCenters,
    ReadEmployees,
    ReadShifts,
    ReadWorkCenters,
    ReadSchedules,
}

impl Action {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::ManageCenters
                | Action::ManageEmployees
                | Action::ManageShifts
                | Action::ManageWorkCenters
                | Action::ManageSchedules
        )
    }
}

/// Scope de filas resultante de la autorización
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Sin restricción (ADMIN)
    All,
    /// Solo las filas del propio empleado (TECHNICIAN)
    OwnEmployee(Uuid),
    /// Filas propias más las de sus centros asignados (STAFF)
    OwnEmployeeAndCenters(Uuid),
}

/// Evaluar la política para (rol, acción).
/// Toda mutación es exclusiva de ADMIN; las lecturas de STAFF/TECHNICIAN
/// quedan acotadas a sus propias filas.
pub fn authorize(
    role: AccountRole,
    employee_id: Option<Uuid>,
    action: Action,
) -> Result<Scope, AppError> {
    if role == AccountRole::Admin {
        return Ok(Scope::All);
    }

    if action.is_mutation() {
        return Err(AppError::Forbidden(
            "Only administrators can perform this operation".to_string(),
        ));
    }

    let employee_id = employee_id.ok_or_else(|| {
        AppError::Forbidden("Account has no employee profile".to_string())
    })?;

    match role {
        AccountRole::Staff => Ok(Scope::OwnEmployeeAndCenters(employee_id)),
        AccountRole::Technician => Ok(Scope::OwnEmployee(employee_id)),
        AccountRole::Admin => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_full_scope() {
        let scope = authorize(AccountRole::Admin, None, Action::ManageSchedules).unwrap();
        assert_eq!(scope, Scope::All);
    }

    #[test]
    fn test_staff_cannot_mutate() {
        let employee = Uuid::new_v4();
        let result = authorize(AccountRole::Staff, Some(employee), Action::ManageShifts);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_technician_reads_own_rows_only() {
        let employee = Uuid::new_v4();
        let scope =
            authorize(AccountRole::Technician, Some(employee), Action::ReadSchedules).unwrap();
        assert_eq!(scope, Scope::OwnEmployee(employee));
    }

    #[test]
    fn test_staff_reads_own_and_center_rows() {
        let employee = Uuid::new_v4();
        let scope = authorize(AccountRole::Staff, Some(employee), Action::ReadSchedules).unwrap();
        assert_eq!(scope, Scope::OwnEmployeeAndCenters(employee));
    }

    #[test]
    fn test_reader_without_profile_is_rejected() {
        let result = authorize(AccountRole::Staff, None, Action::ReadSchedules);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
