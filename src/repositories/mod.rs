//! Repositorios de acceso a datos
//!
//! Un repositorio por tabla. Las sentencias sensibles a transacciones
//! reciben `&mut PgConnection` para poder ejecutarse bajo un único
//! `pool.begin()` desde los servicios.

pub mod account_repository;
pub mod center_repository;
pub mod employee_repository;
pub mod shift_repository;
pub mod work_center_repository;
pub mod work_schedule_repository;
