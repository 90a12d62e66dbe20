//! Controllers de la API
//!
//! Orquestan validación, repositorios y respuestas para los recursos CRUD.

pub mod auth_controller;
pub mod center_controller;
pub mod employee_controller;
