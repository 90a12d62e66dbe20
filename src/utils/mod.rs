//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y conversión de zona horaria.

pub mod errors;
pub mod jwt;
pub mod timezone;
pub mod validation;
