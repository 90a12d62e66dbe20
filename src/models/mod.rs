//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod account;
pub mod employee;
pub mod service_center;
pub mod shift;
pub mod work_center;
pub mod work_schedule;
