//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a tiempo
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S").map_err(|_| {
        let mut error = ValidationError::new("time");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM:SS".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que los días de repetición estén en el rango 0 (domingo) a 6 (sábado)
pub fn validate_repeat_days(days: &[i32]) -> Result<(), ValidationError> {
    if days.is_empty() {
        let mut error = ValidationError::new("repeat_days");
        error.add_param("message".into(), &"at least one weekday is required".to_string());
        return Err(error);
    }

    for day in days {
        if !(0..=6).contains(day) {
            let mut error = ValidationError::new("repeat_days");
            error.add_param("value".into(), day);
            error.add_param("range".into(), &"0 (Sunday) to 6 (Saturday)".to_string());
            return Err(error);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());

        let invalid_uuid = "invalid-uuid";
        assert!(validate_uuid(invalid_uuid).is_err());
    }

    #[test]
    fn test_validate_date() {
        let valid_date = "2025-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2025/01/15";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("08:30:00").is_ok());
        assert!(validate_time("22:00:00").is_ok());
        assert!(validate_time("8:30").is_err());
        assert!(validate_time("25:00:00").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("valor").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_repeat_days() {
        assert!(validate_repeat_days(&[0, 3, 6]).is_ok());
        assert!(validate_repeat_days(&[]).is_err());
        assert!(validate_repeat_days(&[7]).is_err());
        assert!(validate_repeat_days(&[-1]).is_err());
    }
}
