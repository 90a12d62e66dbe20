//! Conversión de zona horaria
//!
//! Este módulo centraliza la conversión entre la zona horaria local de la
//! plataforma (Asia/Ho_Chi_Minh) y UTC. Todos los instantes persistidos son
//! UTC; las fechas de calendario se interpretan en hora local únicamente en
//! los bordes de persistencia y presentación.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Ho_Chi_Minh;
use chrono_tz::Tz;

/// Zona horaria local de la plataforma
pub const LOCAL_TZ: Tz = Ho_Chi_Minh;

/// Fecha de calendario actual en la zona horaria local
pub fn today_local() -> NaiveDate {
    Utc::now().with_timezone(&LOCAL_TZ).date_naive()
}

/// Convertir un instante UTC a hora local
pub fn utc_to_local(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&LOCAL_TZ)
}

/// Rango UTC [inicio, fin) que cubre un día de calendario local
pub fn local_date_to_utc_range(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_local = LOCAL_TZ
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .expect("Asia/Ho_Chi_Minh has no DST gaps");
    let end_local = LOCAL_TZ
        .from_local_datetime(&date.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap())
        .single()
        .expect("Asia/Ho_Chi_Minh has no DST gaps");

    (
        start_local.with_timezone(&Utc),
        end_local.with_timezone(&Utc),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_local_date_to_utc_range() {
        // Asia/Ho_Chi_Minh es UTC+7 sin horario de verano
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let (start, end) = local_date_to_utc_range(date);

        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(start.hour(), 17);
        assert_eq!(end - start, chrono::Duration::hours(24));
    }

    #[test]
    fn test_utc_to_local_offset() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
        let local = utc_to_local(instant);
        assert_eq!(local.hour(), 7);
    }
}
