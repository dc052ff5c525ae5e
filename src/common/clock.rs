// src/common/clock.rs

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::common::error::AppError;

// Formatos aceitos no formulário (datetime-local do navegador e o formato da planilha)
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Interpreta um horário digitado no pátio. Sem fuso explícito, vale o fuso do pátio.
pub fn parse_local_time(raw: &str, offset: FixedOffset) -> Result<DateTime<Utc>, AppError> {
    let value = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTimestamp(value.to_string()))
}

pub fn format_local(at: DateTime<Utc>, offset: FixedOffset, format: &str) -> String {
    at.with_timezone(&offset).format(format).to_string()
}

/// Meia-noite de hoje no fuso do pátio, em UTC.
pub fn start_of_local_day(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local_midnight = now
        .with_timezone(&offset)
        .date_naive()
        .and_time(NaiveTime::MIN);

    offset
        .from_local_datetime(&local_midnight)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn test_parses_browser_datetime_local() {
        let parsed = parse_local_time("2025-03-01T08:30", taipei()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_parses_space_separated_with_seconds() {
        let parsed = parse_local_time(" 2025-03-01 23:59:10 ", taipei()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 15, 59, 10).unwrap());
    }

    #[test]
    fn test_explicit_offset_wins() {
        let parsed = parse_local_time("2025-03-01T08:30:00Z", taipei()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_local_time("ontem", taipei()).unwrap_err();
        assert!(matches!(err, AppError::InvalidTimestamp(v) if v == "ontem"));
    }

    #[test]
    fn test_start_of_local_day_crosses_utc_date() {
        // 2025-03-01 17:00 UTC = 2025-03-02 01:00 em Taipei
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 17, 0, 0).unwrap();
        let start = start_of_local_day(now, taipei());
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 1, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_format_local() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 16, 5, 0).unwrap();
        assert_eq!(format_local(at, taipei(), "%Y-%m-%d %H:%M"), "2025-03-02 00:05");
    }
}
