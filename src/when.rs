use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Resolves a free-form time phrase to an absolute local timestamp.
///
/// Accepted forms: `HH:MM`, `HH:MM:SS` (today at that time, no rollover),
/// `YYYY-MM-DD HH:MM[:SS]`, ISO 8601 `YYYYMMDDThhmmss±HHMM` / `...Z`,
/// `noon`, `midnight`; any of them may be followed by `tomorrow` to add a
/// day, and `tomorrow` alone means this instant plus one day.
pub fn resolve_absolute_time(text: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let (base, tomorrow) = split_tomorrow(text.trim());
    let resolved = if base.is_empty() {
        if !tomorrow {
            return None;
        }
        now
    } else {
        resolve_base(base, now)?
    };
    Some(if tomorrow {
        resolved + Duration::days(1)
    } else {
        resolved
    })
}

fn split_tomorrow(text: &str) -> (&str, bool) {
    let word = "tomorrow";
    if text.len() >= word.len() {
        let cut = text.len() - word.len();
        if text.is_char_boundary(cut) && text[cut..].eq_ignore_ascii_case(word) {
            return (text[..cut].trim_end(), true);
        }
    }
    (text, false)
}

fn resolve_base(text: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    if text.eq_ignore_ascii_case("noon") {
        return at_today(now, NaiveTime::from_hms_opt(12, 0, 0)?);
    }
    if text.eq_ignore_ascii_case("midnight") {
        return at_today(now, NaiveTime::from_hms_opt(0, 0, 0)?);
    }

    if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M") {
        return at_today(now, t);
    }
    if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
        return at_today(now, t);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M") {
        return Local.from_local_datetime(&dt).single();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Local.from_local_datetime(&dt).single();
    }

    // ISO 8601 with timezone offset: YYYYMMDDThhmmss+HHMM / -HHMM
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y%m%dT%H%M%S%z") {
        return Some(dt.with_timezone(&Local));
    }

    // ISO 8601 UTC: YYYYMMDDThhmmssZ
    if let Some(stripped) = text.strip_suffix(['Z', 'z'])
        && let Ok(naive) = NaiveDateTime::parse_from_str(stripped, "%Y%m%dT%H%M%S")
    {
        return Some(Utc.from_utc_datetime(&naive).with_timezone(&Local));
    }

    None
}

fn at_today(now: DateTime<Local>, t: NaiveTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&now.date_naive().and_time(t)).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now_fixed() -> DateTime<Local> {
        // Fixed reference: 2026-02-20 10:00:00 local time
        Local.with_ymd_and_hms(2026, 2, 20, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_hhmm_today() {
        let now = now_fixed();
        let end = resolve_absolute_time("12:30", now).unwrap();
        assert_eq!(end.date_naive(), now.date_naive());
        assert_eq!(end.format("%H:%M:%S").to_string(), "12:30:00");
    }

    #[test]
    fn test_hhmm_past_stays_today() {
        // No rollover: the caller decides what to do with a past timestamp.
        let now = now_fixed();
        let end = resolve_absolute_time("08:00", now).unwrap();
        assert_eq!(end.date_naive(), now.date_naive());
        assert!(end < now);
    }

    #[test]
    fn test_hhmmss() {
        let now = now_fixed();
        let end = resolve_absolute_time("12:30:45", now).unwrap();
        assert_eq!(end.format("%H:%M:%S").to_string(), "12:30:45");
    }

    #[test]
    fn test_date_and_time() {
        let now = now_fixed();
        let end = resolve_absolute_time("2026-03-01 09:15", now).unwrap();
        assert_eq!(end.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-03-01 09:15:00");
    }

    #[test]
    fn test_iso8601_with_tz() {
        let now = now_fixed();
        let end = resolve_absolute_time("20260220T123000+0900", now).unwrap();
        let utc = end.with_timezone(&Utc);
        assert_eq!(utc.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-02-20 03:30:00");
    }

    #[test]
    fn test_iso8601_utc() {
        let now = now_fixed();
        let end = resolve_absolute_time("20260220T123000Z", now).unwrap();
        let utc = end.with_timezone(&Utc);
        assert_eq!(utc.format("%H:%M:%S").to_string(), "12:30:00");
    }

    #[test]
    fn test_noon() {
        let now = now_fixed();
        let end = resolve_absolute_time("noon", now).unwrap();
        assert_eq!(end.format("%H:%M:%S").to_string(), "12:00:00");
        assert_eq!(end.date_naive(), now.date_naive());
    }

    #[test]
    fn test_midnight_tomorrow() {
        let now = now_fixed();
        let end = resolve_absolute_time("midnight tomorrow", now).unwrap();
        assert_eq!(end.format("%H:%M:%S").to_string(), "00:00:00");
        assert_eq!(end.date_naive(), now.date_naive() + Duration::days(1));
    }

    #[test]
    fn test_tomorrow_alone() {
        let now = now_fixed();
        let end = resolve_absolute_time("tomorrow", now).unwrap();
        assert_eq!(end, now + Duration::days(1));
    }

    #[test]
    fn test_tomorrow_case_insensitive() {
        let now = now_fixed();
        let end = resolve_absolute_time("08:00 Tomorrow", now).unwrap();
        assert_eq!(end.date_naive(), now.date_naive() + Duration::days(1));
    }

    #[test]
    fn test_unresolvable() {
        let now = now_fixed();
        assert!(resolve_absolute_time("half past never", now).is_none());
        assert!(resolve_absolute_time("", now).is_none());
    }
}
