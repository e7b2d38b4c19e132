use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use log::debug;

/// Used when the system zone cannot be detected or is unknown to chrono-tz.
pub const FALLBACK_TIMEZONE: Tz = chrono_tz::UTC;

/// Parse an ESPN start timestamp. The scoreboard sends minute precision
/// (`2026-01-12T02:00Z`), other endpoints full RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Short wall-clock time in `tz`, e.g. `"9:00 PM EST"`. Empty when the
/// timestamp cannot be parsed.
pub fn localize_time(raw: &str, tz: Tz) -> String {
    parse_timestamp(raw)
        .map(|utc| utc.with_timezone(&tz).format("%-I:%M %p %Z").to_string())
        .unwrap_or_default()
}

pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// The machine's IANA zone, so tipoffs read in the viewer's own clock.
pub fn system_timezone() -> Option<Tz> {
    match iana_time_zone::get_timezone() {
        Ok(name) => parse_timezone(&name),
        Err(e) => {
            debug!("system time zone not detected: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    #[test]
    fn minute_precision_utc() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 12, 2, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-01-12T02:00Z"), Some(expected));
        assert_eq!(parse_timestamp(" 2026-01-12T02:00Z "), Some(expected));
        assert_eq!(parse_timestamp("2026-01-11T21:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-01-12T02:00:00Z"), Some(expected));
    }

    #[test]
    fn localizes_with_abbreviation() {
        assert_eq!(localize_time("2026-01-12T02:00Z", New_York), "9:00 PM EST");
        assert_eq!(localize_time("2026-07-04T23:30:00Z", New_York), "7:30 PM EDT");
        assert_eq!(localize_time("2026-01-12T02:00Z", chrono_tz::UTC), "2:00 AM UTC");
    }

    #[test]
    fn garbage_is_empty() {
        assert_eq!(localize_time("", FALLBACK_TIMEZONE), "");
        assert_eq!(localize_time("tonight", FALLBACK_TIMEZONE), "");
        assert_eq!(localize_time("2026-13-40T99:00Z", FALLBACK_TIMEZONE), "");
    }

    #[test]
    fn timezone_names() {
        assert_eq!(parse_timezone("America/Los_Angeles"), Some(chrono_tz::America::Los_Angeles));
        assert_eq!(parse_timezone("Mars/Olympus_Mons"), None);
    }
}
