use chrono::{Local, NaiveDate};
use chrono_tz::Tz;
use log::{LevelFilter, warn};
use nba_api::localtime::{FALLBACK_TIMEZONE, parse_timezone, system_timezone};
use std::time::Duration;

pub const ENV_DATE: &str = "COURTSIDE_DATE";
pub const ENV_TZ: &str = "COURTSIDE_TZ";
pub const ENV_API_BASE: &str = "COURTSIDE_API_BASE";
pub const ENV_REFRESH_SECS: &str = "COURTSIDE_REFRESH_SECS";
pub const ENV_LOG: &str = "COURTSIDE_LOG";

const DEFAULT_REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Scoreboard day shown on startup.
    pub date: NaiveDate,
    /// Zone used to render tipoff times.
    pub timezone: Tz,
    pub api_base: Option<String>,
    pub refresh_interval: Duration,
}

/// Overrides parsed from the command line; they win over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub date: Option<NaiveDate>,
}

impl AppSettings {
    pub fn load(overrides: CliOverrides) -> Self {
        let mut settings = Self::from_lookup(
            |key| std::env::var(key).ok(),
            Local::now().date_naive(),
            system_timezone(),
        );
        if let Some(date) = overrides.date {
            settings.date = date;
        }
        settings
    }

    /// Build settings from any key/value source. Invalid values fall back to
    /// the defaults with a warning. Tipoff times default to `system_zone`,
    /// then UTC.
    pub fn from_lookup<F>(lookup: F, today: NaiveDate, system_zone: Option<Tz>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let date = read(ENV_DATE)
            .and_then(|raw| parse_date(&raw).or_else(|| invalid(ENV_DATE, &raw)))
            .unwrap_or(today);

        let timezone = read(ENV_TZ)
            .and_then(|raw| parse_timezone(&raw).or_else(|| invalid(ENV_TZ, &raw)))
            .or(system_zone)
            .unwrap_or(FALLBACK_TIMEZONE);

        let refresh_secs = read(ENV_REFRESH_SECS)
            .and_then(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .or_else(|| invalid(ENV_REFRESH_SECS, &raw))
            })
            .unwrap_or(DEFAULT_REFRESH_SECS);

        let log_level = log_level(&lookup);

        Self {
            full_screen: false,
            log_level,
            date,
            timezone,
            api_base: read(ENV_API_BASE).map(|raw| raw.trim().to_owned()),
            refresh_interval: Duration::from_secs(refresh_secs),
        }
    }
}

/// Level requested through `COURTSIDE_LOG`, if it names one. Read on its own so
/// the logger can be raised before the remaining settings are validated.
pub fn log_level<F>(lookup: F) -> Option<LevelFilter>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_LOG)
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok().or_else(|| invalid(ENV_LOG, &raw)))
}

/// Scoreboard dates are `YYYYMMDD`, the same form the API takes.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn invalid<T>(key: &str, raw: &str) -> Option<T> {
    warn!("ignoring invalid {key}={raw:?}, using default");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
    }

    fn settings_from(pairs: &[(&str, &str)]) -> AppSettings {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| env.get(key).cloned(), today(), None)
    }

    #[test]
    fn defaults_without_environment() {
        let settings = settings_from(&[]);
        assert_eq!(settings.date, today());
        assert_eq!(settings.timezone, FALLBACK_TIMEZONE);
        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
        assert_eq!(settings.api_base, None);
        assert_eq!(settings.log_level, None);
        assert!(!settings.full_screen);
    }

    #[test]
    fn environment_values_are_applied() {
        let settings = settings_from(&[
            (ENV_DATE, "20251225"),
            (ENV_TZ, "America/Los_Angeles"),
            (ENV_REFRESH_SECS, "10"),
            (ENV_API_BASE, " http://localhost:8080 "),
            (ENV_LOG, "debug"),
        ]);
        assert_eq!(settings.date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        assert_eq!(settings.timezone, chrono_tz::America::Los_Angeles);
        assert_eq!(settings.refresh_interval, Duration::from_secs(10));
        assert_eq!(settings.api_base.as_deref(), Some("http://localhost:8080"));
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = settings_from(&[
            (ENV_DATE, "yesterday"),
            (ENV_TZ, "Nowhere/Special"),
            (ENV_REFRESH_SECS, "0"),
            (ENV_LOG, "loud"),
        ]);
        assert_eq!(settings.date, today());
        assert_eq!(settings.timezone, FALLBACK_TIMEZONE);
        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn timezone_defaults_to_the_system_zone() {
        let tokyo = Some(chrono_tz::Asia::Tokyo);
        let settings = AppSettings::from_lookup(|_| None, today(), tokyo);
        assert_eq!(settings.timezone, chrono_tz::Asia::Tokyo);

        let unknown_zone = |key: &str| (key == ENV_TZ).then(|| "Nowhere/Special".to_string());
        let settings = AppSettings::from_lookup(unknown_zone, today(), tokyo);
        assert_eq!(settings.timezone, chrono_tz::Asia::Tokyo);

        let explicit = |key: &str| (key == ENV_TZ).then(|| "Europe/Madrid".to_string());
        let settings = AppSettings::from_lookup(explicit, today(), tokyo);
        assert_eq!(settings.timezone, chrono_tz::Europe::Madrid);
    }

    #[test]
    fn log_level_is_readable_before_full_settings() {
        let level = |raw: &'static str| log_level(move |key: &str| (key == ENV_LOG).then(|| raw.to_string()));
        assert_eq!(level("warn"), Some(LevelFilter::Warn));
        assert_eq!(level(" Debug "), Some(LevelFilter::Debug));
        assert_eq!(level("loud"), None);
        assert_eq!(level(""), None);
        assert_eq!(log_level(|_| None), None);
    }

    #[test]
    fn date_round_trip_format() {
        let date = parse_date("20260111").unwrap();
        assert_eq!(format_date(date), "20260111");
        assert_eq!(parse_date("2026-01-11"), None);
    }
}
