use std::time::Duration;

use anyhow::{anyhow, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
const DEFAULT_BRAIN_PATH: &str = "./brain.json";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CYCLE_WINDOW_MINUTES: u64 = 120;
const DEFAULT_REFRESH_HOURS: u64 = 24;

/// Интервалы планировщиков.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Минимальная задержка для каждой из трёх отправок
    pub floors: [Duration; 3],
    /// Верхняя граница случайной добавки к минимуму
    pub max_span: Duration,
    pub refresh_period: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            floors: [
                Duration::from_secs(10),
                Duration::from_secs(20),
                Duration::from_secs(30),
            ],
            max_span: Duration::from_secs(DEFAULT_CYCLE_WINDOW_MINUTES * 60),
            refresh_period: Duration::from_secs(DEFAULT_REFRESH_HOURS * 3600),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_token: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub brain_path: String,
    pub port: u16,
    pub timings: Timings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} must be set"))
        };

        let timings = Timings {
            max_span: period_or(&lookup, "CYCLE_WINDOW_MINUTES", DEFAULT_CYCLE_WINDOW_MINUTES, 60),
            refresh_period: period_or(&lookup, "REFRESH_HOURS", DEFAULT_REFRESH_HOURS, 3600),
            ..Timings::default()
        };

        Ok(Self {
            telegram_token: required("TELEGRAM_TOKEN")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            brain_path: lookup("BRAIN_PATH").unwrap_or_else(|| DEFAULT_BRAIN_PATH.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            timings,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️ {key}={raw:?} is not valid, using {default}");
            default
        }),
    }
}

/// Положительный интервал в единицах по `unit_secs` секунд. Ноль и переполнение
/// заменяются значением по умолчанию.
fn period_or<F>(lookup: &F, key: &str, default: u64, unit_secs: u64) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let count = parse_or(lookup, key, default);
    let secs = match count.checked_mul(unit_secs) {
        Some(secs) if secs > 0 => secs,
        _ => {
            log::warn!("⚠️ {key}={count} is out of range, using {default}");
            default * unit_secs
        }
    };
    Duration::from_secs(secs)
}
