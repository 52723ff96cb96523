//! JSON configuration for the gear controller.
//!
//! Loading is lenient: any malformed or missing field falls back to its
//! default and a warning is logged, so a bad field never stops the system
//! from starting. Only an unreadable file or invalid JSON fails. Use
//! [`Config::check`] to see every problem at once without falling back.
//!
//! ```json
//! {
//!   "timings":    { "deploy_time_s": 2.5, "retract_time_s": 2.5 },
//!   "interlocks": { "allow_down_from": ["UP_LOCKED"], "allow_up_from": ["DOWN_LOCKED"] },
//!   "logging":    { "level": "INFO" }
//! }
//! ```

pub mod error;

pub use error::{ConfigError, ConfigIssue};

use crate::core::GearState;
use crate::interlock::{AllowList, InterlockPolicy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_CONFIG_PATH: &str = "configs/config.json";
pub const DEFAULT_DEPLOY_TIME_S: f64 = 2.5;
pub const DEFAULT_RETRACT_TIME_S: f64 = 2.5;
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

type Checked<T> = Validation<T, NonEmptyVec<ConfigIssue>>;
type Section<'a> = Option<&'a Map<String, Value>>;

/// Deploy and retract durations shared by every leg.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub deploy_time_s: f64,
    pub retract_time_s: f64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            deploy_time_s: DEFAULT_DEPLOY_TIME_S,
            retract_time_s: DEFAULT_RETRACT_TIME_S,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Map the configured level name onto a `tracing` level.
    ///
    /// Accepts `WARNING` and `CRITICAL` as aliases; anything unknown is INFO.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" | "CRITICAL" | "FATAL" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

/// Validated configuration consumed by the controller and the cockpit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub timings: Timings,
    pub interlocks: InterlockPolicy,
    pub logging: LoggingConfig,
}

impl Config {
    /// Build a configuration from raw JSON, falling back field by field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use landing_gear::config::Config;
    /// use serde_json::json;
    ///
    /// let config = Config::from_value(&json!({
    ///     "timings": { "deploy_time_s": 1.0, "retract_time_s": "not a number" }
    /// }));
    ///
    /// assert_eq!(config.timings.deploy_time_s, 1.0);
    /// assert_eq!(config.timings.retract_time_s, 2.5);
    /// assert_eq!(config.logging.level, "INFO");
    /// ```
    pub fn from_value(raw: &Value) -> Self {
        if !raw.is_object() {
            tracing::warn!(
                "{}",
                ConfigIssue::NotAnObject {
                    section: "config".to_string(),
                    found: describe(raw),
                }
            );
            return Self::default();
        }

        let timings = resolve(section(raw, "timings"), || None);
        let interlocks = resolve(section(raw, "interlocks"), || None);
        let logging = resolve(section(raw, "logging"), || None);

        let deploy_time_s = resolve(
            duration(timings, "deploy_time_s", DEFAULT_DEPLOY_TIME_S),
            || DEFAULT_DEPLOY_TIME_S,
        );
        let retract_time_s = resolve(
            duration(timings, "retract_time_s", DEFAULT_RETRACT_TIME_S),
            || DEFAULT_RETRACT_TIME_S,
        );
        tracing::info!("Deploy time set to {deploy_time_s}s");
        tracing::info!("Retract time set to {retract_time_s}s");

        let allow_down_from = resolve(
            allow_list(interlocks, "allow_down_from", GearState::UpLocked),
            || AllowList::from_states([GearState::UpLocked]),
        );
        let allow_up_from = resolve(
            allow_list(interlocks, "allow_up_from", GearState::DownLocked),
            || AllowList::from_states([GearState::DownLocked]),
        );
        for issue in unknown_names("allow_down_from", &allow_down_from)
            .chain(unknown_names("allow_up_from", &allow_up_from))
        {
            tracing::warn!("{issue}");
        }

        let level = resolve(level(logging), || DEFAULT_LOG_LEVEL.to_string());
        tracing::info!("Logging level set to {level}");

        Self {
            timings: Timings {
                deploy_time_s,
                retract_time_s,
            },
            interlocks: InterlockPolicy::new(allow_down_from, allow_up_from),
            logging: LoggingConfig { level },
        }
    }

    /// Check raw JSON strictly, accumulating every issue.
    ///
    /// Returns success only if [`Config::from_value`] would not need to fall
    /// back anywhere.
    pub fn check(raw: &Value) -> Validation<(), NonEmptyVec<ConfigIssue>> {
        if !raw.is_object() {
            return Validation::fail(ConfigIssue::NotAnObject {
                section: "config".to_string(),
                found: describe(raw),
            });
        }

        let timings = section(raw, "timings");
        let interlocks = section(raw, "interlocks");
        let logging = section(raw, "logging");

        let mut checks: Vec<Checked<()>> = Vec::new();

        let timings_map = section_map(&timings);
        checks.push(duration(timings_map, "deploy_time_s", DEFAULT_DEPLOY_TIME_S).map(|_| ()));
        checks.push(duration(timings_map, "retract_time_s", DEFAULT_RETRACT_TIME_S).map(|_| ()));

        let interlocks_map = section_map(&interlocks);
        for (field, fallback) in [
            ("allow_down_from", GearState::UpLocked),
            ("allow_up_from", GearState::DownLocked),
        ] {
            match allow_list(interlocks_map, field, fallback) {
                Validation::Success(list) => {
                    checks.extend(unknown_names(field, &list).map(Validation::fail));
                }
                failure => checks.push(failure.map(|_| ())),
            }
        }

        checks.push(level(section_map(&logging)).map(|_| ()));

        checks.push(timings.map(|_| ()));
        checks.push(interlocks.map(|_| ()));
        checks.push(logging.map(|_| ()));

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Read and parse a configuration file without interpreting it.
pub fn read_config_value(path: impl AsRef<Path>) -> Result<Value, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a configuration file, falling back to defaults for bad fields.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    tracing::info!("Loading configuration from {}", path.display());
    let raw = read_config_value(path)?;
    Ok(Config::from_value(&raw))
}

fn resolve<T>(checked: Checked<T>, fallback: impl FnOnce() -> T) -> T {
    match checked {
        Validation::Success(value) => value,
        Validation::Failure(issues) => {
            for issue in issues.iter() {
                tracing::warn!("{issue}");
            }
            fallback()
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

fn section<'a>(raw: &'a Value, name: &str) -> Checked<Section<'a>> {
    match raw.get(name) {
        None => Validation::success(None),
        Some(Value::Object(map)) => Validation::success(Some(map)),
        Some(other) => Validation::fail(ConfigIssue::NotAnObject {
            section: name.to_string(),
            found: describe(other),
        }),
    }
}

fn section_map<'a>(checked: &Checked<Section<'a>>) -> Section<'a> {
    match checked {
        Validation::Success(map) => *map,
        Validation::Failure(_) => None,
    }
}

fn duration(section: Section<'_>, field: &'static str, fallback: f64) -> Checked<f64> {
    let Some(value) = section.and_then(|s| s.get(field)) else {
        return Validation::success(fallback);
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => Validation::success(seconds),
        Some(seconds) => Validation::fail(ConfigIssue::NonPositiveDuration {
            field,
            value: seconds,
            fallback,
        }),
        None => Validation::fail(ConfigIssue::InvalidDuration {
            field,
            found: describe(value),
            fallback,
        }),
    }
}

fn allow_list(section: Section<'_>, field: &'static str, fallback: GearState) -> Checked<AllowList> {
    let Some(value) = section.and_then(|s| s.get(field)) else {
        return Validation::success(AllowList::from_states([fallback]));
    };

    let names = match value {
        Value::Array(items) => items.iter().map(Value::as_str).collect::<Option<AllowList>>(),
        _ => None,
    };

    match names {
        Some(list) => Validation::success(list),
        None => Validation::fail(ConfigIssue::InvalidAllowList {
            field,
            found: describe(value),
            fallback: vec![fallback.name()],
        }),
    }
}

fn unknown_names<'a>(
    field: &'static str,
    list: &'a AllowList,
) -> impl Iterator<Item = ConfigIssue> + 'a {
    list.unknown_names()
        .map(move |name| ConfigIssue::UnknownStateName {
            field,
            name: name.to_string(),
        })
}

fn level(section: Section<'_>) -> Checked<String> {
    match section.and_then(|s| s.get("level")) {
        None => Validation::success(DEFAULT_LOG_LEVEL.to_string()),
        Some(Value::String(level)) => Validation::success(level.clone()),
        Some(other) => Validation::fail(ConfigIssue::InvalidLevel {
            found: describe(other),
        }),
    }
}
