//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent a configuration file from being loaded at all.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A malformed field. Each issue falls back to that field's default.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigIssue {
    #[error("{section} must be an object, found {found}; using defaults")]
    NotAnObject { section: String, found: String },

    #[error("{field} must be a number, found {found}; falling back to {fallback}s")]
    InvalidDuration {
        field: &'static str,
        found: String,
        fallback: f64,
    },

    #[error("{field} must be positive and finite, found {value}; falling back to {fallback}s")]
    NonPositiveDuration {
        field: &'static str,
        value: f64,
        fallback: f64,
    },

    #[error("{field} must be a list of state names, found {found}; using default {fallback:?}")]
    InvalidAllowList {
        field: &'static str,
        found: String,
        fallback: Vec<&'static str>,
    },

    #[error("{field} names unknown state '{name}'; it will never match")]
    UnknownStateName { field: &'static str, name: String },

    #[error("logging.level must be a string, found {found}; using INFO")]
    InvalidLevel { found: String },
}
