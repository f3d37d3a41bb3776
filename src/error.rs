//! Typed errors for configuration resolution and model construction.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by config resolution, model lookup, and the run pipeline.
///
/// Unrecognized configuration keys are deliberately *not* represented here:
/// they are reported as warning events and the run continues with the
/// recognized subset of that layer's keys.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The selected mode is not a key of the loaded configuration.
    #[error("mode '{mode}' not found in configuration (available modes: {available:?})")]
    InvalidMode {
        mode: String,
        available: Vec<String>,
    },

    /// A config node that must be a flat mapping is something else.
    #[error("config section '{path}' is not a mapping")]
    MalformedSection { path: String },

    /// A recognized setting carried a value of the wrong type.
    #[error("invalid value for setting '{key}': expected {expected}, got {found}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// `set_attr` was called with a key the target does not declare.
    ///
    /// The resolver never produces this: it gates every key on `has_attr`
    /// before binding.
    #[error("'{key}' is not a declared runner setting")]
    UnknownSetting { key: String },

    /// The resolved configuration selects no model.
    #[error("no model selected: set runner.model in the configuration")]
    ModelNotSelected,

    /// The active mode carries no architecture entry for its model.
    #[error("mode '{mode}' has no 'architecture' entry")]
    MissingArchitecture { mode: String },

    /// The requested model is not in the registry.
    #[error("unknown model '{name}' (registered models: {available:?})")]
    UnknownModel {
        name: String,
        available: Vec<String>,
    },

    /// The configuration text could not be parsed as YAML.
    #[error("failed to parse configuration: {0}")]
    InvalidSyntax(#[from] serde_yaml::Error),
}

impl HarnessError {
    pub fn invalid_mode(mode: impl Into<String>, available: Vec<String>) -> Self {
        Self::InvalidMode {
            mode: mode.into(),
            available,
        }
    }

    pub fn malformed_section(path: impl Into<String>) -> Self {
        Self::MalformedSection { path: path.into() }
    }

    pub fn invalid_value(key: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self::InvalidValue {
            key: key.into(),
            expected,
            found: value_kind(found).to_string(),
        }
    }

    pub fn unknown_setting(key: impl Into<String>) -> Self {
        Self::UnknownSetting { key: key.into() }
    }

    pub fn missing_architecture(mode: impl Into<String>) -> Self {
        Self::MissingArchitecture { mode: mode.into() }
    }

    pub fn unknown_model(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownModel {
            name: name.into(),
            available,
        }
    }
}

/// Human-readable kind of a config value, for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
