//! The hosting program: resolved settings and the run pipeline.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::{BindTarget, ConfigResolver, ConfigTree};
use crate::error::HarnessError;
use crate::logging::Logger;
use crate::registry::ModelRegistry;

/// Settings the configuration may bind on the runner.
///
/// The field set is fixed at compile time. Configuration keys with no
/// matching field are warned about and skipped, never added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerSettings {
    /// Registered name of the model to construct.
    pub model: String,
    /// Label attached to this run's log output.
    pub run_name: String,
    /// Directory holding training inputs.
    pub data_dir: PathBuf,
    /// Seed for any randomized model internals.
    pub seed: u64,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            run_name: "run".to_string(),
            data_dir: PathBuf::from("data"),
            seed: 0,
        }
    }
}

/// Names of all declared settings.
const SETTING_NAMES: &[&str] = &["model", "run_name", "data_dir", "seed"];

impl BindTarget for RunnerSettings {
    fn has_attr(&self, key: &str) -> bool {
        SETTING_NAMES.contains(&key)
    }

    fn set_attr(&mut self, key: &str, value: &Value) -> Result<(), HarnessError> {
        match key {
            "model" => self.model = string_value(key, value)?,
            "run_name" => self.run_name = string_value(key, value)?,
            "data_dir" => self.data_dir = PathBuf::from(string_value(key, value)?),
            "seed" => self.seed = integer_value(key, value)?,
            _ => return Err(HarnessError::unknown_setting(key)),
        }
        Ok(())
    }
}

fn string_value(key: &str, value: &Value) -> Result<String, HarnessError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| HarnessError::invalid_value(key, "a string", value))
}

fn integer_value(key: &str, value: &Value) -> Result<u64, HarnessError> {
    value
        .as_u64()
        .ok_or_else(|| HarnessError::invalid_value(key, "a non-negative integer", value))
}

/// Drives one training run: resolve configuration, construct the selected
/// model, train it.
pub struct TrainRunner {
    settings: RunnerSettings,
    logger: Logger,
}

impl TrainRunner {
    pub fn new(logger: Logger) -> Self {
        Self {
            settings: RunnerSettings::default(),
            logger,
        }
    }

    /// Resolved settings, for inspection after [`prepare`](Self::prepare) or
    /// [`run`](Self::run).
    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Bind the default layer and the mode layer onto the settings.
    pub fn prepare(&mut self, tree: &ConfigTree, mode: &str) -> Result<(), HarnessError> {
        let resolver = ConfigResolver::new(self.logger.clone());
        resolver.resolve(&mut self.settings, tree, mode)
    }

    /// Full pipeline: resolve, select, construct, train.
    ///
    /// Any resolution or lookup failure halts the run before a model is
    /// constructed.
    pub fn run(&mut self, tree: &ConfigTree, mode: &str, registry: &ModelRegistry) -> Result<()> {
        self.prepare(tree, mode)?;

        if self.settings.model.is_empty() {
            return Err(HarnessError::ModelNotSelected.into());
        }
        let architecture = tree.architecture(mode)?;

        self.logger.info(&format!(
            "run '{}' resolved: {}",
            self.settings.run_name,
            serde_json::to_string(&self.settings)?
        ));

        let mut model = registry.construct(&self.settings.model, architecture.clone())?;
        model.train()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declared_settings_bind_with_their_types() {
        let mut settings = RunnerSettings::default();
        settings.set_attr("model", &json!("TestModel")).unwrap();
        settings.set_attr("run_name", &json!("smoke")).unwrap();
        settings.set_attr("data_dir", &json!("/tmp/inputs")).unwrap();
        settings.set_attr("seed", &json!(17)).unwrap();

        assert_eq!(settings.model, "TestModel");
        assert_eq!(settings.run_name, "smoke");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/inputs"));
        assert_eq!(settings.seed, 17);
    }

    #[test]
    fn wrong_type_is_invalid_value() {
        let mut settings = RunnerSettings::default();
        assert!(matches!(
            settings.set_attr("seed", &json!("not a number")),
            Err(HarnessError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set_attr("model", &json!(5)),
            Err(HarnessError::InvalidValue { .. })
        ));
    }

    #[test]
    fn undeclared_key_is_rejected_by_set_attr() {
        let mut settings = RunnerSettings::default();
        assert!(!settings.has_attr("learning_rate"));
        assert!(matches!(
            settings.set_attr("learning_rate", &json!(0.1)),
            Err(HarnessError::UnknownSetting { .. })
        ));
    }

    #[test]
    fn run_requires_a_model_selection() {
        let tree = ConfigTree::from_yaml("default:\n  runner:\n    seed: 1\n").unwrap();
        let registry = ModelRegistry::builtin(Logger::new());
        let mut runner = TrainRunner::new(Logger::new());

        let err = runner.run(&tree, "default", &registry).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HarnessError>(),
            Some(HarnessError::ModelNotSelected)
        ));
    }

    #[test]
    fn run_trains_the_configured_model() {
        let tree = ConfigTree::from_yaml(
            r#"
default:
  runner:
    model: TestModel
  architecture: arch-X
"#,
        )
        .unwrap();
        let registry = ModelRegistry::builtin(Logger::new());
        let mut runner = TrainRunner::new(Logger::new());

        runner.run(&tree, "default", &registry).unwrap();
        assert_eq!(runner.settings().model, "TestModel");
    }
}
