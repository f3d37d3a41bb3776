//! Closed registry mapping model names to constructors.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::HarnessError;
use crate::logging::Logger;
use crate::models::{DigitsMnist, DogBreedModel, TestModel, Trainable};

/// Constructor entry: takes the opaque architecture value, returns the model.
pub type ModelConstructor = fn(Value) -> Box<dyn Trainable>;

/// Fixed name-to-constructor table, composed once at startup.
///
/// The registry holds no instance state; one registry may construct any
/// number of independent models.
pub struct ModelRegistry {
    entries: BTreeMap<&'static str, ModelConstructor>,
    logger: Logger,
}

impl ModelRegistry {
    /// Empty registry; compose with [`with_model`](Self::with_model).
    pub fn new(logger: Logger) -> Self {
        Self {
            entries: BTreeMap::new(),
            logger,
        }
    }

    /// Registry holding every built-in model.
    pub fn builtin(logger: Logger) -> Self {
        Self::new(logger)
            .with_model("DigitsMNIST", DigitsMnist::construct)
            .with_model("DogBreedModel", DogBreedModel::construct)
            .with_model("TestModel", TestModel::construct)
    }

    /// Register a constructor under `name`.
    ///
    /// Intended for startup composition only; the table is fixed once the
    /// registry is in use.
    pub fn with_model(mut self, name: &'static str, constructor: ModelConstructor) -> Self {
        self.entries.insert(name, constructor);
        self
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().map(|n| n.to_string()).collect()
    }

    /// Construct the model registered under `name`, handing it `architecture`
    /// unmodified.
    ///
    /// Logs the concrete implementation that was instantiated (not the lookup
    /// key) so a name/implementation mismatch shows up in the run log.
    pub fn construct(
        &self,
        name: &str,
        architecture: Value,
    ) -> Result<Box<dyn Trainable>, HarnessError> {
        let Some(constructor) = self.entries.get(name) else {
            return Err(HarnessError::unknown_model(name, self.names()));
        };
        let model = constructor(architecture);
        self.logger
            .info(&format!("instantiated model {}", model.name()));
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemorySink};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn builtin_names_are_sorted() {
        let registry = ModelRegistry::builtin(Logger::new());
        assert_eq!(
            registry.names(),
            vec!["DigitsMNIST", "DogBreedModel", "TestModel"]
        );
        assert!(registry.contains("TestModel"));
        assert!(!registry.contains("testmodel"));
    }

    #[test]
    fn constructs_the_selected_model() {
        let registry = ModelRegistry::builtin(Logger::new());
        let model = registry.construct("TestModel", json!("arch-X")).unwrap();
        assert_eq!(model.name(), "TestModel");
    }

    #[test]
    fn construction_logs_the_concrete_implementation() {
        let sink = Arc::new(MemorySink::new());
        let registry = ModelRegistry::builtin(Logger::new().with_sink(sink.clone()));

        registry.construct("DigitsMNIST", json!({})).unwrap();

        assert_eq!(sink.count_at(LogLevel::Info), 1);
        assert!(sink.events()[0].message.contains("DigitsMNIST"));
    }

    #[test]
    fn unknown_name_fails_with_the_valid_names() {
        let registry = ModelRegistry::builtin(Logger::new());
        let err = registry.construct("Nope", json!({})).err().unwrap();
        match err {
            HarnessError::UnknownModel { name, available } => {
                assert_eq!(name, "Nope");
                assert_eq!(available, registry.names());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn one_registry_constructs_independent_models() {
        let registry = ModelRegistry::builtin(Logger::new());
        let first = registry.construct("TestModel", json!(1)).unwrap();
        let second = registry.construct("TestModel", json!(2)).unwrap();
        assert_eq!(first.name(), second.name());
    }
}
