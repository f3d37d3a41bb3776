//! Dog-breed image classifier.

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::Trainable;

/// Dog-breed classifier over an externally described layer stack.
#[derive(Debug)]
pub struct DogBreedModel {
    architecture: Value,
}

impl DogBreedModel {
    pub fn new(architecture: Value) -> Self {
        Self { architecture }
    }

    /// Boxed constructor for registry use.
    pub fn construct(architecture: Value) -> Box<dyn Trainable> {
        Box::new(Self::new(architecture))
    }
}

impl Trainable for DogBreedModel {
    fn name(&self) -> &'static str {
        "DogBreedModel"
    }

    fn train(&mut self) -> Result<()> {
        let layers = self
            .architecture
            .get("layers")
            .and_then(Value::as_array)
            .map(|l| l.len())
            .unwrap_or(0);
        info!(layers, "DogBreedModel training started");
        info!("DogBreedModel training finished");
        Ok(())
    }
}
