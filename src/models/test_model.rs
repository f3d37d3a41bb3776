//! Minimal model for exercising the pipeline without real work.

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::Trainable;

/// Does nothing beyond recording that training ran. Useful for checking
/// configuration and registry wiring end to end.
#[derive(Debug, Default)]
pub struct TestModel {
    architecture: Value,
    trained: bool,
}

impl TestModel {
    pub fn new(architecture: Value) -> Self {
        Self {
            architecture,
            trained: false,
        }
    }

    /// Boxed constructor for registry use.
    pub fn construct(architecture: Value) -> Box<dyn Trainable> {
        Box::new(Self::new(architecture))
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }
}

impl Trainable for TestModel {
    fn name(&self) -> &'static str {
        "TestModel"
    }

    fn train(&mut self) -> Result<()> {
        self.trained = true;
        info!(architecture = %self.architecture, "TestModel trained");
        Ok(())
    }
}
