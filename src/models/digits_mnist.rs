//! Handwritten-digit classifier.

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::Trainable;

/// MNIST digit classifier.
///
/// The architecture value arrives opaquely from the configuration; the only
/// field this implementation reads back out of it is an optional `epochs`
/// count.
#[derive(Debug)]
pub struct DigitsMnist {
    architecture: Value,
    epochs: u64,
}

impl DigitsMnist {
    pub fn new(architecture: Value) -> Self {
        let epochs = architecture
            .get("epochs")
            .and_then(Value::as_u64)
            .unwrap_or(3);
        Self {
            architecture,
            epochs,
        }
    }

    /// Boxed constructor for registry use.
    pub fn construct(architecture: Value) -> Box<dyn Trainable> {
        Box::new(Self::new(architecture))
    }

    pub fn architecture(&self) -> &Value {
        &self.architecture
    }
}

impl Trainable for DigitsMnist {
    fn name(&self) -> &'static str {
        "DigitsMNIST"
    }

    fn train(&mut self) -> Result<()> {
        info!(architecture = %self.architecture, "DigitsMNIST training started");
        for epoch in 1..=self.epochs {
            info!(epoch, total = self.epochs, "epoch finished");
        }
        info!("DigitsMNIST training finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_epochs_from_the_architecture() {
        let model = DigitsMnist::new(json!({"epochs": 7, "layers": [16, 10]}));
        assert_eq!(model.epochs, 7);
    }

    #[test]
    fn defaults_epochs_when_unspecified() {
        let model = DigitsMnist::new(json!("arch-X"));
        assert_eq!(model.epochs, 3);
        assert_eq!(model.architecture(), &json!("arch-X"));
    }

    #[test]
    fn training_completes() {
        let mut model = DigitsMnist::new(json!({"epochs": 1}));
        assert_eq!(model.name(), "DigitsMNIST");
        assert!(model.train().is_ok());
    }
}
