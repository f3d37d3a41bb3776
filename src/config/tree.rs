//! Mode-keyed view over the loaded configuration.

use serde_json::{Map, Value};

use crate::error::HarnessError;

/// Reserved mode naming the base layer. Always a valid selection, even when
/// the tree carries no entry for it.
pub const DEFAULT_MODE: &str = "default";

/// Per-mode section bound onto the runner's declared settings.
pub const RUNNER_SECTION: &str = "runner";

/// Per-mode key holding the opaque model construction parameter.
pub const ARCHITECTURE_KEY: &str = "architecture";

/// All loaded configuration, keyed first by mode name.
///
/// Built once by the loader and read-only afterwards; resolution and the
/// runner only ever look values up.
#[derive(Debug, Clone, Default)]
pub struct ConfigTree {
    modes: Map<String, Value>,
}

impl ConfigTree {
    /// Wrap a parsed document. The root must be a mapping of mode names;
    /// an empty document yields an empty tree.
    pub fn from_value(root: Value) -> Result<Self, HarnessError> {
        match root {
            Value::Object(modes) => Ok(Self { modes }),
            Value::Null => Ok(Self::default()),
            _ => Err(HarnessError::malformed_section("(root)")),
        }
    }

    /// Parse a YAML document into a tree.
    pub fn from_yaml(text: &str) -> Result<Self, HarnessError> {
        let root: Value = serde_yaml::from_str(text)?;
        Self::from_value(root)
    }

    /// Whether `mode` is a key of the tree.
    pub fn contains_mode(&self, mode: &str) -> bool {
        self.modes.contains_key(mode)
    }

    /// Sorted mode names, for error reporting and inspection.
    pub fn mode_names(&self) -> Vec<String> {
        // serde_json's map iterates in key order
        self.modes.keys().cloned().collect()
    }

    /// A mode's named section as a flat mapping.
    ///
    /// An absent mode, an absent section, and a null section (a bare
    /// `runner:` line in YAML) all yield `None`; a present non-mapping value
    /// is `MalformedSection`.
    pub fn section(
        &self,
        mode: &str,
        section: &str,
    ) -> Result<Option<&Map<String, Value>>, HarnessError> {
        let Some(entry) = self.modes.get(mode) else {
            return Ok(None);
        };
        let mode_map = match entry {
            Value::Object(map) => map,
            Value::Null => return Ok(None),
            _ => return Err(HarnessError::malformed_section(mode)),
        };
        match mode_map.get(section) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(HarnessError::malformed_section(format!("{mode}.{section}"))),
        }
    }

    /// The construction parameter for a mode's model.
    ///
    /// The value is opaque: it is handed to the selected constructor without
    /// interpretation.
    pub fn architecture(&self, mode: &str) -> Result<&Value, HarnessError> {
        let Some(entry) = self.modes.get(mode) else {
            return Err(HarnessError::invalid_mode(mode, self.mode_names()));
        };
        let mode_map = match entry {
            Value::Object(map) => map,
            Value::Null => return Err(HarnessError::missing_architecture(mode)),
            _ => return Err(HarnessError::malformed_section(mode)),
        };
        match mode_map.get(ARCHITECTURE_KEY) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(HarnessError::missing_architecture(mode)),
        }
    }
}
