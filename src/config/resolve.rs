//! Layered binding of configuration values onto a runtime target.
//!
//! Two layers apply in a fixed order: the `default` mode's runner section,
//! then the active mode's runner section, so mode values win on key
//! collision. Each key binds only if the target declares a matching setting;
//! keys with no match are logged as warnings and skipped. Within one layer
//! the binding order across keys is unspecified.

use serde_json::{Map, Value};

use crate::config::tree::{ConfigTree, DEFAULT_MODE, RUNNER_SECTION};
use crate::error::HarnessError;
use crate::logging::Logger;

/// Bind surface a runtime target exposes to the resolver.
///
/// Implementations declare a fixed set of named settings; resolution never
/// creates settings the target does not already declare.
pub trait BindTarget {
    /// Whether `key` names a declared setting.
    fn has_attr(&self, key: &str) -> bool;

    /// Assign `value` to the declared setting `key`.
    ///
    /// Callers check `has_attr` first. An undeclared `key` is
    /// `UnknownSetting`; a value that does not convert to the setting's type
    /// is `InvalidValue`.
    fn set_attr(&mut self, key: &str, value: &Value) -> Result<(), HarnessError>;
}

/// Applies configuration layers onto a [`BindTarget`].
pub struct ConfigResolver {
    logger: Logger,
}

impl ConfigResolver {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Apply the `default` mode's runner section.
    ///
    /// An absent or empty default layer is a valid no-op.
    pub fn resolve_defaults<T: BindTarget>(
        &self,
        target: &mut T,
        tree: &ConfigTree,
    ) -> Result<(), HarnessError> {
        match tree.section(DEFAULT_MODE, RUNNER_SECTION)? {
            Some(section) => self.bind_section(target, section, DEFAULT_MODE),
            None => Ok(()),
        }
    }

    /// Apply the active mode's runner section on top of the defaults.
    ///
    /// Mode `"default"` never has an override layer. A mode that exists but
    /// carries no runner section is a valid no-op; a mode missing from the
    /// tree entirely is `InvalidMode`.
    pub fn resolve_mode_overrides<T: BindTarget>(
        &self,
        target: &mut T,
        tree: &ConfigTree,
        mode: &str,
    ) -> Result<(), HarnessError> {
        if mode == DEFAULT_MODE {
            return Ok(());
        }
        if !tree.contains_mode(mode) {
            return Err(HarnessError::invalid_mode(mode, tree.mode_names()));
        }
        match tree.section(mode, RUNNER_SECTION)? {
            Some(section) => self.bind_section(target, section, mode),
            None => Ok(()),
        }
    }

    /// Apply both layers in order: defaults first, then mode overrides.
    pub fn resolve<T: BindTarget>(
        &self,
        target: &mut T,
        tree: &ConfigTree,
        mode: &str,
    ) -> Result<(), HarnessError> {
        self.resolve_defaults(target, tree)?;
        self.resolve_mode_overrides(target, tree, mode)
    }

    fn bind_section<T: BindTarget>(
        &self,
        target: &mut T,
        section: &Map<String, Value>,
        layer: &str,
    ) -> Result<(), HarnessError> {
        for (key, value) in section {
            if target.has_attr(key) {
                target.set_attr(key, value)?;
                self.logger
                    .info(&format!("setting '{key}' = {value} ({layer} layer)"));
            } else {
                self.logger.warning(&format!(
                    "config key '{key}' matches no runner setting and was skipped \
                     (value: {value}, {layer} layer)"
                ));
            }
        }
        Ok(())
    }
}
