//! Layered configuration: discovery, merging, and resolution.
//!
//! Configuration is YAML keyed first by *mode*, a named variant selected at
//! run start, with `"default"` as the always-valid base layer. Loading merges
//! file tiers field by field; resolution then binds the default layer and the
//! active mode's layer onto the runner's declared settings, warning about
//! keys the runner does not declare.

mod loader;
mod merge;
mod resolve;
mod tree;

pub use loader::{ConfigLoader, ConfigPaths};
pub use merge::{deep_merge, deep_merge_all};
pub use resolve::{BindTarget, ConfigResolver};
pub use tree::{ARCHITECTURE_KEY, ConfigTree, DEFAULT_MODE, RUNNER_SECTION};
