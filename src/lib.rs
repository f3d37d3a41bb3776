//! Config-driven training harness.
//!
//! Layered YAML configuration selects a *mode*; resolution binds the default
//! and mode layers onto the runner's declared settings; a closed model
//! registry then turns the resolved model name into a trainable instance.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod runner;
