//! Error types for validation and configuration failures.
//!
//! Validation failures are data: a [`ValidationError`] carries a machine
//! readable code, a rendered message and an open `local` bag of details.
//! Configuration failures ([`ConfigError`]) are returned by builder methods
//! and never appear during validation.

mod config_error;
mod validation_error;

pub use config_error::ConfigError;
pub use validation_error::{Local, ValidationError, ValidationErrors};
