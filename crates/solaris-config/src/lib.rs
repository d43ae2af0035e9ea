//! # Solaris Config
//!
//! Type-safe configuration for the Solaris i18n runtime.
//!
//! This crate provides the configuration schema with defaults, TOML loading
//! with environment variable overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
