//! # Solaris Common
//!
//! Shared types, error handling and logging for the Solaris i18n workspace.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: the validated [`LanguageCode`], the workspace-wide
//! [`SolarisError`], and tracing subscriber setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, SolarisError};
pub use logging::LoggingConfig;
pub use types::*;
