//! # Solaris Web
//!
//! Browser host for Solaris i18n. Provides a [`solaris_i18n::Document`]
//! backed by the live DOM, a `localStorage` preference store, console
//! logging, and the `SolarisI18n` class exported to JavaScript.
//!
//! Everything except resource base resolution is only compiled on `wasm32`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod location;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use bindings::SolarisI18n;
#[cfg(target_arch = "wasm32")]
pub use dom::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStoragePreferences;

pub use location::resolve_resource_base;
