//! Test utilities and shared test helpers for the Solaris workspace.
//!
//! Fixtures here are shared by the integration tests of the other crates,
//! which enable them through the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use crate::types::LanguageCode;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests, writing through the test harness so output
/// only appears for failing tests. Safe to call repeatedly.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Shorthand for a known-good language code in tests.
///
/// # Panics
///
/// Panics if `code` is not a valid language code.
#[must_use]
pub fn lang(code: &str) -> LanguageCode {
    LanguageCode::new(code).expect("test language code must be valid")
}

/// Create a temporary directory for tests that automatically cleans up.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[cfg(feature = "tempfile")]
#[must_use]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Translation documents used across test suites.
pub mod translation_fixtures {
    /// Estonian page strings.
    pub const ET_JSON: &str = r#"{
  "nav": {
    "home": "Avaleht",
    "settings": "Seaded"
  },
  "greeting": {
    "hello": "Tere, {name}!",
    "welcome": "Tere tulemast"
  },
  "form": {
    "search": "Otsi..."
  },
  "page": {
    "title": "Solaris juhtpaneel"
  }
}"#;

    /// English page strings, used as the fallback language.
    pub const EN_JSON: &str = r#"{
  "nav": {
    "home": "Home",
    "settings": "Settings",
    "about": "About"
  },
  "greeting": {
    "hello": "Hello, {name}!",
    "welcome": "Welcome",
    "count": "{count} of {total} items, {count} shown"
  },
  "form": {
    "search": "Search...",
    "email": "Email address"
  },
  "page": {
    "title": "Solaris dashboard"
  },
  "status": {
    "offline": "Server unreachable"
  }
}"#;

    /// A document that is not valid JSON.
    pub const MALFORMED_JSON: &str = r#"{"nav": {"home": "Home""#;
}

/// Property-based testing strategies using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for a single key path segment.
    pub fn segment_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9_]{0,8}".prop_map(|s| s)
    }

    /// Strategy for a dotted key path of one to four segments.
    pub fn key_path_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(segment_strategy(), 1..=4).prop_map(|segments| segments.join("."))
    }

    /// Strategy for leaf text that contains no placeholder braces.
    pub fn plain_text_strategy() -> impl Strategy<Value = String> {
        r"[A-Za-z0-9 ,.!?]{0,24}".prop_map(|s| s)
    }
}
