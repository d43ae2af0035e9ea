//! Resource base resolution against the page location.

use solaris_i18n::{I18nError, I18nResult};
use url::Url;

/// Resolves the configured resource `base` against the page location.
///
/// An absolute `base` is used as is. A relative one such as `translations/`
/// is joined onto `module_url` (the loading script's `import.meta.url`) when
/// the caller provides it, so resources sit next to the script wherever the
/// page lives. Without a module URL it is joined onto `document_base`, the
/// way the browser resolves a relative `fetch` path.
///
/// # Errors
///
/// [`I18nError::InvalidLocation`] when `base` is relative and there is no
/// usable URL to resolve it against.
pub fn resolve_resource_base(module_url: Option<&str>, document_base: Option<&str>, base: &str) -> I18nResult<Url> {
    if let Ok(url) = Url::parse(base) {
        return Ok(url);
    }

    let invalid = |reason: String| I18nError::InvalidLocation {
        location: base.to_string(),
        reason,
    };

    let anchor = module_url
        .or(document_base)
        .ok_or_else(|| invalid("no module or document URL to resolve against".to_string()))?;
    let anchor = Url::parse(anchor).map_err(|e| invalid(format!("bad base URL '{anchor}': {e}")))?;
    anchor.join(base).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://solaris.example/app/index.html";

    #[test]
    fn test_relative_base_joins_document_directory() {
        let url = resolve_resource_base(None, Some(PAGE), "translations/").unwrap();
        assert_eq!(url.as_str(), "https://solaris.example/app/translations/");

        let rooted = resolve_resource_base(None, Some(PAGE), "/i18n").unwrap();
        assert_eq!(rooted.as_str(), "https://solaris.example/i18n");
    }

    #[test]
    fn test_relative_base_prefers_module_directory() {
        let url = resolve_resource_base(
            Some("https://solaris.example/app/js/i18n.js"),
            Some("https://solaris.example/app/reports/2024/index.html"),
            "translations/",
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://solaris.example/app/js/translations/");
    }

    #[test]
    fn test_absolute_base_is_kept() {
        let url = resolve_resource_base(Some("https://solaris.example/js/i18n.js"), None, "https://cdn.example/i18n/").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example/i18n/");
    }

    #[test]
    fn test_relative_base_without_anchor_fails() {
        let err = resolve_resource_base(None, None, "translations/").unwrap_err();
        assert!(matches!(err, I18nError::InvalidLocation { .. }));

        assert!(resolve_resource_base(None, Some("not a url"), "translations/").is_err());
        assert!(resolve_resource_base(Some("not a url"), Some(PAGE), "translations/").is_err());
    }
}
