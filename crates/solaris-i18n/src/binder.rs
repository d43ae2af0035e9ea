//! Writes resolved translations into a document.
//!
//! Each sweep re-scans the whole document, so its cost grows with document
//! size rather than with the number of changed strings. Elements added after
//! a sweep are picked up by the next one.

use solaris_config::MarkerConfig;
use tracing::debug;

use crate::document::Document;
use crate::resolver::{Replacements, Resolver};

/// What one sweep wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Elements whose text content was replaced.
    pub text: usize,
    /// Elements whose named attribute was replaced.
    pub attributes: usize,
    /// Elements whose `placeholder` attribute was replaced.
    pub placeholders: usize,
    /// Whether the document title was set.
    pub title: bool,
}

impl SweepReport {
    /// Total number of writes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.text + self.attributes + self.placeholders + usize::from(self.title)
    }
}

/// Resolves every marked element of `document` and writes the result.
///
/// - key marker: text content, or the attribute named by the attribute
///   marker when that is present and non-empty
/// - placeholder marker: the `placeholder` attribute
/// - title marker: the document title, first marked element only
pub fn apply_translations<D: Document>(
    resolver: &Resolver<'_>,
    markers: &MarkerConfig,
    document: &mut D,
) -> SweepReport {
    let none = Replacements::new();
    let mut report = SweepReport::default();

    for element in document.elements_with_attribute(&markers.key) {
        let key = document.attribute(&element, &markers.key).unwrap_or_default();
        let translation = resolver.translate(&key, &none);

        match document
            .attribute(&element, &markers.attribute)
            .filter(|name| !name.is_empty())
        {
            Some(target) => {
                document.set_attribute(&element, &target, &translation);
                report.attributes += 1;
            }
            None => {
                document.set_text_content(&element, &translation);
                report.text += 1;
            }
        }
    }

    for element in document.elements_with_attribute(&markers.placeholder) {
        let key = document.attribute(&element, &markers.placeholder).unwrap_or_default();
        let translation = resolver.translate(&key, &none);
        document.set_attribute(&element, "placeholder", &translation);
        report.placeholders += 1;
    }

    if let Some(element) = document.first_element_with_attribute(&markers.title) {
        let key = document.attribute(&element, &markers.title).unwrap_or_default();
        document.set_title(&resolver.translate(&key, &none));
        report.title = true;
    }

    debug!(
        text = report.text,
        attributes = report.attributes,
        placeholders = report.placeholders,
        title = report.title,
        "Applied translations"
    );

    report
}
