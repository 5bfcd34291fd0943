//! Section header recognition
//!
//! The registry document partitions its listings under two section headers,
//! "Official Integrations" and "Community Servers". Everything between one
//! recognized header and the next belongs to that header's category; lines
//! before the first recognized header belong to no category and are never
//! extracted.
//!
//! Header recognition is deliberately loose about decoration and strict about
//! the label: any heading depth (`#` through `######`) is accepted, an
//! optional run of decorative glyphs (typically an emoji) may precede the
//! label, but the label text itself must match case-sensitively.

use crate::error::Result;
use crate::model::Category;
use regex::Regex;

/// Recognizes category section headers in the registry document.
pub struct CategoryTracker {
    pattern: Regex,
}

impl CategoryTracker {
    /// Compile the header pattern for all recognized categories.
    pub fn new() -> Result<Self> {
        let labels = Category::ALL
            .iter()
            .map(|c| regex::escape(c.header_label()))
            .collect::<Vec<_>>()
            .join("|");
        // One or more heading markers, an optional decorative glyph run
        // (anything that is not a letter, digit, or whitespace), then the
        // exact label.
        let pattern = Regex::new(&format!(
            r"^\s*#+\s*(?:[^\p{{L}}\p{{N}}\s]+\s*)?(?P<label>{labels})\s*$"
        ))?;
        Ok(CategoryTracker { pattern })
    }

    /// If `line` is a recognized section header, return its category.
    ///
    /// A header line is never content: callers must not attempt extraction
    /// on a line this method classifies.
    pub fn classify(&self, line: &str) -> Option<Category> {
        let caps = self.pattern.captures(line)?;
        let label = caps.name("label")?.as_str();
        Category::ALL.into_iter().find(|c| c.header_label() == label)
    }
}
