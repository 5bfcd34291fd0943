//! Listing-line extraction
//!
//! One registry listing occupies one line, of the general shape:
//!
//! ```text
//! - ![icon](https://host/icon.png) **[Name](https://host/owner/repo)** - Description text
//! ```
//!
//! The bold-emphasized hyperlink is the only required segment. The leading
//! list bullet, the image reference, and the separator-plus-description are
//! all optional. Image and link are positionally independent, so the icon is
//! matched by a second, narrower pattern over the whole line rather than as
//! part of the primary shape.
//!
//! A line that does not match the primary pattern is not a candidate and not
//! an error; extraction never fails on malformed partial matches.

use crate::error::Result;
use regex::Regex;

/// The primary listing shape: optional bullet, optional image, a required
/// `**[text](target)**` link, and an optional `-`/`–` separator followed by
/// free text.
const ENTRY_PATTERN: &str = r"^\s*(?:[-*+]\s+)?(?:!\[[^\]]*\]\([^)]*\)\s*)?\*\*\[(?P<name>[^\]]+)\]\((?P<url>[^)]+)\)\*\*\s*(?:[-–]\s*(?P<desc>.*?))?\s*$";

/// An embedded image reference, anywhere on the line.
const IMAGE_PATTERN: &str = r"!\[[^\]]*\]\((?P<icon>[^)]+)\)";

/// The fields parsed out of a single listing line.
///
/// Category, identifier, and scan date are the scanner's concern; the
/// extractor reports only what the line itself says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Link text, trimmed of surrounding whitespace.
    pub identity: String,
    /// Link target, verbatim. No normalization, no trailing-slash stripping.
    pub source_url: String,
    /// Text after the separator, trimmed. Empty when no separator present.
    pub description: String,
    /// Target of an embedded image reference, if the line carried one.
    pub icon_url: Option<String>,
}

/// Parses individual listing lines of the registry document.
pub struct EntryExtractor {
    entry: Regex,
    image: Regex,
}

impl EntryExtractor {
    /// Compile the listing and image patterns.
    pub fn new() -> Result<Self> {
        Ok(EntryExtractor {
            entry: Regex::new(ENTRY_PATTERN)?,
            image: Regex::new(IMAGE_PATTERN)?,
        })
    }

    /// Attempt to parse one line as a listing.
    ///
    /// Returns `None` when the primary link pattern does not match; the line
    /// is simply not a candidate.
    pub fn extract(&self, line: &str) -> Option<ExtractedEntry> {
        let caps = self.entry.captures(line)?;
        let identity = caps.name("name")?.as_str().trim().to_string();
        let source_url = caps.name("url")?.as_str().to_string();
        let description = caps
            .name("desc")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let icon_url = self
            .image
            .captures(line)
            .and_then(|c| c.name("icon"))
            .map(|m| m.as_str().to_string());

        Some(ExtractedEntry {
            identity,
            source_url,
            description,
            icon_url,
        })
    }
}
