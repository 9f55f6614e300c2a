use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document-wide metadata, rendered as a YAML metadata block.
///
/// Pandoc-flavoured markdown reads this block for the title page and, when
/// `bibliography` is set, for citation processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Document title.
    pub title: String,

    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Publication date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Path to a bibliography file for citation processing.
    #[serde(rename = "bibliography", skip_serializing_if = "Option::is_none")]
    pub bib_path: Option<PathBuf>,
}

impl DocumentConfig {
    /// Creates a config with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            date: None,
            bib_path: None,
        }
    }

    /// Sets the author.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the date.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the bibliography path.
    #[must_use]
    pub fn bibliography(mut self, path: impl Into<PathBuf>) -> Self {
        self.bib_path = Some(path.into());
        self
    }

    /// Renders the config as a fenced YAML metadata block.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let yaml = serde_yaml::to_string(self).expect("this must never fail");
        format!("---\n{yaml}---")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_block_contains_every_field() {
        let config = DocumentConfig::new("Test Document")
            .author("Test Author")
            .date(NaiveDate::from_ymd_opt(2025, 5, 17).unwrap());

        let markdown = config.to_markdown();
        assert!(markdown.starts_with("---\n"));
        assert!(markdown.ends_with("---"));
        assert!(markdown.contains("Test Document"));
        assert!(markdown.contains("Test Author"));
        assert!(markdown.contains("2025-05-17"));
    }

    #[test]
    fn unset_fields_are_omitted() {
        let markdown = DocumentConfig::new("Bare").to_markdown();
        assert!(!markdown.contains("author"));
        assert!(!markdown.contains("date"));
        assert!(!markdown.contains("bibliography"));
    }

    #[test]
    fn bibliography_path_is_serialized() {
        let markdown = DocumentConfig::new("Doc")
            .bibliography("docs/refs.bib")
            .to_markdown();
        assert!(markdown.contains("bibliography: docs/refs.bib"));
    }
}
