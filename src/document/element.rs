use std::fmt;

use crate::document::{DocumentConfig, TableData};

/// One renderable unit of document content.
///
/// Elements are collected into a [`Document`](crate::Document) in authoring
/// order and later walked by a renderer. Anything that is not already an
/// element can be displayed through [`Element::text`], which captures its
/// string form; being permissive here is deliberate, this is an authoring
/// tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Verbatim markdown text.
    RawText(String),

    /// A captioned table.
    Table {
        /// The tabular data.
        data: TableData,
        /// Caption shown with the table.
        caption: String,
        /// Anchor label for cross-references.
        label: Option<String>,
    },

    /// A captioned figure.
    Figure {
        /// Path to the image file, relative to the document output.
        path: String,
        /// Caption shown with the figure.
        caption: String,
        /// Anchor label for cross-references.
        label: Option<String>,
    },

    /// A citation of an external source.
    Citation {
        /// Citation identifier, shared across occurrences.
        id: String,
        /// Rendered citation text, e.g. `Smith et al. (2023)`.
        text: Option<String>,
    },

    /// A cross-reference to a labelled element in the same document.
    Reference {
        /// The label of the referenced element.
        label: String,
        /// Link text; falls back to the label itself.
        text: Option<String>,
    },

    /// A section title.
    Title {
        /// Title text; a leading `#` marks an explicit heading level.
        text: String,
        /// Anchor label for cross-references.
        label: Option<String>,
    },

    /// Document-wide metadata.
    Config(DocumentConfig),
}

impl Element {
    /// Captures any displayable value as raw text.
    ///
    /// This is the permissive fallback for content that matches no other
    /// variant; the value's `Display` form is recorded verbatim.
    #[must_use]
    pub fn text(content: impl fmt::Display) -> Self {
        Self::RawText(content.to_string())
    }

    /// Creates a table element.
    #[must_use]
    pub fn table(
        data: TableData,
        caption: impl Into<String>,
        label: Option<String>,
    ) -> Self {
        Self::Table {
            data,
            caption: caption.into(),
            label,
        }
    }

    /// Creates a figure element.
    #[must_use]
    pub fn figure(
        path: impl Into<String>,
        caption: impl Into<String>,
        label: Option<String>,
    ) -> Self {
        Self::Figure {
            path: path.into(),
            caption: caption.into(),
            label,
        }
    }

    /// Creates a citation element.
    #[must_use]
    pub fn citation(id: impl Into<String>, text: Option<String>) -> Self {
        Self::Citation {
            id: id.into(),
            text,
        }
    }

    /// Creates a cross-reference element.
    #[must_use]
    pub fn reference(label: impl Into<String>, text: Option<String>) -> Self {
        Self::Reference {
            label: label.into(),
            text,
        }
    }

    /// Creates a title element.
    #[must_use]
    pub fn title(text: impl Into<String>, label: Option<String>) -> Self {
        Self::Title {
            text: text.into(),
            label,
        }
    }

    /// The anchor label of this element, if it has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Table { label, .. }
            | Self::Figure { label, .. }
            | Self::Title { label, .. } => label.as_deref(),
            _ => None,
        }
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Self::RawText(text.to_string())
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Self::RawText(text)
    }
}

impl From<DocumentConfig> for Element {
    fn from(config: DocumentConfig) -> Self {
        Self::Config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_captures_any_displayable_value() {
        assert_eq!(Element::text(42), Element::RawText("42".to_string()));
        assert_eq!(
            Element::text("# Hello"),
            Element::RawText("# Hello".to_string())
        );
    }

    #[test]
    fn labels_are_exposed_for_anchored_variants() {
        let table = Element::table(TableData::default(), "cap", Some("tbl:x".to_string()));
        assert_eq!(table.label(), Some("tbl:x"));

        let citation = Element::citation("smith2023", None);
        assert_eq!(citation.label(), None);
    }
}
