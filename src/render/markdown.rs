use std::{
    collections::{HashMap, HashSet},
    io,
    path::Path,
};

use crate::document::Element;

/// A non-fatal authoring problem found while rendering.
///
/// Warnings degrade the output (a visibly broken marker is emitted in
/// place of the resolved form) instead of aborting the render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderWarning {
    /// A reference names a label no element in the document carries.
    #[error("reference to unknown label '{0}'")]
    UnresolvedReference(String),

    /// A citation id was used but never given any text.
    #[error("citation '{0}' has no text")]
    UnresolvedCitation(String),
}

/// The output of a markdown render: the document text plus any warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered markdown.
    pub markdown: String,
    /// Authoring problems found during the render.
    pub warnings: Vec<RenderWarning>,
}

impl Rendered {
    /// Writes the markdown to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, &self.markdown)
    }
}

/// Renders a document snapshot to pandoc-flavoured markdown.
///
/// Tables become pipe tables with a trailing caption line, figures become
/// image includes, and citations become numbered footnote markers with a
/// references section at the end of the document. Cross-references resolve
/// against labels anywhere in the sequence, before or after the reference.
#[must_use]
pub fn render(elements: &[Element]) -> Rendered {
    MarkdownRenderer::new(elements).render()
}

/// Two-pass renderer: pass one registers labels and numbers citations in
/// first-use order, pass two emits one fragment per element.
struct MarkdownRenderer<'a> {
    elements: &'a [Element],
    labels: HashSet<&'a str>,
    citation_order: Vec<&'a str>,
    citation_texts: HashMap<&'a str, &'a str>,
    warnings: Vec<RenderWarning>,
}

impl<'a> MarkdownRenderer<'a> {
    fn new(elements: &'a [Element]) -> Self {
        let mut labels = HashSet::new();
        let mut citation_order: Vec<&str> = Vec::new();
        let mut citation_texts = HashMap::new();

        for element in elements {
            if let Some(label) = element.label() {
                // Duplicate labels: the anchor is emitted at each site, so
                // later occurrences win any lookup. Presence is all that
                // reference resolution needs.
                labels.insert(label);
            }
            if let Element::Citation { id, text } = element {
                if !citation_order.contains(&id.as_str()) {
                    citation_order.push(id);
                }
                if let Some(text) = text {
                    citation_texts.insert(id.as_str(), text.as_str());
                }
            }
        }

        Self {
            elements,
            labels,
            citation_order,
            citation_texts,
            warnings: Vec::new(),
        }
    }

    fn render(mut self) -> Rendered {
        let mut fragments: Vec<String> = Vec::with_capacity(self.elements.len() + 1);
        for element in self.elements {
            fragments.push(self.fragment(element));
        }

        if let Some(references) = self.references_section() {
            fragments.push(references);
        }

        let markdown = fragments
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n\n");

        Rendered {
            markdown,
            warnings: self.warnings,
        }
    }

    fn fragment(&mut self, element: &Element) -> String {
        match element {
            Element::RawText(text) => text.trim().to_string(),
            Element::Config(config) => config.to_markdown(),
            Element::Title { text, label } => {
                let heading = if text.starts_with('#') {
                    text.clone()
                } else {
                    format!("# {text}")
                };
                label
                    .as_ref()
                    .map_or(heading.clone(), |label| format!("{heading} {{#{label}}}"))
            }
            Element::Table {
                data,
                caption,
                label,
            } => {
                let caption_line = label.as_ref().map_or_else(
                    || format!(": {caption}"),
                    |label| format!(": {caption} {{#{label}}}"),
                );
                format!("{}\n\n{caption_line}", data.to_markdown())
            }
            Element::Figure {
                path,
                caption,
                label,
            } => label.as_ref().map_or_else(
                || format!("![{caption}]({path})"),
                |label| format!("![{caption}]({path}){{#{label}}}"),
            ),
            Element::Citation { id, .. } => {
                let number = self.citation_number(id);
                format!("[^{number}]")
            }
            Element::Reference { label, text } => {
                if self.labels.contains(label.as_str()) {
                    let text = text.as_deref().unwrap_or(label);
                    format!("[{text}](#{label})")
                } else {
                    self.warnings
                        .push(RenderWarning::UnresolvedReference(label.clone()));
                    format!("**[missing reference: {label}]**")
                }
            }
        }
    }

    fn citation_number(&self, id: &str) -> usize {
        self.citation_order
            .iter()
            .position(|known| *known == id)
            .map_or(0, |index| index + 1)
    }

    fn references_section(&mut self) -> Option<String> {
        if self.citation_order.is_empty() {
            return None;
        }

        let mut lines = vec!["## References".to_string(), String::new()];
        for (index, id) in self.citation_order.iter().enumerate() {
            let number = index + 1;
            if let Some(text) = self.citation_texts.get(id) {
                lines.push(format!("[^{number}]: {text}"));
            } else {
                self.warnings
                    .push(RenderWarning::UnresolvedCitation((*id).to_string()));
                lines.push(format!("[^{number}]: [citation not found: {id}]"));
            }
        }
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentConfig, Element, TableData};

    fn sample_table() -> TableData {
        TableData::from_records(vec!["A", "B"], vec![vec!["1", "x"], vec!["2", "y"]])
    }

    #[test]
    fn heading_then_table_renders_in_order() {
        let mut doc = Document::new();
        doc.display("# Hello");
        doc.display(Element::table(sample_table(), "caption", Some("id1".to_string())));

        let rendered = render(doc.snapshot());
        let heading = rendered.markdown.find("# Hello").unwrap();
        let table = rendered.markdown.find("| A | B |").unwrap();
        assert!(heading < table);
        assert!(rendered.markdown.contains("| --- | --- |"));
        assert!(rendered.markdown.contains(": caption {#id1}"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn figure_includes_anchor() {
        let element = Element::figure("test/path.png", "Test Caption", Some("fig:test".to_string()));
        let rendered = render(&[element]);
        assert!(rendered
            .markdown
            .contains("![Test Caption](test/path.png){#fig:test}"));
    }

    #[test]
    fn title_without_hash_is_promoted() {
        let rendered = render(&[Element::title("Test Title", Some("sec:test".to_string()))]);
        assert_eq!(rendered.markdown, "# Test Title {#sec:test}");
    }

    #[test]
    fn title_with_explicit_level_is_verbatim() {
        let rendered = render(&[Element::title("## Conclusion", None)]);
        assert_eq!(rendered.markdown, "## Conclusion");
    }

    #[test]
    fn resolved_reference_links_to_the_label() {
        let elements = [
            Element::table(sample_table(), "Sample", Some("table-sample".to_string())),
            Element::reference("table-sample", Some("Table 1".to_string())),
        ];
        let rendered = render(&elements);
        assert!(rendered.markdown.contains("[Table 1](#table-sample)"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn forward_references_resolve_too() {
        let elements = [
            Element::reference("tbl:late", None),
            Element::table(sample_table(), "Late", Some("tbl:late".to_string())),
        ];
        let rendered = render(&elements);
        assert!(rendered.markdown.contains("[tbl:late](#tbl:late)"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn missing_reference_renders_a_broken_marker() {
        let rendered = render(&[Element::reference(
            "missing_id",
            Some("see Table 2".to_string()),
        )]);
        assert!(rendered
            .markdown
            .contains("**[missing reference: missing_id]**"));
        assert_eq!(
            rendered.warnings,
            [RenderWarning::UnresolvedReference("missing_id".to_string())]
        );
    }

    #[test]
    fn citations_are_numbered_in_first_use_order() {
        let elements = [
            Element::citation("smith2023", Some("Smith et al. (2023)".to_string())),
            Element::citation("jones2024", Some("Jones (2024)".to_string())),
            Element::citation("smith2023", None),
        ];
        let rendered = render(&elements);
        assert!(rendered.markdown.contains("## References"));
        assert!(rendered.markdown.contains("[^1]: Smith et al. (2023)"));
        assert!(rendered.markdown.contains("[^2]: Jones (2024)"));
        // The repeated citation reuses its number.
        assert_eq!(rendered.markdown.matches("[^1]").count(), 3);
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn citation_with_no_text_warns_but_renders() {
        let rendered = render(&[Element::citation("ghost", None)]);
        assert!(rendered.markdown.contains("[^1]: [citation not found: ghost]"));
        assert_eq!(
            rendered.warnings,
            [RenderWarning::UnresolvedCitation("ghost".to_string())]
        );
    }

    #[test]
    fn config_renders_as_metadata_block() {
        let rendered = render(&[Element::Config(
            DocumentConfig::new("Doc").author("Author"),
        )]);
        assert!(rendered.markdown.starts_with("---\n"));
        assert!(rendered.markdown.contains("title: Doc"));
    }

    #[test]
    fn empty_document_renders_empty() {
        let rendered = render(&[]);
        assert!(rendered.markdown.is_empty());
        assert!(rendered.warnings.is_empty());
    }
}
