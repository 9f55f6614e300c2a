//! The document model: content elements and the ordered collector.
//!
//! A [`Document`] is an explicit context object owned by one pipeline run.
//! Modules append elements with [`Document::display`]; a renderer consumes
//! the frozen sequence through [`Document::snapshot`].

/// Document-wide metadata element.
pub mod config;
pub use config::DocumentConfig;

/// The tagged content-element union.
pub mod element;
pub use element::Element;

/// Row/column data for table elements.
pub mod table;
pub use table::TableData;

/// An ordered sequence of document elements collected during one pipeline
/// run.
///
/// Created empty at the start of a run, appended to while modules execute,
/// then handed to a renderer. Element order is exactly the order of
/// [`display`](Self::display) calls.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Appends one element, preserving call order.
    ///
    /// Strings append as raw markdown text; see [`Element::text`] for
    /// content that matches no element variant.
    pub fn display(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Appends several elements in order.
    pub fn display_all<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        for element in elements {
            self.display(element);
        }
    }

    /// Clears the document so a rerun starts from nothing.
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    /// The collected elements, in display order.
    #[must_use]
    pub fn snapshot(&self) -> &[Element] {
        &self.elements
    }

    /// The number of collected elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been displayed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the collected elements in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Element> for Document {
    fn extend<T: IntoIterator<Item = Element>>(&mut self, iter: T) {
        self.elements.extend(iter);
    }
}

/// Appends several values to a document in one call.
///
/// Mirrors the variadic authoring style of `display(a, b, c)`:
///
/// ```
/// use pyforge::{display, Document, Element};
///
/// let mut doc = Document::new();
/// display!(doc, "# Intro", Element::title("Results", None));
/// assert_eq!(doc.len(), 2);
/// ```
#[macro_export]
macro_rules! display {
    ($doc:expr $(, $element:expr)+ $(,)?) => {
        $( $doc.display($element); )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_display_order() {
        let mut doc = Document::new();
        doc.display("first");
        doc.display(Element::title("second", None));
        doc.display("third");

        let kinds: Vec<bool> = doc
            .snapshot()
            .iter()
            .map(|e| matches!(e, Element::RawText(_)))
            .collect();
        assert_eq!(kinds, [true, false, true]);
        assert_eq!(doc.snapshot()[0], Element::RawText("first".to_string()));
    }

    #[test]
    fn reset_empties_the_document() {
        let mut doc = Document::new();
        doc.display("content");
        assert!(!doc.is_empty());

        doc.reset();
        assert!(doc.snapshot().is_empty());
    }

    #[test]
    fn display_all_appends_in_order() {
        let mut doc = Document::new();
        doc.display_all(["a", "b", "c"]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn display_macro_matches_method_calls() {
        let mut via_macro = Document::new();
        display!(via_macro, "one", "two");

        let mut via_method = Document::new();
        via_method.display("one");
        via_method.display("two");

        assert_eq!(via_macro, via_method);
    }
}
