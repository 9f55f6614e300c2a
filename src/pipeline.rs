//! Orchestration of document modules.
//!
//! A [`Pipeline`] holds the registered document modules and runs them in a
//! fixed, deterministic order into a fresh [`Document`]. The run order is
//! the document order: category first, then module name. This mirrors the
//! on-disk layout recognised by [`discover`](crate::discover), where files
//! are named `parameters_*`, `systems_*`, and so on.

use std::{cmp::Ordering, fmt};

use tracing::{debug, instrument};

use crate::Document;

/// The fixed execution order of document module categories.
///
/// Parameter modules run first so later categories can rely on their
/// values; the report (entry point) runs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Parameter definitions.
    Parameters,
    /// System decomposition and requirements.
    Systems,
    /// Simulation and computed results.
    Simulation,
    /// Supporting tooling.
    Tools,
    /// The report entry point.
    Report,
}

impl Category {
    /// All categories, in execution order.
    pub const ALL: [Self; 5] = [
        Self::Parameters,
        Self::Systems,
        Self::Simulation,
        Self::Tools,
        Self::Report,
    ];

    /// The filename prefix that assigns a source file to this category.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Systems => "systems",
            Self::Simulation => "simulation",
            Self::Tools => "tools",
            Self::Report => "report",
        }
    }

    /// Resolves a category from a file name by its prefix.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| name.starts_with(category.prefix()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Errors raised by a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A module failed; the run is aborted and the partial document
    /// discarded.
    #[error("module '{name}' failed")]
    Module {
        /// Name the module was registered under.
        name: String,
        /// The module's own error.
        #[source]
        source: anyhow::Error,
    },
}

type ModuleFn = Box<dyn Fn(&mut Document) -> anyhow::Result<()>>;

struct Module {
    category: Category,
    name: String,
    emit: ModuleFn,
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("category", &self.category)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An ordered registry of document modules.
///
/// Modules append elements to the run's [`Document`] and may fail with any
/// error; a failure aborts the whole run. Each run starts from an empty
/// document, so repeated runs (interactive previews) never accumulate
/// content.
#[derive(Debug, Default)]
pub struct Pipeline {
    modules: Vec<Module>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document module under a category and name.
    ///
    /// Registration order only matters between modules sharing a category
    /// and name; execution order is (category, name, registration order).
    pub fn register(
        &mut self,
        category: Category,
        name: impl Into<String>,
        emit: impl Fn(&mut Document) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.modules.push(Module {
            category,
            name: name.into(),
            emit: Box::new(emit),
        });
        self
    }

    /// Registers a module, builder style.
    #[must_use]
    pub fn with_module(
        mut self,
        category: Category,
        name: impl Into<String>,
        emit: impl Fn(&mut Document) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.register(category, name, emit);
        self
    }

    /// The number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The (category, name) pairs in execution order.
    #[must_use]
    pub fn execution_order(&self) -> Vec<(Category, &str)> {
        let mut order: Vec<(usize, &Module)> = self.modules.iter().enumerate().collect();
        order.sort_by(|(left_index, left), (right_index, right)| {
            compare_modules(left, right).then(left_index.cmp(right_index))
        });
        order
            .into_iter()
            .map(|(_, module)| (module.category, module.name.as_str()))
            .collect()
    }

    /// Runs every module, in order, into a fresh document.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Module`] for the first module that fails;
    /// the partially built document is discarded.
    #[instrument(skip(self), fields(modules = self.modules.len()))]
    pub fn run(&self) -> Result<Document, PipelineError> {
        let mut order: Vec<(usize, &Module)> = self.modules.iter().enumerate().collect();
        order.sort_by(|(left_index, left), (right_index, right)| {
            compare_modules(left, right).then(left_index.cmp(right_index))
        });

        let mut document = Document::new();
        for (_, module) in order {
            debug!(category = %module.category, module = %module.name, "running module");
            (module.emit)(&mut document).map_err(|source| PipelineError::Module {
                name: module.name.clone(),
                source,
            })?;
        }
        Ok(document)
    }
}

fn compare_modules(left: &Module, right: &Module) -> Ordering {
    left.category
        .cmp(&right.category)
        .then_with(|| left.name.cmp(&right.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;

    #[test]
    fn categories_run_in_fixed_order() {
        let mut pipeline = Pipeline::new();
        pipeline
            .register(Category::Report, "report", |doc| {
                doc.display("report");
                Ok(())
            })
            .register(Category::Parameters, "parameters", |doc| {
                doc.display("parameters");
                Ok(())
            })
            .register(Category::Systems, "systems", |doc| {
                doc.display("systems");
                Ok(())
            });

        let document = pipeline.run().unwrap();
        let texts: Vec<&str> = document
            .iter()
            .map(|element| match element {
                Element::RawText(text) => text.as_str(),
                _ => panic!("unexpected element"),
            })
            .collect();
        assert_eq!(texts, ["parameters", "systems", "report"]);
    }

    #[test]
    fn names_order_within_a_category() {
        let mut pipeline = Pipeline::new();
        pipeline
            .register(Category::Systems, "b", |doc| {
                doc.display("b");
                Ok(())
            })
            .register(Category::Systems, "a", |doc| {
                doc.display("a");
                Ok(())
            });

        let order = pipeline.execution_order();
        assert_eq!(order, [(Category::Systems, "a"), (Category::Systems, "b")]);
    }

    #[test]
    fn reruns_start_from_an_empty_document() {
        let pipeline = Pipeline::new().with_module(Category::Report, "report", |doc| {
            doc.display("once");
            Ok(())
        });

        let first = pipeline.run().unwrap();
        let second = pipeline.run().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn module_failure_aborts_the_run() {
        let pipeline = Pipeline::new()
            .with_module(Category::Parameters, "parameters", |doc| {
                doc.display("fine");
                Ok(())
            })
            .with_module(Category::Systems, "broken", |_| {
                anyhow::bail!("bad input")
            })
            .with_module(Category::Report, "report", |doc| {
                doc.display("unreachable");
                Ok(())
            });

        let error = pipeline.run().unwrap_err();
        let PipelineError::Module { name, source } = error;
        assert_eq!(name, "broken");
        assert_eq!(source.to_string(), "bad input");
    }

    #[test]
    fn category_resolves_from_file_name() {
        assert_eq!(
            Category::from_file_name("parameters_heatpump.rs"),
            Some(Category::Parameters)
        );
        assert_eq!(
            Category::from_file_name("report_heatpump.rs"),
            Some(Category::Report)
        );
        assert_eq!(Category::from_file_name("notes.rs"), None);
    }
}
