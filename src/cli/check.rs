use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;
use crate::{Pipeline, render::markdown};

/// Run the pipeline and report authoring problems without writing output.
#[derive(Debug, Default, Parser)]
#[command(about = "Check the document for unresolved references and citations")]
pub struct Check {
    /// Suppress all output except problems
    #[arg(long, short)]
    quiet: bool,
}

impl Check {
    /// Runs the check.
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline itself fails. Authoring problems
    /// are not errors; they are printed and reflected in the exit code.
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, pipeline: &Pipeline) -> anyhow::Result<()> {
        let document = pipeline.run()?;
        let rendered = markdown::render(document.snapshot());

        if rendered.warnings.is_empty() {
            if !self.quiet {
                println!(
                    "{} {} elements, no problems",
                    "ok:".success(),
                    document.len()
                );
            }
            return Ok(());
        }

        for warning in &rendered.warnings {
            eprintln!("{} {warning}", "warning:".warning());
        }
        if !self.quiet {
            eprintln!(
                "{}",
                format!("{} problem(s) found", rendered.warnings.len()).dim()
            );
        }
        std::process::exit(2)
    }
}
