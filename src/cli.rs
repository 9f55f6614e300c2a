//! The command line surface for document pipelines.
//!
//! The CLI is part of the library so that every document binary, the
//! bundled demo included, exposes the same commands: build the pipeline,
//! then hand it to [`Cli::run`].
//!
//! ```no_run
//! use clap::Parser;
//! use pyforge::{Category, Cli, Pipeline};
//!
//! let pipeline = Pipeline::new().with_module(Category::Report, "report", |doc| {
//!     doc.display("# My report");
//!     Ok(())
//! });
//! Cli::parse().run(&pipeline).unwrap();
//! ```

use std::path::PathBuf;

mod check;
/// Terminal color helpers.
pub mod terminal;

use clap::ArgAction;
use tracing::{info, instrument};

use self::terminal::Colorize;
use crate::{Pipeline, config::ProjectConfig, render::markdown, render::view::ViewServer};

/// Command line interface over a document [`Pipeline`].
#[derive(Debug, clap::Parser)]
#[command(name = "pyforge", version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the project root directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Executes the selected command against the given pipeline.
    ///
    /// # Errors
    ///
    /// Returns the original pipeline error when a document module fails,
    /// or an I/O error from writing output.
    pub fn run(self, pipeline: &Pipeline) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = ProjectConfig::load_or_default(&self.root);
        self.command.run(pipeline, &self.root, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// The available subcommands.
#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Render the document to markdown
    Markdown(Markdown),

    /// Serve the document as an auto-refreshing page in the browser
    View(View),

    /// Check the document for unresolved references and citations
    Check(check::Check),
}

impl Command {
    fn run(
        self,
        pipeline: &Pipeline,
        root: &std::path::Path,
        config: &ProjectConfig,
    ) -> anyhow::Result<()> {
        match self {
            Self::Markdown(command) => command.run(pipeline, config)?,
            Self::View(command) => command.run(pipeline, root, config)?,
            Self::Check(command) => command.run(pipeline)?,
        }
        Ok(())
    }
}

/// Render the pipeline's document to a markdown file.
#[derive(Debug, clap::Parser)]
pub struct Markdown {
    /// Path to write the markdown output (defaults to the project config)
    output: Option<PathBuf>,
}

impl Markdown {
    #[instrument(level = "debug", skip(pipeline, config))]
    fn run(self, pipeline: &Pipeline, config: &ProjectConfig) -> anyhow::Result<()> {
        let output = self.output.unwrap_or_else(|| config.output.clone());

        let document = pipeline.run()?;
        let rendered = markdown::render(document.snapshot());
        for warning in &rendered.warnings {
            eprintln!("{} {warning}", "warning:".warning());
        }

        rendered.write_to(&output)?;
        info!("wrote {}", output.display());
        Ok(())
    }
}

/// Serve the interactive document view.
#[derive(Debug, clap::Parser)]
pub struct View {
    /// Port to listen on (defaults to the project config)
    #[arg(long)]
    port: Option<u16>,
}

impl View {
    #[instrument(level = "debug", skip(pipeline, config))]
    fn run(
        self,
        pipeline: &Pipeline,
        root: &std::path::Path,
        config: &ProjectConfig,
    ) -> anyhow::Result<()> {
        let port = self.port.unwrap_or(config.port);
        ViewServer::new(pipeline, port).watch(root).serve()?;
        Ok(())
    }
}
