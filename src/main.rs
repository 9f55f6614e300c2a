//! Renders the bundled heat-pump demo document.

use clap::Parser;
use pyforge::{Cli, demo};

fn main() -> anyhow::Result<()> {
    Cli::parse().run(&demo::pipeline())
}
