//! CLI entry point for the greedy room layout solver

use clap::Parser;
use roomlayout::io::cli::{Cli, LayoutRunner};

fn main() -> roomlayout::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut runner = LayoutRunner::new(cli);
    runner.run().map(|_| ())
}
