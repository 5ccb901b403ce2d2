use anyhow::Result;
use clap::Parser;
use textsweep::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
