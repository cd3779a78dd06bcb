//! CLI entry point for the jigsaw tile solver

use clap::Parser;
use jigtile::io::cli::Cli;
use jigtile::io::logging;

fn main() -> jigtile::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    cli.run()
}
