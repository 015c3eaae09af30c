use clap::Parser;
use miette::Result;

use isopack::cli::{Cli, Commands};
use isopack::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Export(args) => isopack::cli::export::run(args, &printer)?,
        Commands::Validate(args) => isopack::cli::validate::run(args, &printer)?,
        Commands::List(args) => isopack::cli::list::run(args, &printer)?,
        Commands::Completions(args) => isopack::cli::completions::run(args)?,
    }

    Ok(())
}
