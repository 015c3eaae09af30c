pub mod completions;
pub mod export;
pub mod list;
pub mod validate;

use clap::{Parser, Subcommand};

/// isopack - Isometric tile set and map packer
#[derive(Parser, Debug)]
#[command(name = "isopack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the packed binary asset and symbol listing
    Export(export::ExportArgs),

    /// Validate tiles and map without writing output
    Validate(validate::ValidateArgs),

    /// List discovered tiles
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
