//! List command implementation.
//!
//! Prints an inventory of discovered tiles: name, animation kind, frame
//! count, and pixel size.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover_with, load_tiles, Manifest};
use crate::error::Result;
use crate::output::{plural, Printer};

/// List discovered tiles
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project directory (contains iso.yaml and the tile directory)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Tile directory (overrides the manifest)
    #[arg(long)]
    pub tiles: Option<PathBuf>,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let mut manifest = Manifest::discover(&args.root)?;
    if let Some(tiles) = &args.tiles {
        manifest.tiles = tiles.clone();
    }

    let discovery = discover_with(&args.root, manifest)?;
    let library = load_tiles(&discovery.scan)?;

    for tile in library.tiles() {
        let (width, height) = tile.size();
        println!(
            "{:<30} {:<8} {:>2} frame(s)  {}x{}",
            tile.name(),
            tile.kind().to_string(),
            tile.frame_count(),
            width,
            height
        );
    }

    printer.info(
        "Found",
        &format!(
            "{} ({})",
            plural(library.len(), "tile", "tiles"),
            plural(discovery.scan.frame_count(), "frame", "frames")
        ),
    );

    Ok(())
}
