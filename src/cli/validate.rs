//! Validate command implementation.
//!
//! Runs the full check suite against the project's tiles and map without
//! writing any output files.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover_with, load_tiles, Manifest};
use crate::error::{PackError, Result};
use crate::output::{plural, Printer};
use crate::types::{TileMap, TileRef};
use crate::validation::{print_diagnostics, validate_assets};

/// Validate tiles and map without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project directory (contains iso.yaml, the tile directory, and the map)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Tile directory (overrides the manifest)
    #[arg(long)]
    pub tiles: Option<PathBuf>,

    /// Map text file (overrides the manifest)
    #[arg(long, short)]
    pub map: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let mut manifest = Manifest::discover(&args.root)?;
    if let Some(tiles) = &args.tiles {
        manifest.tiles = tiles.clone();
    }
    if let Some(map) = &args.map {
        manifest.map = map.clone();
    }

    let discovery = discover_with(&args.root, manifest)?;
    let library = load_tiles(&discovery.scan)?;

    let manifest = &discovery.manifest;
    let default_tile = TileRef::parse(&manifest.default_tile)?;
    let mut map = TileMap::new(manifest.map_width(), manifest.map_height(), default_tile);
    let map_path = discovery.map_path();
    if map_path.is_file() {
        let source = fs::read_to_string(&map_path).map_err(|e| PackError::Io {
            path: map_path.clone(),
            message: format!("Failed to read map: {}", e),
        })?;
        map.load_str(&source)?;
    }

    let result = validate_assets(&library, &map);
    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(PackError::Validation {
            message: format!(
                "validation failed: {}, {}",
                plural(result.error_count(), "error", "errors"),
                plural(result.warning_count(), "warning", "warnings")
            ),
            help: None,
        });
    }

    if result.warning_count() > 0 {
        printer.warning(
            "Validated",
            &format!(
                "{} with {}",
                plural(library.len(), "tile", "tiles"),
                plural(result.warning_count(), "warning", "warnings")
            ),
        );
    } else {
        printer.status("Validated", &plural(library.len(), "tile", "tiles"));
    }

    Ok(())
}
