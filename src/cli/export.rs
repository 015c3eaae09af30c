//! Export command implementation.
//!
//! Loads the project's tiles and map, validates them, encodes the binary
//! asset, and writes the `.bin`/`.h` pair (plus an optional JSON symbol
//! table).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover_with, load_tiles, DiscoveryResult, Manifest};
use crate::error::{PackError, Result};
use crate::export::encode;
use crate::output::{plural, Printer};
use crate::types::{TileMap, TileRef};
use crate::validation::{print_diagnostics, validate_assets};

/// Export the packed binary asset and symbol listing
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project directory (contains iso.yaml, the tile directory, and the map)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Tile directory (overrides the manifest)
    #[arg(long)]
    pub tiles: Option<PathBuf>,

    /// Map text file (overrides the manifest)
    #[arg(long, short)]
    pub map: Option<PathBuf>,

    /// Output basename for the .bin/.h pair (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<String>,

    /// Also write a JSON symbol table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<()> {
    let mut manifest = Manifest::discover(&args.root)?;
    if let Some(tiles) = &args.tiles {
        manifest.tiles = tiles.clone();
    }
    if let Some(map) = &args.map {
        manifest.map = map.clone();
    }
    if let Some(output) = &args.output {
        manifest.output = output.clone();
    }

    let discovery = discover_with(&args.root, manifest)?;
    let library = load_tiles(&discovery.scan)?;
    printer.status(
        "Loaded",
        &format!(
            "{} ({})",
            plural(library.len(), "tile", "tiles"),
            plural(discovery.scan.frame_count(), "frame", "frames")
        ),
    );

    let map = load_map(&discovery, printer)?;

    let validation = validate_assets(&library, &map);
    print_diagnostics(&validation, printer);
    if validation.has_errors() {
        return Err(PackError::Validation {
            message: format!(
                "{} found, not exporting",
                plural(validation.error_count(), "error", "errors")
            ),
            help: None,
        });
    }

    let asset = encode(&library, &map)?;

    let bin_path = discovery.root.join(format!("{}.bin", discovery.manifest.output));
    write_file(&bin_path, &asset.bytes)?;
    printer.status(
        "Exporting",
        &format!("{} ({} bytes)", bin_path.display(), asset.bytes.len()),
    );

    let header = asset.symbols.render();
    let header_path = discovery.root.join(format!("{}.h", discovery.manifest.output));
    write_file(&header_path, header.as_bytes())?;
    printer.status(
        "Exporting",
        &format!("{} ({} bytes)", header_path.display(), header.len()),
    );

    if args.json {
        let json = asset.symbols.to_json()?;
        let json_path = discovery.root.join(format!("{}.json", discovery.manifest.output));
        write_file(&json_path, json.as_bytes())?;
        printer.status("Exporting", &json_path.display().to_string());
    }

    Ok(())
}

/// Build the map at its configured size and load the map file if present.
///
/// A missing map file is not an error: the export then carries the
/// default-filled grid, matching an authoring session that never saved.
fn load_map(discovery: &DiscoveryResult, printer: &Printer) -> Result<TileMap> {
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
        printer.status("Loaded", &map_path.display().to_string());
    } else {
        printer.info(
            "Defaulting",
            &format!("no {} found, exporting an unpainted map", map_path.display()),
        );
    }

    Ok(map)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| PackError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write: {}", e),
    })
}
