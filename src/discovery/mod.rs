//! Project discovery: manifest, tile scanning, and loading.
//!
//! # Example
//!
//! ```ignore
//! use isopack::discovery::discover;
//!
//! let discovery = discover(".")?;
//! let library = discovery.into_library()?;
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::TileLibrary;

pub use loader::{load_bitmap, load_tiles};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use scanner::{scan_tiles, split_frame_suffix, TileGroup, TileScan};

/// Result of discovering a project directory.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (defaults if no iso.yaml was found).
    pub manifest: Manifest,

    /// Scan results for the manifest's tile directory.
    pub scan: TileScan,
}

impl DiscoveryResult {
    /// Decode the scanned tiles into a library.
    pub fn into_library(self) -> Result<TileLibrary> {
        load_tiles(&self.scan)
    }

    /// Absolute path of the manifest's map file.
    pub fn map_path(&self) -> PathBuf {
        self.root.join(&self.manifest.map)
    }
}

/// Discover a project: load its manifest and scan its tile directory.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref();
    let manifest = Manifest::discover(root)?;
    discover_with(root, manifest)
}

/// Discover a project with an already-resolved manifest (e.g. after CLI
/// flag overrides).
pub fn discover_with(root: impl AsRef<Path>, manifest: Manifest) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let scan = scan_tiles(&root.join(&manifest.tiles))?;

    Ok(DiscoveryResult {
        root,
        manifest,
        scan,
    })
}
