//! isopack - Isometric tile set and map packer
//!
//! A library and CLI for authoring isometric tile maps and exporting them
//! as packed 1-bit colour+mask assets for memory-constrained embedded
//! displays.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod export;
pub mod grid;
pub mod output;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use discovery::{
    discover, discover_with, load_bitmap, load_tiles, scan_tiles, DiscoveryResult, Manifest,
    TileScan,
};
pub use error::{PackError, Result};
pub use export::{encode, pack_frame, ClassIndexer, ExportedAsset, SymbolTable, MAP_RECORD_SIZE};
pub use grid::IsoGrid;
pub use parser::{format_map, parse_map};
pub use registry::TileLibrary;
pub use types::{
    AnimatedTile, AnimationKind, Bitmap, InteractionClass, Pixel, Preview, TileMap, TileRef,
    Viewport,
};
pub use validation::{validate_assets, Diagnostic, Severity, ValidationResult};
