//! Validation checks for the tile library and map.
//!
//! Each check returns its own `ValidationResult`.

use std::collections::HashSet;

use crate::registry::TileLibrary;
use crate::types::{AnimationKind, TileMap};

use super::{Diagnostic, ValidationResult};

/// An empty library cannot produce an asset.
pub fn check_library_not_empty(library: &TileLibrary) -> ValidationResult {
    let mut result = ValidationResult::new();

    if library.is_empty() {
        result.push(
            Diagnostic::error("isopack::validate::no-tiles", "No tiles were discovered")
                .with_help("Add tile PNGs to the tile directory"),
        );
    }

    result
}

/// Frame heights must fill whole 8-pixel strips.
pub fn check_frame_heights(library: &TileLibrary) -> ValidationResult {
    let mut result = ValidationResult::new();

    for tile in library.tiles() {
        let (_, height) = tile.size();
        if height % 8 != 0 {
            result.push(
                Diagnostic::error(
                    "isopack::validate::frame-height",
                    format!("Tile '{}' is {} pixels tall", tile.name(), height),
                )
                .with_help("Tile heights must be a multiple of 8"),
            );
        }
    }

    result
}

/// All frames of all tiles must share one pixel size.
pub fn check_frame_dimensions(library: &TileLibrary) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some((width, height)) = library.frame_size() else {
        return result;
    };

    for tile in library.tiles() {
        for (index, frame) in tile.frames().iter().enumerate() {
            if frame.size() != (width, height) {
                result.push(Diagnostic::error(
                    "isopack::validate::frame-size",
                    format!(
                        "Tile '{}' frame {} is {}x{}, expected {}x{}",
                        tile.name(),
                        index,
                        frame.width(),
                        frame.height(),
                        width,
                        height
                    ),
                ));
            }
        }
    }

    result
}

/// Wave assumes 4 frames and blink assumes 2; short tiles clamp visibly.
pub fn check_animation_frame_counts(library: &TileLibrary) -> ValidationResult {
    let mut result = ValidationResult::new();

    for tile in library.tiles() {
        let expected = match tile.kind() {
            AnimationKind::Wave => 4,
            AnimationKind::Blink => 2,
            AnimationKind::None | AnimationKind::Linear => continue,
        };
        if tile.frame_count() < expected {
            result.push(
                Diagnostic::warning(
                    "isopack::validate::frame-count",
                    format!(
                        "Tile '{}' is {} but has {} frame(s)",
                        tile.name(),
                        tile.kind(),
                        tile.frame_count()
                    ),
                )
                .with_help(format!("{} tiles animate with {} frames", tile.kind(), expected)),
            );
        }
    }

    result
}

/// Frame-base indices are 8-bit in the exported records.
pub fn check_index_capacity(library: &TileLibrary) -> ValidationResult {
    let mut result = ValidationResult::new();

    let total_frames: usize = library.tiles().iter().map(|t| t.frame_count()).sum();
    if total_frames > u8::MAX as usize + 1 {
        result.push(
            Diagnostic::error(
                "isopack::validate::index-capacity",
                format!("Library holds {} frames, more than 256", total_frames),
            )
            .with_help("Map records address frames with one byte"),
        );
    }

    result
}

/// Every layer name used by the map must exist in the library.
pub fn check_map_references(library: &TileLibrary, map: &TileMap) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut reported: HashSet<&str> = HashSet::new();

    for (col, row, tile) in map.iter_cells() {
        for name in tile.layers() {
            if !library.contains(name) && reported.insert(name) {
                result.push(Diagnostic::error(
                    "isopack::validate::missing-tile",
                    format!("Map cell {},{} references unknown tile '{}'", col, row, name),
                ));
            }
        }
    }

    result
}

/// Every cell must classify into a known interaction class.
pub fn check_map_classes(map: &TileMap) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (col, row, tile) in map.iter_cells() {
        if tile.class().is_unknown() {
            result.push(
                Diagnostic::error(
                    "isopack::validate::tile-class",
                    format!("Cell {},{} ('{}') has no interaction class", col, row, tile),
                )
                .with_help(
                    "Use the ground/block/deco/wall/ramp, obj, or character name prefixes"
                        .to_string(),
                ),
            );
        }
    }

    result
}
