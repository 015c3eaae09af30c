//! Export codec - packs a tile library and map into the binary asset.
//!
//! The asset is one contiguous stream: a 3-byte header (tile width, tile
//! height, map record size), every tile's frames packed 1-bit with masks,
//! then one 3-byte record per map cell. A symbol table mirrors every offset
//! and index assignment for the firmware build.
//!
//! Encoding owns no state: the same library and map always produce the same
//! bytes, so asset diffs track content diffs.

mod bitmap;
mod map;
mod symbols;

pub use bitmap::{pack_frame, packed_len, pixel_bits, ALPHA_THRESHOLD, LUMINANCE_THRESHOLD};
pub use map::{encode_map, ClassIndexer, MapPass, MAP_RECORD_SIZE};
pub use symbols::{ClassSymbol, SymbolTable, TileSymbol};

use std::collections::HashMap;

use crate::error::{PackError, Result};
use crate::registry::TileLibrary;
use crate::types::TileMap;

/// A fully encoded asset: the byte stream and its symbol table.
#[derive(Debug)]
pub struct ExportedAsset {
    pub bytes: Vec<u8>,
    pub symbols: SymbolTable,
}

/// Encode `(library, map)` into an asset.
///
/// Tiles pack in library insertion order; the first tile's frame size is
/// the asset's tile size and every frame must match it. Frame-base and
/// class indices are 8-bit; exceeding them is an error, not a truncation.
pub fn encode(library: &TileLibrary, map: &TileMap) -> Result<ExportedAsset> {
    let (tile_width, tile_height) = library.frame_size().ok_or(PackError::Precondition {
        message: "cannot export an empty tile library".to_string(),
        help: None,
    })?;

    if tile_width > u8::MAX as usize || tile_height > u8::MAX as usize {
        return Err(PackError::Precondition {
            message: format!("tile size {}x{} exceeds 8-bit header fields", tile_width, tile_height),
            help: None,
        });
    }

    let mut bytes = vec![tile_width as u8, tile_height as u8, MAP_RECORD_SIZE as u8];

    let mut frame_bases: HashMap<String, u8> = HashMap::new();
    let mut tile_symbols: Vec<TileSymbol> = Vec::with_capacity(library.len());
    let mut frame_base = 0usize;

    for tile in library.tiles() {
        if frame_base > u8::MAX as usize {
            return Err(PackError::Precondition {
                message: format!(
                    "tile '{}' starts at frame {}, past the 8-bit index range",
                    tile.name(),
                    frame_base
                ),
                help: None,
            });
        }

        tile_symbols.push(TileSymbol {
            name: tile.name().to_string(),
            frame_base: frame_base as u8,
            offset: bytes.len(),
            frame_count: tile.frame_count(),
        });
        frame_bases.insert(tile.name().to_string(), frame_base as u8);

        for frame in tile.frames() {
            if frame.size() != (tile_width, tile_height) {
                return Err(PackError::Precondition {
                    message: format!(
                        "tile '{}' frame is {}x{}, asset is {}x{}",
                        tile.name(),
                        frame.width(),
                        frame.height(),
                        tile_width,
                        tile_height
                    ),
                    help: None,
                });
            }
            bytes.extend(pack_frame(frame)?);
        }

        frame_base += tile.frame_count();
    }

    let map_start = bytes.len();
    let map_pass = encode_map(map, &frame_bases)?;
    bytes.extend(map_pass.bytes);

    let total_bytes = bytes.len();
    Ok(ExportedAsset {
        bytes,
        symbols: SymbolTable {
            tile_width,
            tile_height,
            record_size: MAP_RECORD_SIZE,
            map_width: map.width(),
            map_height: map.height(),
            tile_start: 0,
            map_start,
            tiles: tile_symbols,
            classes: map_pass.assignments,
            total_bytes,
        },
    })
}
