//! Tile library: the name -> tile registry.
//!
//! The library is built once by the discovery loader and read everywhere
//! else; the editor may append newly defined tiles but nothing is ever
//! replaced or removed. Insertion order is preserved because the export
//! codec derives frame-base indices from it.

use std::collections::HashMap;

use crate::error::{PackError, Result};
use crate::types::{AnimatedTile, Bitmap, TileRef};

/// Insertion-ordered registry of animated tiles.
#[derive(Debug, Default)]
pub struct TileLibrary {
    tiles: Vec<AnimatedTile>,
    index: HashMap<String, usize>,
}

impl TileLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tile. Names must be unique.
    pub fn insert(&mut self, tile: AnimatedTile) -> Result<()> {
        if self.index.contains_key(tile.name()) {
            return Err(PackError::Validation {
                message: format!("duplicate tile '{}'", tile.name()),
                help: None,
            });
        }
        self.index.insert(tile.name().to_string(), self.tiles.len());
        self.tiles.push(tile);
        Ok(())
    }

    /// Get a tile by name.
    pub fn get(&self, name: &str) -> Option<&AnimatedTile> {
        self.index.get(name).map(|&i| &self.tiles[i])
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in insertion order.
    pub fn tiles(&self) -> &[AnimatedTile] {
        &self.tiles
    }

    /// Tile names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiles.iter().map(|t| t.name())
    }

    /// Pixel dimensions of the first tile's first frame, if any.
    pub fn frame_size(&self) -> Option<(usize, usize)> {
        self.tiles.first().map(|t| t.size())
    }

    /// Resolve a composite reference to a composited bitmap.
    ///
    /// The background layer's selected frame is the base; the foreground
    /// layer's selected frame, if present, draws over it at (0,0). Frame
    /// selection uses each layer's own animation kind with the shared
    /// counter and column.
    pub fn resolve(&self, tile_ref: &TileRef, counter: u16, column: usize) -> Result<Bitmap> {
        let mut composited: Option<Bitmap> = None;

        for name in tile_ref.layers() {
            let tile = self.get(name).ok_or_else(|| PackError::UnknownTile {
                name: name.to_string(),
                help: None,
            })?;
            let frame = tile.animated_frame(counter, column);
            composited = Some(match composited {
                None => frame.clone(),
                Some(base) => base.over(frame),
            });
        }

        // layers() always yields the background
        composited.ok_or_else(|| PackError::UnknownTile {
            name: tile_ref.to_string(),
            help: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnimationKind, Pixel};

    fn solid_tile(name: &str, pixel: Pixel) -> AnimatedTile {
        AnimatedTile::still(name, Bitmap::filled(2, 2, pixel).unwrap())
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut library = TileLibrary::new();
        library.insert(solid_tile("wallBrick0", Pixel::WHITE)).unwrap();
        library.insert(solid_tile("groundGrass0", Pixel::BLACK)).unwrap();

        let names: Vec<_> = library.names().collect();
        assert_eq!(names, vec!["wallBrick0", "groundGrass0"]);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut library = TileLibrary::new();
        library.insert(solid_tile("wallBrick0", Pixel::WHITE)).unwrap();
        assert!(library.insert(solid_tile("wallBrick0", Pixel::BLACK)).is_err());
    }

    #[test]
    fn test_resolve_single_layer() {
        let mut library = TileLibrary::new();
        library.insert(solid_tile("groundGrass0", Pixel::BLACK)).unwrap();

        let bitmap = library
            .resolve(&TileRef::single("groundGrass0"), 0, 0)
            .unwrap();
        assert_eq!(bitmap.get(0, 0), Some(Pixel::BLACK));
    }

    #[test]
    fn test_resolve_composites_foreground_over_background() {
        let mut library = TileLibrary::new();
        library.insert(solid_tile("groundGrass0", Pixel::BLACK)).unwrap();

        let sparse = Bitmap::new(vec![
            vec![Pixel::WHITE, Pixel::TRANSPARENT],
            vec![Pixel::TRANSPARENT, Pixel::TRANSPARENT],
        ])
        .unwrap();
        library
            .insert(AnimatedTile::still("objRock", sparse))
            .unwrap();

        let bitmap = library
            .resolve(&TileRef::layered("groundGrass0", "objRock"), 0, 0)
            .unwrap();
        assert_eq!(bitmap.get(0, 0), Some(Pixel::WHITE));
        assert_eq!(bitmap.get(1, 1), Some(Pixel::BLACK));
    }

    #[test]
    fn test_resolve_unknown_tile() {
        let library = TileLibrary::new();
        let err = library
            .resolve(&TileRef::single("groundGrass0"), 0, 0)
            .unwrap_err();
        assert!(matches!(err, PackError::UnknownTile { .. }));
    }

    #[test]
    fn test_resolve_uses_layer_animation() {
        let mut library = TileLibrary::new();
        let dark = Bitmap::filled(1, 1, Pixel::BLACK).unwrap();
        let lit = Bitmap::filled(1, 1, Pixel::WHITE).unwrap();
        library
            .insert(AnimatedTile::new("groundLava", AnimationKind::Blink, vec![dark, lit]).unwrap())
            .unwrap();

        let flash = library.resolve(&TileRef::single("groundLava"), 0, 0).unwrap();
        let rest = library.resolve(&TileRef::single("groundLava"), 8, 0).unwrap();
        assert_eq!(flash.get(0, 0), Some(Pixel::WHITE));
        assert_eq!(rest.get(0, 0), Some(Pixel::BLACK));
    }
}
