//! Tile loader - decodes scanned frame files into a library.

use std::path::Path;

use crate::error::{PackError, Result};
use crate::registry::TileLibrary;
use crate::types::{AnimatedTile, Bitmap, Pixel};

use super::scanner::TileScan;

/// Decode every scanned tile group and build the library.
///
/// Groups load in scan order (sorted by name), which fixes the export
/// frame-base indices.
pub fn load_tiles(scan: &TileScan) -> Result<TileLibrary> {
    let mut library = TileLibrary::new();

    for group in &scan.groups {
        let mut frames = Vec::with_capacity(group.frames.len());
        for path in &group.frames {
            frames.push(load_bitmap(path)?);
        }
        library.insert(AnimatedTile::new(&group.name, group.kind, frames)?)?;
    }

    Ok(library)
}

/// Decode a single PNG into a bitmap.
pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    let image = image::open(path)
        .map_err(|e| PackError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?
        .to_rgba8();

    let (width, height) = image.dimensions();
    let mut rows = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut row = Vec::with_capacity(width as usize);
        for x in 0..width {
            row.push(Pixel::from(image.get_pixel(x, y).0));
        }
        rows.push(row);
    }

    Bitmap::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::scanner::scan_tiles;

    fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
        let mut image = image::RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = image::Rgba(rgba);
        }
        image.save(path).unwrap();
    }

    #[test]
    fn test_load_bitmap_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        write_png(&path, 4, 8, [255, 0, 0, 255]);

        let bitmap = load_bitmap(&path).unwrap();
        assert_eq!(bitmap.size(), (4, 8));
        assert_eq!(bitmap.get(3, 7), Some(Pixel::rgb(255, 0, 0)));
    }

    #[test]
    fn test_load_bitmap_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(matches!(
            load_bitmap(&path),
            Err(PackError::Io { .. })
        ));
    }

    #[test]
    fn test_load_tiles_builds_library() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("groundGrass0.png"), 4, 8, [0, 255, 0, 255]);
        write_png(&dir.path().join("groundWater_w0.png"), 4, 8, [0, 0, 255, 255]);
        write_png(&dir.path().join("groundWater_w1.png"), 4, 8, [0, 0, 200, 255]);

        let scan = scan_tiles(dir.path()).unwrap();
        let library = load_tiles(&scan).unwrap();

        assert_eq!(library.len(), 2);
        let water = library.get("groundWater").unwrap();
        assert_eq!(water.frame_count(), 2);
        assert_eq!(library.frame_size(), Some((4, 8)));
    }
}
