//! Immutable 2D pixel grid.
//!
//! Bitmaps are the decoded form of tile artwork: width and height are fixed
//! at construction and the pixel data is never mutated in place. Compositing
//! produces a new bitmap.

use crate::error::{PackError, Result};

use super::Pixel;

/// An immutable width x height grid of pixels (row-major: pixels[y][x]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Vec<Pixel>>,
}

impl Bitmap {
    /// Create a bitmap from row-major pixel rows.
    ///
    /// Fails if the rows are empty or ragged.
    pub fn new(pixels: Vec<Vec<Pixel>>) -> Result<Self> {
        let height = pixels.len();
        let width = pixels.first().map_or(0, |row| row.len());

        if width == 0 || height == 0 {
            return Err(PackError::Precondition {
                message: "bitmap must have at least one pixel".to_string(),
                help: None,
            });
        }

        if let Some(row) = pixels.iter().find(|row| row.len() != width) {
            return Err(PackError::Precondition {
                message: format!(
                    "ragged bitmap: expected row width {}, found {}",
                    width,
                    row.len()
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a bitmap filled with a single pixel value.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self> {
        Self::new(vec![vec![pixel; width]; height])
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the pixel at (x, y), if in bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Get the pixel at (x, y). Callers must stay in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y][x]
    }

    /// Borrow the raw pixel rows.
    pub fn pixels(&self) -> &[Vec<Pixel>] {
        &self.pixels
    }

    /// Composite `overlay` onto a copy of this bitmap at origin (0,0).
    ///
    /// Overlay pixels with zero alpha leave the base pixel in place; all
    /// others replace it. Layers draw in call order, later over earlier.
    pub fn over(&self, overlay: &Bitmap) -> Bitmap {
        let mut pixels = self.pixels.clone();
        for (y, row) in overlay.pixels.iter().enumerate() {
            if y >= self.height {
                break;
            }
            for (x, &pixel) in row.iter().enumerate() {
                if x >= self.width {
                    break;
                }
                if pixel.a > 0 {
                    pixels[y][x] = pixel;
                }
            }
        }
        Bitmap {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
