//! Tile map storage, painting, and hit-testing.
//!
//! The map is a fixed-size grid of composite tile references, stored
//! row-major. A scrollable viewport selects the subgrid that is eligible for
//! hit-testing; scrolling moves indices only, nothing in memory shifts.
//! Painting goes through the isometric nearest-cell lookup, so callers hand
//! over raw screen positions.

use crate::error::{PackError, Result};
use crate::grid::IsoGrid;
use crate::parser::{format_map, parse_map};

use super::TileRef;

/// The scrollable window onto the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub pos_x: usize,
    pub pos_y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Create a viewport at the grid origin.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pos_x: 0,
            pos_y: 0,
            width,
            height,
        }
    }

    /// Move the viewport, clamped to the given grid bounds.
    pub fn scroll(&mut self, dx: isize, dy: isize, grid_w: usize, grid_h: usize) {
        let max_x = grid_w.saturating_sub(self.width);
        let max_y = grid_h.saturating_sub(self.height);
        self.pos_x = clamp_offset(self.pos_x, dx, max_x);
        self.pos_y = clamp_offset(self.pos_y, dy, max_y);
    }
}

fn clamp_offset(pos: usize, delta: isize, max: usize) -> usize {
    let moved = pos as isize + delta;
    moved.clamp(0, max as isize) as usize
}

/// A transient paint preview. Never part of the stored grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Viewport-local cell column.
    pub col: usize,
    /// Viewport-local cell row.
    pub row: usize,
    /// The reference that would be painted.
    pub tile: TileRef,
}

/// A fixed-size 2D grid of composite tile references.
#[derive(Debug, Clone)]
pub struct TileMap {
    size_w: usize,
    size_h: usize,
    cells: Vec<TileRef>,
    viewport: Viewport,
    grid: IsoGrid,
    screen_offset: (i32, i32),
    scale: i32,
    preview: Option<Preview>,
}

impl TileMap {
    /// Create a map with every cell set to the sentinel ground tile.
    pub fn new(size_w: usize, size_h: usize, default_tile: TileRef) -> Self {
        Self {
            size_w,
            size_h,
            cells: vec![default_tile; size_w * size_h],
            viewport: Viewport::new(size_w, size_h),
            grid: IsoGrid::default(),
            screen_offset: (0, 0),
            scale: 1,
            preview: None,
        }
    }

    /// Restrict hit-testing to a smaller viewport (clamped to the grid).
    pub fn with_viewport(mut self, width: usize, height: usize) -> Self {
        self.viewport = Viewport::new(width.min(self.size_w), height.min(self.size_h));
        self
    }

    /// Set the viewport's on-screen placement for hit-testing.
    pub fn with_placement(mut self, offset: (i32, i32), scale: i32) -> Self {
        self.screen_offset = offset;
        self.scale = scale.max(1);
        self
    }

    /// Use a non-default isometric projection.
    pub fn with_grid(mut self, grid: IsoGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.size_w
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.size_h
    }

    /// The current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The projection used for hit-testing.
    pub fn grid(&self) -> &IsoGrid {
        &self.grid
    }

    /// Get the cell at global (col, row).
    pub fn get(&self, col: usize, row: usize) -> Option<&TileRef> {
        if col >= self.size_w || row >= self.size_h {
            return None;
        }
        Some(&self.cells[row * self.size_w + col])
    }

    /// Iterate all cells row-major with their global coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &TileRef)> {
        let size_w = self.size_w;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i % size_w, i / size_w, tile))
    }

    /// Nearest visible cell to a screen position, viewport-local coordinates.
    pub fn hit_test(&self, point: (i32, i32)) -> (usize, usize) {
        self.grid.nearest_cell(
            point,
            self.screen_offset,
            self.scale,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Nearest visible cell to a screen position, with its global
    /// coordinates and current occupant.
    pub fn cell_at_point(&self, point: (i32, i32)) -> (usize, usize, &TileRef) {
        let (col, row) = self.hit_test(point);
        let (gc, gr) = (self.viewport.pos_x + col, self.viewport.pos_y + row);
        (gc, gr, &self.cells[gr * self.size_w + gc])
    }

    /// Paint the cell nearest to a screen position.
    ///
    /// With `append`, `name` becomes the cell's foreground layer over
    /// whatever background occupies it; otherwise the cell is overwritten.
    /// Returns the global coordinates painted. The painted reference also
    /// becomes the preview, matching the editor's visual feedback.
    pub fn paint(&mut self, point: (i32, i32), name: &str, append: bool) -> Result<(usize, usize)> {
        let (col, row) = self.hit_test(point);
        let (gc, gr) = (self.viewport.pos_x + col, self.viewport.pos_y + row);
        let tile = self.painted_ref(gc, gr, name, append)?;
        self.preview = Some(Preview {
            col,
            row,
            tile: tile.clone(),
        });
        self.cells[gr * self.size_w + gc] = tile;
        Ok((gc, gr))
    }

    /// Paint a cell addressed directly by global coordinates.
    pub fn paint_cell(&mut self, col: usize, row: usize, name: &str, append: bool) -> Result<()> {
        if col >= self.size_w || row >= self.size_h {
            return Err(PackError::Precondition {
                message: format!(
                    "cell {},{} outside {}x{} map",
                    col, row, self.size_w, self.size_h
                ),
                help: None,
            });
        }
        let tile = self.painted_ref(col, row, name, append)?;
        self.cells[row * self.size_w + col] = tile;
        Ok(())
    }

    fn painted_ref(&self, col: usize, row: usize, name: &str, append: bool) -> Result<TileRef> {
        if append {
            if name.is_empty() || name.contains(',') {
                return Err(PackError::Parse {
                    message: format!("'{}' is not a single layer name", name),
                    help: Some("Append paints one foreground tile".to_string()),
                });
            }
            Ok(self.cells[row * self.size_w + col].with_overlay(name))
        } else {
            TileRef::parse(name)
        }
    }

    /// Show a transient preview at the cell nearest to a screen position.
    pub fn preview(&mut self, point: (i32, i32), tile: TileRef) {
        let (col, row) = self.hit_test(point);
        self.preview = Some(Preview { col, row, tile });
    }

    /// Drop the transient preview.
    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    /// The current preview, if any.
    pub fn preview_state(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Scroll the viewport, clamped to the grid.
    pub fn scroll(&mut self, dx: isize, dy: isize) {
        self.viewport.scroll(dx, dy, self.size_w, self.size_h);
    }

    /// Serialize the grid to the interned text form.
    pub fn save(&self) -> String {
        format_map(self)
    }

    /// Replace the grid from the interned text form.
    ///
    /// The text is parsed against the configured map size; on any failure
    /// the current grid is left untouched.
    pub fn load_str(&mut self, source: &str) -> Result<()> {
        let cells = parse_map(source, self.size_w, self.size_h)?;
        self.cells = cells;
        self.preview = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> TileRef {
        TileRef::single("groundGrass0")
    }

    fn small_map() -> TileMap {
        TileMap::new(4, 4, ground())
    }

    #[test]
    fn test_new_fills_with_default() {
        let map = small_map();
        for (_, _, tile) in map.iter_cells() {
            assert_eq!(tile, &ground());
        }
    }

    #[test]
    fn test_iter_cells_row_major() {
        let mut map = small_map();
        map.paint_cell(1, 0, "wallBrick0", false).unwrap();
        let cells: Vec<_> = map.iter_cells().collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[1].0, 1);
        assert_eq!(cells[1].1, 0);
        assert_eq!(cells[1].2.to_string(), "wallBrick0");
        assert_eq!(cells[4].0, 0);
        assert_eq!(cells[4].1, 1);
    }

    #[test]
    fn test_paint_cell_overwrite_and_append() {
        let mut map = small_map();
        map.paint_cell(2, 1, "wallBrick0", false).unwrap();
        assert_eq!(map.get(2, 1).unwrap().to_string(), "wallBrick0");

        map.paint_cell(2, 1, "groundGrass0", false).unwrap();
        map.paint_cell(2, 1, "objRock", true).unwrap();
        assert_eq!(map.get(2, 1).unwrap().to_string(), "groundGrass0,objRock");

        // Appending again replaces the foreground, never grows a third layer
        map.paint_cell(2, 1, "characterHero", true).unwrap();
        assert_eq!(
            map.get(2, 1).unwrap().to_string(),
            "groundGrass0,characterHero"
        );
    }

    #[test]
    fn test_paint_cell_out_of_bounds() {
        let mut map = small_map();
        assert!(map.paint_cell(4, 0, "wallBrick0", false).is_err());
    }

    #[test]
    fn test_paint_hits_nearest_cell() {
        let mut map = small_map().with_placement((5, 140), 2);
        let (cx, cy) = map.grid().center(1, 2);
        let point = (5 + 2 * cx, 140 + 2 * cy);

        let painted = map.paint(point, "wallBrick0", false).unwrap();
        assert_eq!(painted, (1, 2));
        assert_eq!(map.get(1, 2).unwrap().to_string(), "wallBrick0");
    }

    #[test]
    fn test_paint_respects_viewport_offset() {
        let mut map = TileMap::new(8, 8, ground()).with_viewport(4, 4);
        map.scroll(2, 3);

        let (cx, cy) = map.grid().center(0, 0);
        map.paint((cx, cy), "wallBrick0", false).unwrap();
        assert_eq!(map.get(2, 3).unwrap().to_string(), "wallBrick0");
        assert_eq!(map.get(0, 0).unwrap().to_string(), "groundGrass0");
    }

    #[test]
    fn test_preview_never_mutates_cells() {
        let mut map = small_map();
        map.preview((0, 0), TileRef::single("wallBrick0"));

        assert!(map.preview_state().is_some());
        for (_, _, tile) in map.iter_cells() {
            assert_eq!(tile, &ground());
        }

        map.clear_preview();
        assert!(map.preview_state().is_none());
    }

    #[test]
    fn test_scroll_clamps() {
        let mut map = TileMap::new(8, 6, ground()).with_viewport(4, 4);
        map.scroll(-10, -10);
        assert_eq!((map.viewport().pos_x, map.viewport().pos_y), (0, 0));

        map.scroll(100, 100);
        assert_eq!((map.viewport().pos_x, map.viewport().pos_y), (4, 2));
    }

    #[test]
    fn test_cell_at_point_reports_occupant() {
        let mut map = small_map();
        map.paint_cell(0, 0, "wallBrick0", false).unwrap();
        let (col, row, tile) = map.cell_at_point((0, 0));
        assert_eq!((col, row), (0, 0));
        assert_eq!(tile.to_string(), "wallBrick0");
    }
}
