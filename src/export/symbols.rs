//! Symbol table for exported assets.
//!
//! The firmware build consumes the binary stream by offset and index; the
//! symbol table is the human-readable contract describing both. It renders
//! to a C header fragment (the historical `.h` sidecar) and, for other
//! tooling, to JSON. Every value here must match the byte stream exactly.

use serde::Serialize;

/// One tile's placement within the bitmap stream.
#[derive(Debug, Clone, Serialize)]
pub struct TileSymbol {
    /// Tile name.
    pub name: String,
    /// Global index of the tile's first frame.
    pub frame_base: u8,
    /// Byte offset of the tile's first frame in the stream.
    pub offset: usize,
    /// Number of frames.
    pub frame_count: usize,
}

/// One interaction-class index allocation.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSymbol {
    /// Class display name (`free`, `blocked`, `common_<obj>`, `unique`).
    pub class: String,
    /// Assigned index.
    pub index: u8,
    /// Composite name of the cell that triggered the allocation.
    pub source: String,
}

/// Every index and offset assignment made during one export.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolTable {
    pub tile_width: usize,
    pub tile_height: usize,
    pub record_size: usize,
    pub map_width: usize,
    pub map_height: usize,
    pub tile_start: usize,
    pub map_start: usize,
    pub tiles: Vec<TileSymbol>,
    pub classes: Vec<ClassSymbol>,
    pub total_bytes: usize,
}

impl SymbolTable {
    /// Render the C header fragment.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("#define {:<25} 0x{:06x}", "TILE_START", self.tile_start));
        for tile in &self.tiles {
            lines.push(format!(
                "#define {:<30} 0x{:02x} // 0x{:06x} frames {:2}",
                format!("TILE_{}", tile.name),
                tile.frame_base,
                tile.offset,
                tile.frame_count
            ));
        }

        lines.push(format!("#define {:<25} 0x{:06x}", "MAP_START", self.map_start));
        lines.push(format!("#define MAP_WIDTH     {}", self.map_width));
        lines.push(format!("#define MAP_HEIGHT    {}", self.map_height));
        lines.push(format!("#define MAP_TILE_SIZE {}", self.record_size));

        for class in &self.classes {
            lines.push(format!(
                "// prop {} = {} // {}",
                class.class, class.index, class.source
            ));
        }

        lines.push(format!(
            "// Total bytes = {} (0x{:06x})",
            self.total_bytes, self.total_bytes
        ));

        lines.join("\n")
    }

    /// Render the table as pretty JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::error::PackError::Parse {
            message: format!("failed to serialize symbol table: {}", e),
            help: None,
        })
    }
}
