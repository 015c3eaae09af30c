//! Map text format.
//!
//! A saved map is a symbol table followed by the grid:
//!
//! ```text
//! 00=groundGrass0
//! 01=groundGrass0,objRock
//! 00;01;00
//! 00;00;00
//! ```
//!
//! Symbols are two lowercase hex digits, assigned to distinct cell values in
//! first-seen row-major order. Rows are semicolon-joined, top to bottom.
//! Loading is strict: an undefined symbol or a row/column count that does not
//! match the configured map size is a `MalformedMap` error, and the caller's
//! grid is only replaced after the whole text parses.

use std::collections::HashMap;

use crate::error::{PackError, Result};
use crate::types::{TileMap, TileRef};

/// Serialize a map's grid to the interned text form.
pub fn format_map(map: &TileMap) -> String {
    let mut order: Vec<String> = Vec::new();
    let mut symbols: HashMap<String, String> = HashMap::new();
    let mut rows: Vec<String> = Vec::with_capacity(map.height());

    for row in 0..map.height() {
        let mut line: Vec<String> = Vec::with_capacity(map.width());
        for col in 0..map.width() {
            let name = map
                .get(col, row)
                .map(|tile| tile.to_string())
                .unwrap_or_default();
            let symbol = symbols.entry(name.clone()).or_insert_with(|| {
                order.push(name.clone());
                format!("{:02x}", order.len() - 1)
            });
            line.push(symbol.clone());
        }
        rows.push(line.join(";"));
    }

    let mut out = String::new();
    for name in &order {
        out.push_str(&format!("{}={}\n", symbols[name], name));
    }
    out.push_str(&rows.join("\n"));
    out
}

/// Parse the interned text form into a row-major grid of `size_w * size_h`
/// tile references.
pub fn parse_map(source: &str, size_w: usize, size_h: usize) -> Result<Vec<TileRef>> {
    let mut defines: HashMap<String, TileRef> = HashMap::new();
    let mut cells: Vec<TileRef> = Vec::with_capacity(size_w * size_h);
    let mut rows = 0;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((symbol, name)) = line.split_once('=') {
            if symbol.is_empty() || name.is_empty() {
                return Err(PackError::MalformedMap {
                    message: format!("bad symbol definition on line {}", index + 1),
                    help: Some("Expected 'xx=tileName'".to_string()),
                });
            }
            let tile = TileRef::parse(name).map_err(|_| PackError::MalformedMap {
                message: format!("bad tile reference '{}' on line {}", name, index + 1),
                help: None,
            })?;
            defines.insert(symbol.to_string(), tile);
        } else {
            rows += 1;
            if rows > size_h {
                return Err(PackError::MalformedMap {
                    message: format!("more than {} rows", size_h),
                    help: None,
                });
            }

            let mut cols = 0;
            for symbol in line.split(';') {
                let tile = defines.get(symbol).ok_or_else(|| PackError::MalformedMap {
                    message: format!("undefined symbol '{}' on line {}", symbol, index + 1),
                    help: None,
                })?;
                cells.push(tile.clone());
                cols += 1;
            }
            if cols != size_w {
                return Err(PackError::MalformedMap {
                    message: format!(
                        "row {} has {} columns, expected {}",
                        rows, cols, size_w
                    ),
                    help: None,
                });
            }
        }
    }

    if rows != size_h {
        return Err(PackError::MalformedMap {
            message: format!("found {} rows, expected {}", rows, size_h),
            help: None,
        });
    }

    Ok(cells)
}
