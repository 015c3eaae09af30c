//! Map record emission and interaction-class index assignment.
//!
//! Every map cell exports as a 3-byte record: background frame base,
//! foreground frame base (0 when absent), and an interaction-class index.
//! Class indices come from a single counter walked in row-major scan order:
//! blocked, free, and each distinct common-prop name allocate once and are
//! shared; unique props take a fresh index at every occurrence.

use std::collections::HashMap;

use crate::error::{PackError, Result};
use crate::types::{InteractionClass, TileMap, TileRef};

use super::symbols::ClassSymbol;

/// Bytes per exported map cell.
pub const MAP_RECORD_SIZE: usize = 3;

/// Assigns interaction-class indices in first-encounter order.
#[derive(Debug, Default)]
pub struct ClassIndexer {
    shared: HashMap<String, u8>,
    next: usize,
    assignments: Vec<ClassSymbol>,
}

impl ClassIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for the class of the cell at (col, row).
    ///
    /// Records a symbol entry for every allocation made. `Unknown` is a
    /// content-authoring bug and aborts the export with the coordinate.
    pub fn assign(&mut self, tile: &TileRef, col: usize, row: usize) -> Result<u8> {
        let class = tile.class();

        if class.is_unknown() {
            return Err(PackError::UnknownTileClass {
                name: tile.to_string(),
                col,
                row,
                help: Some(
                    "Cell names must use the ground/block/deco/wall/ramp, obj, or character prefixes"
                        .to_string(),
                ),
            });
        }

        if matches!(class, InteractionClass::UniqueProp) {
            let index = self.allocate(class, tile)?;
            return Ok(index);
        }

        let key = class.to_string();
        if let Some(&index) = self.shared.get(&key) {
            return Ok(index);
        }
        let index = self.allocate(class, tile)?;
        self.shared.insert(key, index);
        Ok(index)
    }

    fn allocate(&mut self, class: &InteractionClass, tile: &TileRef) -> Result<u8> {
        if self.next > u8::MAX as usize {
            return Err(PackError::Precondition {
                message: "interaction-class index space exhausted (8-bit)".to_string(),
                help: None,
            });
        }
        let index = self.next as u8;
        self.next += 1;
        self.assignments.push(ClassSymbol {
            class: class.to_string(),
            index,
            source: tile.to_string(),
        });
        Ok(index)
    }

    /// Every allocation made, in assignment order.
    pub fn into_assignments(self) -> Vec<ClassSymbol> {
        self.assignments
    }
}

/// Result of the map pass.
#[derive(Debug)]
pub struct MapPass {
    pub bytes: Vec<u8>,
    pub assignments: Vec<ClassSymbol>,
}

/// Encode the full configured grid (not just the viewport) row-major.
pub fn encode_map(map: &TileMap, frame_bases: &HashMap<String, u8>) -> Result<MapPass> {
    let mut indexer = ClassIndexer::new();
    let mut bytes = Vec::with_capacity(map.width() * map.height() * MAP_RECORD_SIZE);

    for (col, row, tile) in map.iter_cells() {
        let background = layer_base(frame_bases, tile.background())?;
        let foreground = match tile.foreground() {
            Some(name) => layer_base(frame_bases, name)?,
            None => 0,
        };
        let class_index = indexer.assign(tile, col, row)?;
        bytes.extend_from_slice(&[background, foreground, class_index]);
    }

    Ok(MapPass {
        bytes,
        assignments: indexer.into_assignments(),
    })
}

fn layer_base(frame_bases: &HashMap<String, u8>, name: &str) -> Result<u8> {
    frame_bases
        .get(name)
        .copied()
        .ok_or_else(|| PackError::UnknownTile {
            name: name.to_string(),
            help: Some("The map references a tile the library does not contain".to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_and_unique_assignment() {
        let mut indexer = ClassIndexer::new();
        let free = TileRef::single("groundGrass0");
        let blocked = TileRef::single("wallBrick0");
        let rock = TileRef::layered("groundGrass0", "objRock");
        let hero = TileRef::layered("groundGrass0", "characterHero");

        let free_index = indexer.assign(&free, 0, 0).unwrap();
        let blocked_index = indexer.assign(&blocked, 1, 0).unwrap();
        let rock_a = indexer.assign(&rock, 0, 1).unwrap();
        let rock_b = indexer.assign(&rock, 1, 1).unwrap();
        let hero_a = indexer.assign(&hero, 0, 2).unwrap();
        let hero_b = indexer.assign(&hero, 1, 2).unwrap();
        let free_again = indexer.assign(&free, 2, 2).unwrap();

        assert_eq!(free_index, 0);
        assert_eq!(blocked_index, 1);
        assert_eq!(rock_a, rock_b);
        assert_ne!(hero_a, hero_b);
        assert_eq!(free_again, free_index);

        // free, blocked, common_objRock, unique, unique
        let assignments = indexer.into_assignments();
        assert_eq!(assignments.len(), 5);
        assert_eq!(assignments[2].class, "common_objRock");
        assert_eq!(assignments[3].class, "unique");
        assert_eq!(assignments[4].class, "unique");
    }

    #[test]
    fn test_distinct_common_props_get_distinct_indices() {
        let mut indexer = ClassIndexer::new();
        let rock = TileRef::layered("groundGrass0", "objRock");
        let barrel = TileRef::layered("groundGrass0", "objBarrel");

        let a = indexer.assign(&rock, 0, 0).unwrap();
        let b = indexer.assign(&barrel, 1, 0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_class_reports_coordinate() {
        let mut indexer = ClassIndexer::new();
        let err = indexer.assign(&TileRef::single("waterDeep"), 3, 7).unwrap_err();
        match err {
            PackError::UnknownTileClass { name, col, row, .. } => {
                assert_eq!(name, "waterDeep");
                assert_eq!((col, row), (3, 7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_map_records() {
        let mut map = TileMap::new(2, 2, TileRef::single("groundGrass0"));
        map.paint_cell(1, 0, "wallBrick0", false).unwrap();
        map.paint_cell(0, 1, "objRock", true).unwrap();
        map.paint_cell(1, 1, "characterHero", true).unwrap();

        let mut frame_bases = HashMap::new();
        frame_bases.insert("groundGrass0".to_string(), 0u8);
        frame_bases.insert("wallBrick0".to_string(), 1u8);
        frame_bases.insert("objRock".to_string(), 2u8);
        frame_bases.insert("characterHero".to_string(), 3u8);

        let pass = encode_map(&map, &frame_bases).unwrap();
        assert_eq!(
            pass.bytes,
            vec![
                0, 0, 0, // groundGrass0: free = 0
                1, 0, 1, // wallBrick0: blocked = 1
                0, 2, 2, // groundGrass0,objRock: common = 2
                0, 3, 3, // groundGrass0,characterHero: unique = 3
            ]
        );
        assert_eq!(pass.assignments.len(), 4);
    }

    #[test]
    fn test_encode_map_unknown_tile() {
        let map = TileMap::new(1, 1, TileRef::single("groundGrass0"));
        let err = encode_map(&map, &HashMap::new()).unwrap_err();
        assert!(matches!(err, PackError::UnknownTile { .. }));
    }
}
