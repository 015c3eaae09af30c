//! Tile directory scanner.
//!
//! Tiles are a flat directory of PNGs following the frame naming
//! convention: `name.png` is a static tile; `name_<kind><frame>.png` is one
//! frame of an animated tile, where kind is `w` (wave), `l` (linear) or `b`
//! (blink) and frame is a digit 0-7. Frame count is the highest frame
//! number plus one; gaps and conflicting kinds are errors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PackError, Result};
use crate::types::AnimationKind;

/// One tile's worth of discovered frame files, ordered by frame number.
#[derive(Debug, Clone)]
pub struct TileGroup {
    pub name: String,
    pub kind: AnimationKind,
    pub frames: Vec<PathBuf>,
}

/// Result of scanning a tile directory.
#[derive(Debug, Default)]
pub struct TileScan {
    /// Discovered tile groups, sorted by name.
    pub groups: Vec<TileGroup>,
}

impl TileScan {
    /// Total number of discovered frame files.
    pub fn frame_count(&self) -> usize {
        self.groups.iter().map(|g| g.frames.len()).sum()
    }

    /// Check if no tiles were discovered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Split a file stem into (base name, animation kind, frame number).
///
/// Returns `None` for stems without a valid frame suffix; those are plain
/// single-frame tiles.
pub fn split_frame_suffix(stem: &str) -> Option<(&str, AnimationKind, usize)> {
    let (base, suffix) = stem.rsplit_once('_')?;
    if base.is_empty() {
        return None;
    }

    let mut chars = suffix.chars();
    let kind = AnimationKind::from_suffix(chars.next()?)?;
    let frame = chars.next()?.to_digit(8)? as usize;
    if chars.next().is_some() {
        return None;
    }

    Some((base, kind, frame))
}

/// Scan a directory for tile PNGs and group them into tiles.
///
/// Groups come back sorted by name so downstream frame indices are stable
/// across runs regardless of directory enumeration order.
pub fn scan_tiles(root: &Path) -> Result<TileScan> {
    if !root.is_dir() {
        return Err(PackError::Io {
            path: root.to_path_buf(),
            message: "tile directory not found".to_string(),
        });
    }

    // base name -> (kind, frame number -> path)
    let mut grouped: BTreeMap<String, (AnimationKind, BTreeMap<usize, PathBuf>)> = BTreeMap::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let (base, kind, frame) = match split_frame_suffix(stem) {
            Some(parts) => parts,
            None => (stem, AnimationKind::None, 0),
        };

        let (existing_kind, frames) = grouped
            .entry(base.to_string())
            .or_insert_with(|| (kind, BTreeMap::new()));
        if *existing_kind != kind {
            return Err(PackError::Parse {
                message: format!(
                    "tile '{}' mixes {} and {} frames",
                    base, existing_kind, kind
                ),
                help: Some("Use one animation suffix letter per tile".to_string()),
            });
        }
        frames.insert(frame, path.to_path_buf());
    }

    let mut groups = Vec::with_capacity(grouped.len());
    for (name, (kind, frames)) in grouped {
        let count = frames.keys().max().map_or(0, |&f| f + 1);
        if frames.len() != count {
            let missing: Vec<String> = (0..count)
                .filter(|f| !frames.contains_key(f))
                .map(|f| f.to_string())
                .collect();
            return Err(PackError::Parse {
                message: format!("tile '{}' is missing frame(s) {}", name, missing.join(", ")),
                help: None,
            });
        }
        groups.push(TileGroup {
            name,
            kind,
            frames: frames.into_values().collect(),
        });
    }

    Ok(TileScan { groups })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_frame_suffix() {
        assert_eq!(
            split_frame_suffix("groundWater_w2"),
            Some(("groundWater", AnimationKind::Wave, 2))
        );
        assert_eq!(
            split_frame_suffix("torch_b1"),
            Some(("torch", AnimationKind::Blink, 1))
        );
        assert_eq!(
            split_frame_suffix("flag_l0"),
            Some(("flag", AnimationKind::Linear, 0))
        );
    }

    #[test]
    fn test_split_frame_suffix_plain_names() {
        assert_eq!(split_frame_suffix("groundGrass0"), None);
        assert_eq!(split_frame_suffix("wall_segment"), None);
        assert_eq!(split_frame_suffix("spark_w8"), None); // digit out of range
        assert_eq!(split_frame_suffix("spark_w12"), None); // too long
        assert_eq!(split_frame_suffix("_w1"), None); // no base
    }

    #[test]
    fn test_scan_groups_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["wallBrick0.png", "groundWater_w1.png", "groundWater_w0.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let scan = scan_tiles(dir.path()).unwrap();
        let names: Vec<_> = scan.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["groundWater", "wallBrick0"]);
        assert_eq!(scan.groups[0].kind, AnimationKind::Wave);
        assert_eq!(scan.groups[0].frames.len(), 2);
        assert_eq!(scan.groups[1].kind, AnimationKind::None);
        assert_eq!(scan.frame_count(), 3);
    }

    #[test]
    fn test_scan_rejects_frame_gaps() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["groundWater_w0.png", "groundWater_w2.png"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let err = scan_tiles(dir.path()).unwrap_err();
        assert!(err.to_string().contains("missing frame"));
    }

    #[test]
    fn test_scan_rejects_mixed_kinds() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["torch_w0.png", "torch_b1.png"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        assert!(scan_tiles(dir.path()).is_err());
    }

    #[test]
    fn test_scan_missing_directory() {
        let err = scan_tiles(Path::new("/nonexistent/tiles")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }
}
