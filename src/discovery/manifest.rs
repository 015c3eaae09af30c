//! Project manifest (iso.yaml) parsing.
//!
//! The manifest defines project configuration: where the tile artwork
//! lives, the map file and its configured size, the sentinel ground tile,
//! and the output basename. Every field has a default matching the
//! reference device project, so a manifest is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PackError, Result};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "iso.yaml";

/// Project manifest loaded from iso.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory of tile PNGs.
    pub tiles: PathBuf,

    /// Map text file.
    pub map: PathBuf,

    /// Map grid size in cells [width, height].
    pub map_size: [usize; 2],

    /// Sentinel tile filling unpainted cells.
    pub default_tile: String,

    /// Basename for the exported `.bin`/`.h` pair.
    pub output: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            tiles: PathBuf::from("tiles"),
            map: PathBuf::from("map.txt"),
            map_size: [64, 32],
            default_tile: "groundGrass0".to_string(),
            output: "data".to_string(),
        }
    }
}

impl Manifest {
    /// Load a manifest from an iso.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PackError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PackError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check iso.yaml syntax".to_string()),
        })
    }

    /// Load `iso.yaml` from a project directory, or defaults if absent.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Map width in cells.
    pub fn map_width(&self) -> usize {
        self.map_size[0]
    }

    /// Map height in cells.
    pub fn map_height(&self) -> usize {
        self.map_size[1]
    }
}
