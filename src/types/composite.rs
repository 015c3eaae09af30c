//! Composite tile references and interaction classes.
//!
//! A map cell holds a `TileRef`: a background layer and an optional
//! foreground layer. The textual form is the comma-joined layer names
//! (`groundGrass0` or `groundGrass0,objRock`). Two layers is a hard limit.
//!
//! Every reference carries its derived `InteractionClass`, computed once at
//! construction from the layer-name prefixes. The prefix families are fixed
//! policy shared with the firmware; anything outside them classifies as
//! `Unknown` and is rejected at export.

use std::fmt;

use crate::error::{PackError, Result};

/// Background-layer name prefixes that make a cell impassable.
const BLOCKED_PREFIXES: [&str; 4] = ["block", "deco", "wall", "ramp"];

/// How firmware should treat a map cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InteractionClass {
    /// Walkable ground.
    Free,
    /// Impassable terrain.
    Blocked,
    /// A prop whose index is shared by every cell using the same object name.
    CommonProp(String),
    /// A prop that gets its own index at every occurrence.
    UniqueProp,
    /// Outside the naming policy. Fatal at export.
    Unknown,
}

impl InteractionClass {
    /// Derive the class from a reference's layer names.
    pub fn classify(background: &str, foreground: Option<&str>) -> Self {
        match foreground {
            None => {
                if BLOCKED_PREFIXES.iter().any(|p| background.starts_with(p)) {
                    InteractionClass::Blocked
                } else if background.starts_with("ground") {
                    InteractionClass::Free
                } else {
                    InteractionClass::Unknown
                }
            }
            Some(fg) => {
                if fg.starts_with("obj") {
                    InteractionClass::CommonProp(fg.to_string())
                } else if fg.starts_with("character") {
                    InteractionClass::UniqueProp
                } else {
                    InteractionClass::Unknown
                }
            }
        }
    }

    /// Check for the fatal class.
    pub fn is_unknown(&self) -> bool {
        matches!(self, InteractionClass::Unknown)
    }
}

impl fmt::Display for InteractionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionClass::Free => write!(f, "free"),
            InteractionClass::Blocked => write!(f, "blocked"),
            InteractionClass::CommonProp(name) => write!(f, "common_{}", name),
            InteractionClass::UniqueProp => write!(f, "unique"),
            InteractionClass::Unknown => write!(f, "unknown"),
        }
    }
}

/// A two-layer composite tile reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileRef {
    background: String,
    foreground: Option<String>,
    class: InteractionClass,
}

impl TileRef {
    /// Create a single-layer reference.
    pub fn single(background: impl Into<String>) -> Self {
        let background = background.into();
        let class = InteractionClass::classify(&background, None);
        Self {
            background,
            foreground: None,
            class,
        }
    }

    /// Create a two-layer reference.
    pub fn layered(background: impl Into<String>, foreground: impl Into<String>) -> Self {
        let background = background.into();
        let foreground = foreground.into();
        let class = InteractionClass::classify(&background, Some(&foreground));
        Self {
            background,
            foreground: Some(foreground),
            class,
        }
    }

    /// Parse the comma-joined textual form.
    ///
    /// One or two non-empty layer names are accepted; anything else fails.
    pub fn parse(source: &str) -> Result<Self> {
        let mut parts = source.split(',');
        let background = parts.next().unwrap_or("");
        let foreground = parts.next();

        if background.is_empty() || foreground == Some("") {
            return Err(PackError::Parse {
                message: format!("empty layer name in tile reference '{}'", source),
                help: None,
            });
        }
        if parts.next().is_some() {
            return Err(PackError::Parse {
                message: format!("tile reference '{}' has more than two layers", source),
                help: Some("A cell holds a background and at most one foreground".to_string()),
            });
        }

        Ok(match foreground {
            Some(fg) => Self::layered(background, fg),
            None => Self::single(background),
        })
    }

    /// Background layer name.
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Foreground layer name, if present.
    pub fn foreground(&self) -> Option<&str> {
        self.foreground.as_deref()
    }

    /// Layer names in composition order (background first).
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.background.as_str()).chain(self.foreground.as_deref())
    }

    /// The cached interaction class.
    pub fn class(&self) -> &InteractionClass {
        &self.class
    }

    /// Place `name` as the foreground layer, keeping the background.
    ///
    /// This is the paint-with-append operation; an existing foreground is
    /// replaced, since references never grow past two layers.
    pub fn with_overlay(&self, name: impl Into<String>) -> Self {
        Self::layered(self.background.clone(), name)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.foreground {
            Some(fg) => write!(f, "{},{}", self.background, fg),
            None => write!(f, "{}", self.background),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        let r = TileRef::parse("groundGrass0").unwrap();
        assert_eq!(r.background(), "groundGrass0");
        assert_eq!(r.foreground(), None);
    }

    #[test]
    fn test_parse_layered() {
        let r = TileRef::parse("groundGrass0,objRock").unwrap();
        assert_eq!(r.background(), "groundGrass0");
        assert_eq!(r.foreground(), Some("objRock"));
    }

    #[test]
    fn test_parse_rejects_three_layers() {
        assert!(TileRef::parse("a,b,c").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_layers() {
        assert!(TileRef::parse("").is_err());
        assert!(TileRef::parse("a,").is_err());
        assert!(TileRef::parse(",b").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for source in ["groundGrass0", "groundGrass0,characterHero"] {
            assert_eq!(TileRef::parse(source).unwrap().to_string(), source);
        }
    }

    #[test]
    fn test_with_overlay_sets_foreground() {
        let base = TileRef::single("groundGrass0");
        let painted = base.with_overlay("objRock");
        assert_eq!(painted.to_string(), "groundGrass0,objRock");
    }

    #[test]
    fn test_with_overlay_replaces_foreground() {
        let painted = TileRef::parse("groundGrass0,objRock")
            .unwrap()
            .with_overlay("characterHero");
        assert_eq!(painted.to_string(), "groundGrass0,characterHero");
    }

    #[test]
    fn test_classify_single_layer() {
        assert_eq!(
            *TileRef::single("groundGrass0").class(),
            InteractionClass::Free
        );
        for name in ["blockStone", "decoTree", "wallBrick0", "rampEast"] {
            assert_eq!(*TileRef::single(name).class(), InteractionClass::Blocked);
        }
        assert_eq!(*TileRef::single("waterDeep").class(), InteractionClass::Unknown);
    }

    #[test]
    fn test_classify_layered() {
        assert_eq!(
            *TileRef::layered("groundGrass0", "objRock").class(),
            InteractionClass::CommonProp("objRock".to_string())
        );
        assert_eq!(
            *TileRef::layered("groundGrass0", "characterHero").class(),
            InteractionClass::UniqueProp
        );
        // Foreground alone decides: a blocked background with a stray
        // foreground is still outside the policy
        assert_eq!(
            *TileRef::layered("wallBrick0", "groundGrass0").class(),
            InteractionClass::Unknown
        );
    }

    #[test]
    fn test_class_display() {
        assert_eq!(InteractionClass::Free.to_string(), "free");
        assert_eq!(InteractionClass::Blocked.to_string(), "blocked");
        assert_eq!(
            InteractionClass::CommonProp("objRock".to_string()).to_string(),
            "common_objRock"
        );
        assert_eq!(InteractionClass::UniqueProp.to_string(), "unique");
    }
}
