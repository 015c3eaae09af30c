//! Animated tiles and frame selection.
//!
//! A tile owns one or more equally-sized bitmap frames. Which frame is shown
//! is a pure function of the free-running frame counter and the tile's grid
//! column, so no per-tile animation state exists anywhere: wave tiles ripple
//! across columns, blink tiles flash out of phase, and the firmware can run
//! the identical selection on device.

use std::fmt;

use crate::error::{PackError, Result};

use super::Bitmap;

/// How a tile picks its frame from the global counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationKind {
    /// Static tile, always frame 0.
    #[default]
    None,
    /// Triangular 0..3..0 bounce, phase-shifted per column.
    Wave,
    /// Slow cycle through all frames.
    Linear,
    /// Rare single-frame flash, decorrelated across columns.
    Blink,
}

impl AnimationKind {
    /// Parse a filename suffix letter (`w`, `l`, `b`).
    pub fn from_suffix(letter: char) -> Option<Self> {
        match letter {
            'w' => Some(AnimationKind::Wave),
            'l' => Some(AnimationKind::Linear),
            'b' => Some(AnimationKind::Blink),
            _ => None,
        }
    }

    /// Select a frame for this kind.
    ///
    /// `counter` is the free-running tick counter (u16, wraps at 65536) and
    /// `column` is the tile's horizontal grid position. The result is always
    /// in `[0, frame_count)` for `frame_count >= 1`.
    pub fn frame_index(self, counter: u16, column: usize, frame_count: usize) -> usize {
        debug_assert!(frame_count >= 1);
        let frame = match self {
            AnimationKind::None => 0,
            AnimationKind::Wave => {
                let phase = ((counter >> 4) as usize + column) & 7;
                if phase > 3 {
                    7 - phase
                } else {
                    phase
                }
            }
            AnimationKind::Linear => (counter >> 5) as usize % frame_count,
            AnimationKind::Blink => {
                if ((counter >> 3) as usize ^ column) & 0x3f == 0 {
                    1
                } else {
                    0
                }
            }
        };
        frame.min(frame_count - 1)
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationKind::None => write!(f, "static"),
            AnimationKind::Wave => write!(f, "wave"),
            AnimationKind::Linear => write!(f, "linear"),
            AnimationKind::Blink => write!(f, "blink"),
        }
    }
}

/// A named tile with one or more animation frames.
#[derive(Debug, Clone)]
pub struct AnimatedTile {
    name: String,
    kind: AnimationKind,
    frames: Vec<Bitmap>,
}

impl AnimatedTile {
    /// Create a tile. At least one frame is required.
    pub fn new(name: impl Into<String>, kind: AnimationKind, frames: Vec<Bitmap>) -> Result<Self> {
        let name = name.into();
        if frames.is_empty() {
            return Err(PackError::Precondition {
                message: format!("tile '{}' has no frames", name),
                help: None,
            });
        }
        Ok(Self { name, kind, frames })
    }

    /// Create a single-frame static tile.
    pub fn still(name: impl Into<String>, frame: Bitmap) -> Self {
        Self {
            name: name.into(),
            kind: AnimationKind::None,
            frames: vec![frame],
        }
    }

    /// Tile name (unique within a library).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Animation kind.
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Number of frames (>= 1).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Bitmap] {
        &self.frames
    }

    /// Get a frame by index.
    pub fn frame(&self, index: usize) -> Option<&Bitmap> {
        self.frames.get(index)
    }

    /// Frame selected for the given counter and column.
    pub fn animated_frame(&self, counter: u16, column: usize) -> &Bitmap {
        let index = self.kind.frame_index(counter, column, self.frames.len());
        &self.frames[index]
    }

    /// Pixel dimensions of the first frame.
    pub fn size(&self) -> (usize, usize) {
        self.frames[0].size()
    }
}
