use std::fmt;

use serde::{Deserialize, Serialize};

/// Signed offset relative to a gravity anchor, as understood by ImageMagick
/// geometry arguments (`-annotate`, `-geometry`).
///
/// Formats as `<sign><x><sign><y>`: non-negative components get a leading
/// `+`, negative components keep their own `-`. `(0, 0)` is `+0+0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift the vertical component, keeping x untouched
    pub fn shifted_y(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(dy),
        }
    }
}

fn write_signed(f: &mut fmt::Formatter<'_>, value: i32) -> fmt::Result {
    if value >= 0 {
        write!(f, "+{}", value)
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signed(f, self.x)?;
        write_signed(f, self.y)
    }
}
