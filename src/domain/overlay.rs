//! Text overlay types placed on top of the base photo
//!
//! Overlay coordinates are canvas logical coordinates.

use std::fmt;

use crate::config::TextColor;

use super::geometry::{Point, Rect, Size};

/// Stable identity of an overlay within one session
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positioned block of text drawn over the photo
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    pub id: OverlayId,
    /// Text as entered by the user
    pub text: String,
    /// Lines after wrapping, drawn centered inside `size`
    pub lines: Vec<String>,
    /// Effective font size after shrink-to-fit
    pub font_size: f32,
    /// Center of the bounding box
    pub center: Point,
    /// Bounding box size, fixed at creation
    pub size: Size,
    /// Color of this text
    pub color: TextColor,
    /// Whether to draw a drop shadow behind the glyphs
    pub shadow: bool,
}

impl TextOverlay {
    /// Bounding box in canvas coordinates
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.center, self.size)
    }
}
