//! Shared metrics for text layout and rendering
//!
//! Layout (overlay sizing) and rasterizing (compositing) both read these,
//! so an overlay's bounding box always matches what gets drawn.

/// Metrics of the built-in fixed-width face, as fractions of the font size
pub mod fallback {
    /// Horizontal advance per character
    pub const ADVANCE: f32 = 0.6;
    /// Distance from line top to baseline
    pub const ASCENT: f32 = 0.8;
    /// Line height (PaintFE-style `font_size * 1.2`)
    pub const LINE_HEIGHT: f32 = 1.2;
    /// Horizontal inset of a glyph cell inside its advance
    pub const CELL_INSET_X: f32 = 0.05;
    /// Top of a glyph cell below the line top
    pub const CELL_TOP: f32 = 0.2;
    /// Bottom of a glyph cell below the line top
    pub const CELL_BOTTOM: f32 = 1.0;
}

/// Drop shadow constants
pub mod shadow {
    /// Shadow offset as a fraction of the font size
    pub const OFFSET: f32 = 0.06;
    /// Shadow opacity
    pub const ALPHA: u8 = 200;
}

/// Horizontal offset that centers a line of `line_width` in a box of `box_width`
#[inline]
pub fn centered_line_x(box_width: f32, line_width: f32) -> f32 {
    ((box_width - line_width) * 0.5).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_line_x() {
        assert_eq!(centered_line_x(100.0, 40.0), 30.0);
        assert_eq!(centered_line_x(40.0, 40.0), 0.0);
        assert_eq!(centered_line_x(30.0, 40.0), 0.0);
    }
}
