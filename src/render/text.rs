//! Text measurement, wrapping and glyph outlines
//!
//! Overlays are sized from the same typeface that later rasterizes them.
//! When no font file can be loaded, a fixed-metric face draws each glyph
//! as a solid cell so layout stays deterministic.

use std::fmt;
use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, OutlineCurve, ScaleFont};
use anyhow::{Context, Result};
use tiny_skia::PathBuilder;

use super::geometry::fallback;
use crate::config::TextStyle;
use crate::domain::Size;

/// Slack for float error when checking whether text fits
const FIT_EPSILON: f32 = 0.01;

/// Fonts tried when the config does not name one
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Clone)]
pub enum Typeface {
    /// Scalable font loaded from a file
    Outline(FontArc),
    /// Built-in fixed-width face
    Fixed,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Outline(_) => f.write_str("Typeface::Outline"),
            Typeface::Fixed => f.write_str("Typeface::Fixed"),
        }
    }
}

impl Typeface {
    /// Load a TrueType/OpenType font file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = FontArc::try_from_vec(bytes)
            .with_context(|| format!("Invalid font file {}", path.display()))?;
        Ok(Typeface::Outline(font))
    }

    /// Resolve the overlay typeface: configured font, then system fonts,
    /// then the built-in face
    pub fn resolve(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(face) => return face,
                Err(err) => log::warn!("Configured font unusable, falling back: {:?}", err),
            }
        }

        for candidate in SYSTEM_FONTS {
            let path = Path::new(candidate);
            if path.exists()
                && let Ok(face) = Self::load(path)
            {
                log::debug!("Using system font {}", path.display());
                return face;
            }
        }

        log::info!("No font file found, using built-in fixed face");
        Typeface::Fixed
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self, px: f32) -> f32 {
        match self {
            Typeface::Outline(font) => {
                let scaled = font.as_scaled(px);
                scaled.height() + scaled.line_gap()
            }
            Typeface::Fixed => px * fallback::LINE_HEIGHT,
        }
    }

    /// Distance from line top to baseline
    pub fn ascent(&self, px: f32) -> f32 {
        match self {
            Typeface::Outline(font) => font.as_scaled(px).ascent(),
            Typeface::Fixed => px * fallback::ASCENT,
        }
    }

    /// Advance width of a single line, including kerning
    pub fn line_width(&self, px: f32, line: &str) -> f32 {
        match self {
            Typeface::Outline(font) => {
                let scaled = font.as_scaled(px);
                let mut width = 0.0f32;
                let mut prev: Option<GlyphId> = None;
                for ch in line.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(prev_id) = prev {
                        width += scaled.kern(prev_id, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            Typeface::Fixed => line.chars().count() as f32 * px * fallback::ADVANCE,
        }
    }

    /// Glyph paths for one line with the pen starting at `x` on `baseline`
    pub fn line_paths(&self, px: f32, line: &str, x: f32, baseline: f32) -> Vec<tiny_skia::Path> {
        match self {
            Typeface::Outline(font) => outline_paths(font, px, line, x, baseline),
            Typeface::Fixed => fixed_paths(px, line, x, baseline),
        }
    }
}

fn outline_paths(
    font: &FontArc,
    px: f32,
    line: &str,
    x: f32,
    baseline: f32,
) -> Vec<tiny_skia::Path> {
    let scaled = font.as_scaled(px);
    let (sx, sy) = (scaled.h_scale_factor(), scaled.v_scale_factor());

    let mut paths = Vec::new();
    let mut pen_x = x;
    let mut prev: Option<GlyphId> = None;
    for ch in line.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev_id) = prev {
            pen_x += scaled.kern(prev_id, id);
        }
        prev = Some(id);

        let origin = pen_x;
        pen_x += scaled.h_advance(id);

        let Some(outline) = font.outline(id) else {
            continue;
        };

        // Font units are y-up
        let map = |p: ab_glyph::Point| (origin + p.x * sx, baseline - p.y * sy);

        let mut pb = PathBuilder::new();
        let mut last: Option<ab_glyph::Point> = None;
        for curve in &outline.curves {
            let (start, end) = match *curve {
                OutlineCurve::Line(a, b) => (a, b),
                OutlineCurve::Quad(a, _, c) => (a, c),
                OutlineCurve::Cubic(a, _, _, d) => (a, d),
            };
            if last != Some(start) {
                if last.is_some() {
                    pb.close();
                }
                let (mx, my) = map(start);
                pb.move_to(mx, my);
            }
            match *curve {
                OutlineCurve::Line(_, b) => {
                    let (bx, by) = map(b);
                    pb.line_to(bx, by);
                }
                OutlineCurve::Quad(_, b, c) => {
                    let (bx, by) = map(b);
                    let (cx, cy) = map(c);
                    pb.quad_to(bx, by, cx, cy);
                }
                OutlineCurve::Cubic(_, b, c, d) => {
                    let (bx, by) = map(b);
                    let (cx, cy) = map(c);
                    let (dx, dy) = map(d);
                    pb.cubic_to(bx, by, cx, cy, dx, dy);
                }
            }
            last = Some(end);
        }
        pb.close();

        if let Some(path) = pb.finish() {
            paths.push(path);
        }
    }
    paths
}

fn fixed_paths(px: f32, line: &str, x: f32, baseline: f32) -> Vec<tiny_skia::Path> {
    let advance = px * fallback::ADVANCE;
    let line_top = baseline - px * fallback::ASCENT;

    line.chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .filter_map(|(i, _)| {
            let cell_x = x + i as f32 * advance;
            let rect = tiny_skia::Rect::from_ltrb(
                cell_x + px * fallback::CELL_INSET_X,
                line_top + px * fallback::CELL_TOP,
                cell_x + advance - px * fallback::CELL_INSET_X,
                line_top + px * fallback::CELL_BOTTOM,
            )?;
            Some(PathBuilder::from_rect(rect))
        })
        .collect()
}

/// Measured and wrapped text, ready to position
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<String>,
    /// Font size the lines were fitted at
    pub font_size: f32,
    /// Bounding size of all lines
    pub size: Size,
}

/// Fit `text` into `max_width`
///
/// The text is first tried at the style's font size. If the widest line is
/// too wide, the font shrinks proportionally, but not below
/// `font_size * min_scale_factor`. Text that still does not fit at the
/// minimum size is word-wrapped at that size. Explicit newlines always break.
pub fn layout_text(face: &Typeface, text: &str, style: &TextStyle, max_width: f32) -> TextLayout {
    let paragraphs: Vec<&str> = text.split('\n').collect();
    let base = style.font_size;

    let natural = widest(face, base, &paragraphs);
    if natural <= max_width + FIT_EPSILON || natural <= 0.0 {
        return finish(face, base, paragraphs.iter().map(|p| p.to_string()).collect());
    }

    let scale = (max_width / natural).min(1.0).max(style.min_scale_factor);
    let shrunk = base * scale;
    if widest(face, shrunk, &paragraphs) <= max_width + FIT_EPSILON {
        return finish(face, shrunk, paragraphs.iter().map(|p| p.to_string()).collect());
    }

    let min_size = base * style.min_scale_factor;
    let mut lines = Vec::new();
    for paragraph in &paragraphs {
        wrap_paragraph(face, min_size, paragraph, max_width, &mut lines);
    }
    finish(face, min_size, lines)
}

fn widest(face: &Typeface, px: f32, lines: &[&str]) -> f32 {
    lines
        .iter()
        .map(|line| face.line_width(px, line))
        .fold(0.0, f32::max)
}

fn finish(face: &Typeface, px: f32, lines: Vec<String>) -> TextLayout {
    let width = lines
        .iter()
        .map(|line| face.line_width(px, line))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * face.line_height(px);
    TextLayout {
        lines,
        font_size: px,
        size: Size::new(width, height),
    }
}

/// Greedy word wrap; words wider than the line are broken between characters
fn wrap_paragraph(face: &Typeface, px: f32, paragraph: &str, max_width: f32, out: &mut Vec<String>) {
    let fits = |s: &str| face.line_width(px, s) <= max_width + FIT_EPSILON;
    let mut line = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if fits(&candidate) {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            out.push(std::mem::take(&mut line));
        }
        if fits(word) {
            line = word.to_string();
            continue;
        }

        for ch in word.chars() {
            line.push(ch);
            if !fits(&line) && line.chars().count() > 1 {
                line.pop();
                out.push(std::mem::take(&mut line));
                line.push(ch);
            }
        }
    }

    out.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle::default()
    }

    #[test]
    fn test_fixed_face_metrics() {
        let face = Typeface::Fixed;
        assert_eq!(face.line_width(30.0, "Hi"), 36.0);
        assert_eq!(face.line_height(30.0), 36.0);
        assert_eq!(face.ascent(30.0), 24.0);
    }

    #[test]
    fn test_short_text_keeps_full_size() {
        let layout = layout_text(&Typeface::Fixed, "Hi", &style(), 300.0);
        assert_eq!(layout.lines, vec!["Hi".to_string()]);
        assert_eq!(layout.font_size, 30.0);
        assert_eq!(layout.size, Size::new(36.0, 36.0));
    }

    #[test]
    fn test_slightly_long_text_shrinks_instead_of_wrapping() {
        // 10 chars at 18 units = 180 wide, canvas 120 => scale 2/3
        let layout = layout_text(&Typeface::Fixed, "abcdefghij", &style(), 120.0);
        assert_eq!(layout.lines.len(), 1);
        assert!((layout.font_size - 20.0).abs() < 0.001);
        assert!(layout.size.width <= 120.0 + FIT_EPSILON);
    }

    #[test]
    fn test_long_text_wraps_at_min_scale() {
        // At 15 units each char advances 9, so 100 fits 11 chars per line
        let layout = layout_text(&Typeface::Fixed, "hello brave new world", &style(), 100.0);
        assert_eq!(layout.font_size, 15.0);
        assert_eq!(
            layout.lines,
            vec!["hello brave".to_string(), "new world".to_string()]
        );
        assert_eq!(layout.size.height, 2.0 * 18.0);
        assert!(layout.size.width <= 100.0);
    }

    #[test]
    fn test_overlong_word_breaks_between_characters() {
        let layout = layout_text(&Typeface::Fixed, "abcdefghijklmnop", &style(), 45.0);
        assert_eq!(layout.font_size, 15.0);
        assert!(layout.lines.iter().all(|l| l.chars().count() <= 5));
        assert_eq!(layout.lines.concat(), "abcdefghijklmnop");
    }

    #[test]
    fn test_explicit_newlines_break_lines() {
        let layout = layout_text(&Typeface::Fixed, "a\nbcd", &style(), 300.0);
        assert_eq!(layout.lines, vec!["a".to_string(), "bcd".to_string()]);
        assert_eq!(layout.size, Size::new(54.0, 72.0));
    }

    #[test]
    fn test_fixed_paths_skip_whitespace() {
        let paths = Typeface::Fixed.line_paths(30.0, "a b", 0.0, 24.0);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_missing_font_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Typeface::load(&dir.path().join("nope.ttf")).is_err());
    }
}
