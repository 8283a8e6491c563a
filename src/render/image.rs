//! Composite rendering using tiny-skia
//!
//! These functions flatten the base photo and its text overlays into a
//! single RgbaImage for saving or sharing.

use image::RgbaImage;
use image::imageops::FilterType;
use tiny_skia::{FillRule, Paint, Pixmap, Transform};

use super::geometry::{self, shadow};
use super::text::Typeface;
use crate::domain::{CanvasDimension, TextOverlay};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

/// Scale the base photo to fill the canvas
fn base_layer(base: &RgbaImage, canvas: CanvasDimension) -> RgbaImage {
    if base.dimensions() == (canvas.width(), canvas.height()) {
        return base.clone();
    }
    image::imageops::resize(base, canvas.width(), canvas.height(), FilterType::Triangle)
}

/// Fill every glyph of one overlay, offset by (`dx`, `dy`)
fn fill_overlay(
    pixmap: &mut Pixmap,
    overlay: &TextOverlay,
    typeface: &Typeface,
    paint: &Paint,
    dx: f32,
    dy: f32,
) {
    let bounds = overlay.bounds();
    let line_height = typeface.line_height(overlay.font_size);
    let ascent = typeface.ascent(overlay.font_size);

    for (i, line) in overlay.lines.iter().enumerate() {
        let line_width = typeface.line_width(overlay.font_size, line);
        let x = bounds.left + geometry::centered_line_x(overlay.size.width, line_width) + dx;
        let baseline = bounds.top + i as f32 * line_height + ascent + dy;

        for path in typeface.line_paths(overlay.font_size, line, x, baseline) {
            pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

/// Draw text overlays onto an image in order, later ones on top
pub fn draw_overlays_on_image(img: &mut RgbaImage, overlays: &[TextOverlay], typeface: &Typeface) {
    if overlays.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for overlay in overlays {
            // Draw shadow first
            if overlay.shadow {
                let offset = overlay.font_size * shadow::OFFSET;
                let mut paint = Paint::default();
                paint.set_color_rgba8(0, 0, 0, shadow::ALPHA);
                paint.anti_alias = true;
                fill_overlay(pixmap, overlay, typeface, &paint, offset, offset);
            }

            let [r, g, b, a] = overlay.color.to_rgba_u8();
            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = true;
            fill_overlay(pixmap, overlay, typeface, &paint, 0.0, 0.0);
        }
    });
}

/// Flatten the base photo and all overlays at canvas resolution
///
/// The output has the canvas' pixel size, not the photo's native
/// resolution. Overlays are painted in insertion order.
pub fn render_composite(
    base: &RgbaImage,
    overlays: &[TextOverlay],
    canvas: CanvasDimension,
    typeface: &Typeface,
) -> RgbaImage {
    let mut img = base_layer(base, canvas);
    draw_overlays_on_image(&mut img, overlays, typeface);
    log::debug!(
        "Rendered composite {}x{} with {} overlays",
        img.width(),
        img.height(),
        overlays.len()
    );
    img
}
