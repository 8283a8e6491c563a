//! Text overlay placement and dragging
//!
//! The manager owns the overlay set for the current photo. Insertion order
//! is render order, so newer overlays sit on top.

use crate::config::TextStyle;
use crate::domain::{OverlayId, Point, Size, TextOverlay, Vector, clamp_center};
use crate::render::text::{Typeface, layout_text};

#[derive(Clone, Debug, Default)]
pub struct OverlayManager {
    overlays: Vec<TextOverlay>,
    next_id: u64,
}

impl OverlayManager {
    /// Lay out `text` against `canvas` and place it at the canvas center
    ///
    /// Text taller than the canvas starts pinned to the top edge, the same
    /// place any later move would leave it.
    pub fn create(
        &mut self,
        text: &str,
        canvas: Size,
        style: &TextStyle,
        typeface: &Typeface,
    ) -> &TextOverlay {
        let layout = layout_text(typeface, text, style, canvas.width);
        let id = OverlayId(self.next_id);
        self.next_id += 1;

        let overlay = TextOverlay {
            id,
            text: text.to_string(),
            lines: layout.lines,
            font_size: layout.font_size,
            center: clamp_center(canvas.center(), layout.size, canvas),
            size: layout.size,
            color: style.color,
            shadow: style.shadow,
        };
        log::debug!(
            "Created overlay {} ({:.1}x{:.1} at {:.1}pt) centered at ({:.1}, {:.1})",
            id,
            overlay.size.width,
            overlay.size.height,
            overlay.font_size,
            overlay.center.x,
            overlay.center.y
        );

        self.overlays.push(overlay);
        &self.overlays[self.overlays.len() - 1]
    }

    /// Move an overlay by an incremental `delta`, clamped to the canvas
    ///
    /// `delta` is the motion since the previous event of the same drag,
    /// not since the drag started. Unknown ids are ignored.
    pub fn move_by(&mut self, id: OverlayId, delta: Vector, canvas: Size) -> Option<&TextOverlay> {
        let overlay = self.overlays.iter_mut().find(|o| o.id == id)?;
        let proposed = overlay.center + delta;
        overlay.center = clamp_center(proposed, overlay.size, canvas);
        if overlay.center != proposed {
            log::trace!("Overlay {} clamped to ({:.1}, {:.1})", id, overlay.center.x, overlay.center.y);
        }
        if !overlay.bounds().within(canvas) {
            log::debug!("Overlay {} is larger than the canvas, pinned to the top-left", id);
        }
        Some(overlay)
    }

    /// Topmost overlay whose bounds contain `p`
    pub fn hit_test(&self, p: Point) -> Option<OverlayId> {
        self.overlays
            .iter()
            .rev()
            .find(|o| o.bounds().contains_point(p))
            .map(|o| o.id)
    }

    pub fn get(&self, id: OverlayId) -> Option<&TextOverlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Overlays in render order (oldest first)
    pub fn overlays(&self) -> &[TextOverlay] {
        &self.overlays
    }

    /// Drop every overlay; ids keep increasing across clears
    pub fn clear(&mut self) {
        self.overlays.clear();
    }
}
