//! Drag gesture tracking
//!
//! Pointer events arrive as absolute positions. Overlay moves consume
//! incremental motion, so the gesture hands out the delta since the
//! previous event and then resets its reference point.

use super::geometry::{Point, Vector};
use super::overlay::OverlayId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragGesture {
    active: Option<(OverlayId, Point)>,
}

impl DragGesture {
    /// Start dragging `id` with the pointer at `at`
    ///
    /// A gesture already in progress is abandoned.
    pub fn begin(&mut self, id: OverlayId, at: Point) {
        self.active = Some((id, at));
    }

    /// Report a new pointer position
    ///
    /// Returns the overlay being dragged and the motion since the last
    /// event, or `None` when no gesture is active.
    pub fn update(&mut self, at: Point) -> Option<(OverlayId, Vector)> {
        let (id, last) = self.active.as_mut()?;
        let delta = at - *last;
        *last = at;
        Some((*id, delta))
    }

    /// Finish the gesture, returning the overlay that was dragged
    pub fn end(&mut self) -> Option<OverlayId> {
        self.active.take().map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_yields_incremental_deltas() {
        let mut gesture = DragGesture::default();
        gesture.begin(OverlayId(3), Point::new(10.0, 10.0));

        assert_eq!(
            gesture.update(Point::new(15.0, 12.0)),
            Some((OverlayId(3), Vector::new(5.0, 2.0)))
        );
        // Reference point moved to the previous event, not the drag start
        assert_eq!(
            gesture.update(Point::new(16.0, 10.0)),
            Some((OverlayId(3), Vector::new(1.0, -2.0)))
        );
    }

    #[test]
    fn test_update_without_begin_is_ignored() {
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.update(Point::new(1.0, 1.0)), None);
        assert_eq!(gesture.end(), None);
    }

    #[test]
    fn test_end_clears_gesture() {
        let mut gesture = DragGesture::default();
        gesture.begin(OverlayId(1), Point::default());
        assert_eq!(gesture.end(), Some(OverlayId(1)));
        assert_eq!(gesture.end(), None);
        assert_eq!(gesture.update(Point::new(4.0, 4.0)), None);
    }
}
