//! Text overlay message handlers
//!
//! Handles TextMsg for all overlay operations. Messages arriving before a
//! photo is loaded change nothing.

use crate::core::notice::Presenter;
use crate::domain::TextOverlay;
use crate::session::messages::{DragAction, TextMsg};
use crate::session::state::EditSession;

/// Handle a TextMsg, modifying session state
///
/// Returns the overlay that was created or moved, if any.
pub fn handle_text_msg<P: Presenter>(
    session: &mut EditSession<P>,
    msg: TextMsg,
) -> Option<TextOverlay> {
    match msg {
        TextMsg::Add(text) => session.add_text(&text).cloned(),
        TextMsg::Nudge(id, delta) => session.drag_overlay(id, delta).cloned(),
        TextMsg::Drag(action) => handle_drag(session, action),
        TextMsg::SetColor(color) => {
            session.style_mut().color = color;
            None
        }
        TextMsg::SetShadow(shadow) => {
            session.style_mut().shadow = shadow;
            None
        }
    }
}

// ============================================================================
// Drag handlers
// ============================================================================

fn handle_drag<P: Presenter>(session: &mut EditSession<P>, action: DragAction) -> Option<TextOverlay> {
    match action {
        DragAction::Start(at) => {
            let id = session.begin_drag(at);
            if id.is_none() {
                log::debug!("No overlay under ({:.1}, {:.1})", at.x, at.y);
            }
            None
        }
        DragAction::StartOn(id, at) => {
            if !session.begin_drag_on(id, at) {
                log::debug!("No overlay {id} to drag");
            }
            None
        }
        DragAction::Move(at) => session.drag_to(at).cloned(),
        DragAction::End => {
            session.end_drag();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SnapcamConfig, TextColor};
    use crate::core::notice::RecordingPresenter;
    use crate::domain::{OverlayId, Point, Vector};
    use crate::render::text::Typeface;
    use image::{Rgba, RgbaImage};

    fn loaded(presenter: &RecordingPresenter) -> EditSession<&RecordingPresenter> {
        let mut session = EditSession::new(&SnapcamConfig::default(), Typeface::Fixed, presenter);
        session.load_photo(RgbaImage::from_pixel(400, 800, Rgba([0, 0, 0, 255])));
        session
    }

    #[test]
    fn test_style_applies_to_new_overlays_only() {
        let presenter = RecordingPresenter::default();
        let mut session = loaded(&presenter);

        let first = handle_text_msg(&mut session, TextMsg::Add("a".into())).unwrap();
        handle_text_msg(&mut session, TextMsg::SetColor(TextColor::new(1.0, 0.0, 0.0)));
        handle_text_msg(&mut session, TextMsg::SetShadow(true));
        let second = handle_text_msg(&mut session, TextMsg::Add("b".into())).unwrap();

        assert_eq!(first.color, TextColor::WHITE);
        assert!(!first.shadow);
        assert_eq!(second.color, TextColor::new(1.0, 0.0, 0.0));
        assert!(second.shadow);
        assert_eq!(session.overlays()[0].color, TextColor::WHITE);
    }

    #[test]
    fn test_drag_sequence_moves_grabbed_overlay() {
        let presenter = RecordingPresenter::default();
        let mut session = loaded(&presenter);
        let id = handle_text_msg(&mut session, TextMsg::Add("Hi".into())).unwrap().id;

        handle_text_msg(&mut session, TextMsg::Drag(DragAction::StartOn(id, Point::new(0.0, 0.0))));
        let moved = handle_text_msg(
            &mut session,
            TextMsg::Drag(DragAction::Move(Point::new(1000.0, 0.0))),
        )
        .unwrap();
        assert_eq!(moved.center, Point::new(400.0 - 18.0, 400.0));

        handle_text_msg(&mut session, TextMsg::Drag(DragAction::End));
        assert!(
            handle_text_msg(&mut session, TextMsg::Drag(DragAction::Move(Point::new(0.0, 0.0))))
                .is_none()
        );
    }

    #[test]
    fn test_nudge_unknown_overlay_is_ignored() {
        let presenter = RecordingPresenter::default();
        let mut session = loaded(&presenter);
        handle_text_msg(&mut session, TextMsg::Add("Hi".into()));

        let result = handle_text_msg(&mut session, TextMsg::Nudge(OverlayId(42), Vector::new(1.0, 1.0)));
        assert!(result.is_none());
        assert_eq!(session.overlays()[0].center, Point::new(200.0, 400.0));
    }
}
