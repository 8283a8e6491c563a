//! Editing session state
//!
//! One session holds the current photo, the untouched original it came
//! from, and the text overlays placed on it. Everything runs on a single
//! logical thread; each call completes before the next event is handled.

use std::path::PathBuf;

use image::RgbaImage;

use crate::annotations::overlays::OverlayManager;
use crate::capture::camera::{Access, CameraSource, Capture};
use crate::config::{SnapcamConfig, TextStyle};
use crate::core::notice::{Notice, Presenter};
use crate::domain::{DragGesture, OverlayId, Point, Size, TextOverlay, Vector};
use crate::export::{PhotoSink, ShareTarget, Shared};
use crate::render::filter::{FilterKind, apply_filter};
use crate::render::image::render_composite;
use crate::render::text::Typeface;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no photo loaded")]
    NoBaseImage,
    #[error("{action} failed: {source:#}")]
    Capability {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

pub struct EditSession<P: Presenter> {
    presenter: P,
    typeface: Typeface,
    style: TextStyle,
    /// Fixed display canvas; the photo's own size when unset
    canvas_override: Option<Size>,
    /// Photo as captured, restored by "No Filter"
    original: Option<RgbaImage>,
    /// Current working photo
    base: Option<RgbaImage>,
    filters: Vec<FilterKind>,
    overlays: OverlayManager,
    drag: DragGesture,
}

impl<P: Presenter> EditSession<P> {
    pub fn new(config: &SnapcamConfig, typeface: Typeface, presenter: P) -> Self {
        Self {
            presenter,
            typeface,
            style: config.text_style(),
            canvas_override: config.canvas.map(Size::from),
            original: None,
            base: None,
            filters: Vec::new(),
            overlays: OverlayManager::default(),
            drag: DragGesture::default(),
        }
    }

    pub fn has_photo(&self) -> bool {
        self.base.is_some()
    }

    pub fn base_image(&self) -> Option<&RgbaImage> {
        self.base.as_ref()
    }

    /// Filters applied since the photo was captured, oldest first
    pub fn applied_filters(&self) -> &[FilterKind] {
        &self.filters
    }

    /// Canvas overlays are placed against, if a photo is loaded
    pub fn canvas_size(&self) -> Option<Size> {
        let base = self.base.as_ref()?;
        Some(self.canvas_override.unwrap_or_else(|| base.dimensions().into()))
    }

    pub fn overlays(&self) -> &[TextOverlay] {
        self.overlays.overlays()
    }

    /// Style used for overlays created from now on
    pub fn style_mut(&mut self) -> &mut TextStyle {
        &mut self.style
    }

    /// Replace the photo, dropping overlays and filters
    pub fn load_photo(&mut self, photo: RgbaImage) {
        log::debug!("Loaded photo {}x{}", photo.width(), photo.height());
        self.base = Some(photo.clone());
        self.original = Some(photo);
        self.filters.clear();
        self.overlays.clear();
        self.drag.end();
    }

    /// Discard the photo and everything placed on it
    pub fn reset(&mut self) {
        self.base = None;
        self.original = None;
        self.filters.clear();
        self.overlays.clear();
        self.drag.end();
    }

    /// Ask for camera access, then capture a new photo
    ///
    /// Returns `Ok(true)` when a new photo replaced the session contents.
    /// Denied access and cancelled captures leave an empty session; a
    /// failed capture leaves the previous photo and overlays in place.
    pub async fn capture<C: CameraSource>(&mut self, camera: &C) -> Result<bool, EditorError> {
        if camera.request_access().await == Access::Denied {
            self.reset();
            self.presenter.notify(Notice::camera_denied());
            return Ok(false);
        }

        match camera.capture().await {
            Ok(Capture::Photo(photo)) => {
                self.load_photo(photo);
                Ok(true)
            }
            Ok(Capture::Cancelled) => {
                log::debug!("Capture cancelled");
                self.reset();
                Ok(false)
            }
            Err(err) => {
                self.presenter.notify(Notice::error(
                    "Error",
                    format!("Failed to capture photo. {err:#}"),
                ));
                Err(EditorError::Capability {
                    action: "capture",
                    source: err,
                })
            }
        }
    }

    /// Apply a filter to the current photo
    ///
    /// `FilterKind::None` brings back the photo as captured. Overlays are
    /// not touched. Returns false when there is no photo.
    pub fn apply_filter(&mut self, kind: FilterKind) -> bool {
        let Some(base) = self.base.as_ref() else {
            log::debug!("Ignoring filter {kind}: no photo");
            return false;
        };

        let filtered = match kind {
            FilterKind::None => {
                self.filters.clear();
                self.original.clone().unwrap_or_else(|| base.clone())
            }
            _ => {
                self.filters.push(kind);
                apply_filter(base, kind)
            }
        };
        log::debug!("Applied filter {kind}");
        self.base = Some(filtered);
        true
    }

    /// Place a new text overlay at the canvas center
    pub fn add_text(&mut self, text: &str) -> Option<&TextOverlay> {
        let Some(canvas) = self.canvas_size() else {
            log::debug!("Ignoring text: no photo");
            return None;
        };
        Some(self.overlays.create(text, canvas, &self.style, &self.typeface))
    }

    /// Move an overlay by the motion since the previous drag event
    pub fn drag_overlay(&mut self, id: OverlayId, delta: Vector) -> Option<&TextOverlay> {
        let Some(canvas) = self.canvas_size() else {
            log::debug!("Ignoring drag: no photo");
            return None;
        };
        self.overlays.move_by(id, delta, canvas)
    }

    /// Start dragging the topmost overlay under `at`
    pub fn begin_drag(&mut self, at: Point) -> Option<OverlayId> {
        let id = self.overlays.hit_test(at)?;
        self.drag.begin(id, at);
        Some(id)
    }

    /// Start dragging a specific overlay with the pointer at `at`
    pub fn begin_drag_on(&mut self, id: OverlayId, at: Point) -> bool {
        if self.overlays.get(id).is_none() {
            return false;
        }
        self.drag.begin(id, at);
        true
    }

    /// Pointer moved during a drag
    pub fn drag_to(&mut self, at: Point) -> Option<&TextOverlay> {
        let (id, delta) = self.drag.update(at)?;
        self.drag_overlay(id, delta)
    }

    pub fn end_drag(&mut self) -> Option<OverlayId> {
        self.drag.end()
    }

    /// Flatten photo and overlays at canvas resolution
    pub fn render(&self) -> Option<RgbaImage> {
        let base = self.base.as_ref()?;
        let canvas = self.canvas_size()?.dimensions()?;
        Some(render_composite(
            base,
            self.overlays.overlays(),
            canvas,
            &self.typeface,
        ))
    }

    /// Render and store the photo, reporting the outcome to the user
    pub fn save<S: PhotoSink>(&self, sink: &S) -> Result<PathBuf, EditorError> {
        let img = self.render().ok_or(EditorError::NoBaseImage)?;
        match sink.export(&img) {
            Ok(path) => {
                self.presenter.notify(Notice::photo_saved());
                Ok(path)
            }
            Err(err) => {
                self.presenter
                    .notify(Notice::save_failed(&format!("{err:#}")));
                Err(EditorError::Capability {
                    action: "save",
                    source: err,
                })
            }
        }
    }

    /// Render the photo and hand it to the share target
    pub fn share<T: ShareTarget>(&self, target: &T) -> Result<Shared, EditorError> {
        let img = self.render().ok_or(EditorError::NoBaseImage)?;
        target.share(&img).map_err(|err| {
            self.presenter.notify(Notice::error(
                "Error",
                format!("Failed to share photo. {err:#}"),
            ));
            EditorError::Capability {
                action: "share",
                source: err,
            }
        })
    }
}
