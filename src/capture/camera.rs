//! Camera sources
//!
//! Capturing is a two step exchange: ask for access, then take a photo.
//! Both steps are awaited in sequence by the session.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Result;
use image::RgbaImage;

use super::image::{decode_photo, load_photo};

/// Result of an access request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

/// Result of a capture
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    Photo(RgbaImage),
    Cancelled,
}

/// Something that can produce a photo
pub trait CameraSource {
    async fn request_access(&self) -> Access;

    async fn capture(&self) -> Result<Capture>;
}

/// A photo file standing in for the camera
///
/// Only a permission error on the file counts as denied access. Any other
/// problem, such as a missing file, surfaces when capturing.
#[derive(Debug, Clone)]
pub struct FileCamera {
    pub path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CameraSource for FileCamera {
    async fn request_access(&self) -> Access {
        match std::fs::File::open(&self.path) {
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                log::debug!("No access to {}: {}", self.path.display(), err);
                Access::Denied
            }
            _ => Access::Granted,
        }
    }

    async fn capture(&self) -> Result<Capture> {
        let path = self.path.clone();
        let photo = tokio::task::spawn_blocking(move || load_photo(&path)).await??;
        Ok(Capture::Photo(photo))
    }
}

/// Native file picker; dismissing the dialog cancels the capture
#[derive(Debug, Clone, Default)]
pub struct PickerCamera;

impl CameraSource for PickerCamera {
    async fn request_access(&self) -> Access {
        Access::Granted
    }

    async fn capture(&self) -> Result<Capture> {
        let Some(handle) = rfd::AsyncFileDialog::new()
            .set_title("Choose a photo")
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "tif", "tiff"])
            .pick_file()
            .await
        else {
            return Ok(Capture::Cancelled);
        };

        let bytes = handle.read().await;
        let photo = tokio::task::spawn_blocking(move || decode_photo(&bytes)).await??;
        Ok(Capture::Photo(photo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[tokio::test]
    async fn test_missing_file_fails_capture_not_access() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileCamera::new(dir.path().join("nope.png"));
        assert_eq!(camera.request_access().await, Access::Granted);

        let err = camera.capture().await.unwrap_err();
        assert!(format!("{err:#}").contains("nope.png"));
    }

    #[tokio::test]
    async fn test_file_camera_captures_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let img = RgbaImage::from_pixel(4, 3, Rgba([50, 60, 70, 255]));
        img.save(&path).unwrap();

        let camera = FileCamera::new(&path);
        assert_eq!(camera.request_access().await, Access::Granted);
        assert_eq!(camera.capture().await.unwrap(), Capture::Photo(img));
    }
}
