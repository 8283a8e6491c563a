//! Saving and sharing rendered photos

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::config::SaveLocation;

/// Destination for "save to device"
pub trait PhotoSink {
    /// Store the image, returning where it ended up
    fn export(&self, img: &RgbaImage) -> Result<PathBuf>;
}

/// Destination for "share"
pub trait ShareTarget {
    fn share(&self, img: &RgbaImage) -> Result<Shared>;
}

/// A rendered photo handed to the share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shared {
    pub path: PathBuf,
}

/// Timestamped PNGs in the user's Pictures or Documents folder
#[derive(Debug, Clone)]
pub struct PhotoLibrary {
    pub location: SaveLocation,
    /// Write here instead of the user folder
    pub dir_override: Option<PathBuf>,
}

impl PhotoLibrary {
    pub fn new(location: SaveLocation) -> Self {
        Self {
            location,
            dir_override: None,
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: SaveLocation::default(),
            dir_override: Some(dir.into()),
        }
    }

    fn target_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.dir_override {
            return Some(dir.clone());
        }
        match self.location {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }

    /// Path for a new photo, unique within the directory
    pub fn get_img_path(&self) -> Option<PathBuf> {
        let dir = self.target_dir()?;
        let stem = chrono::Local::now()
            .format("Photo_%Y-%m-%d_%H-%M-%S")
            .to_string();

        let mut path = dir.join(format!("{stem}.png"));
        let mut n = 1;
        while path.exists() {
            path = dir.join(format!("{stem}_{n}.png"));
            n += 1;
        }
        Some(path)
    }
}

impl PhotoSink for PhotoLibrary {
    fn export(&self, img: &RgbaImage) -> Result<PathBuf> {
        let path = self
            .get_img_path()
            .context("No pictures directory available")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        save_rgba(img, &path)?;
        log::info!("Saved photo to {}", path.display());
        Ok(path)
    }
}

/// Hands the photo over as a kept temporary PNG
#[derive(Debug, Clone, Default)]
pub struct TempShare;

impl ShareTarget for TempShare {
    fn share(&self, img: &RgbaImage) -> Result<Shared> {
        let mut file = tempfile::Builder::new()
            .prefix("snapcam-share-")
            .suffix(".png")
            .tempfile()?;
        write_png(&mut file, img)?;
        let (_, path) = file.keep()?;
        log::info!("Shared photo as {}", path.display());
        Ok(Shared { path })
    }
}

pub fn save_rgba(img: &RgbaImage, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(write_png(&mut file, img)?)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
