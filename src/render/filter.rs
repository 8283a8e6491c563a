//! Color filters applied to the base photo

use std::fmt;
use std::str::FromStr;

use image::{Pixel, RgbaImage};

/// Named filters offered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Restore the photo as captured
    None,
    Sepia,
    /// Black & white
    Mono,
}

impl FilterKind {
    pub fn id(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Sepia => "sepia",
            FilterKind::Mono => "mono",
        }
    }

    /// Label shown in the filter menu
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::None => "No Filter",
            FilterKind::Sepia => "Sepia",
            FilterKind::Mono => "Black & White",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}`")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "identity" | "original" => Ok(FilterKind::None),
            "sepia" | "sepia-tone" => Ok(FilterKind::Sepia),
            "mono" | "monochrome" | "bw" | "black-and-white" => Ok(FilterKind::Mono),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Sepia tone matrix at full intensity, rows produce R, G, B
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply a color transform to `img`, returning a new image
///
/// `FilterKind::None` returns an unchanged copy; restoring the original
/// photo is the session's job.
pub fn apply_filter(img: &RgbaImage, kind: FilterKind) -> RgbaImage {
    let mut out = img.clone();
    match kind {
        FilterKind::None => {}
        FilterKind::Sepia => {
            for pixel in out.pixels_mut() {
                let [r, g, b, a] = pixel.0;
                let (r, g, b) = (r as f32, g as f32, b as f32);
                let mix = |row: [f32; 3]| {
                    (row[0] * r + row[1] * g + row[2] * b).round().clamp(0.0, 255.0) as u8
                };
                pixel.0 = [mix(SEPIA[0]), mix(SEPIA[1]), mix(SEPIA[2]), a];
            }
        }
        FilterKind::Mono => {
            for pixel in out.pixels_mut() {
                let luma = pixel.to_luma().0[0];
                let a = pixel.0[3];
                pixel.0 = [luma, luma, luma, a];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_parse_ids_and_aliases() {
        assert_eq!("sepia".parse::<FilterKind>(), Ok(FilterKind::Sepia));
        assert_eq!("Black-And-White".parse::<FilterKind>(), Ok(FilterKind::Mono));
        assert_eq!("identity".parse::<FilterKind>(), Ok(FilterKind::None));
        assert!("vivid".parse::<FilterKind>().is_err());
        for kind in [FilterKind::None, FilterKind::Sepia, FilterKind::Mono] {
            assert_eq!(kind.id().parse::<FilterKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_mono_produces_gray_and_keeps_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 40, 90, 128]));
        let out = apply_filter(&img, FilterKind::Mono);
        for p in out.pixels() {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], 128);
        }
    }

    #[test]
    fn test_sepia_warms_white_and_saturates() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let out = apply_filter(&img, FilterKind::Sepia);
        let p = out.get_pixel(0, 0);
        assert_eq!(p[0], 255);
        assert_eq!(p[1], 255);
        assert_eq!(p[2], 239);
        assert!(p[0] >= p[2]);
    }

    #[test]
    fn test_none_is_identity() {
        let img = RgbaImage::from_pixel(3, 1, Rgba([1, 2, 3, 4]));
        assert_eq!(apply_filter(&img, FilterKind::None), img);
    }
}
