//! Decoding captured photos into upright RGBA bitmaps

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage};

/// Decode an encoded photo and rotate/flip it upright per its EXIF orientation
pub fn decode_photo(bytes: &[u8]) -> Result<RgbaImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("Failed to sniff photo format")?
        .into_decoder()
        .context("Unsupported photo format")?;
    let orientation = decoder.orientation().context("Failed to read orientation")?;
    let mut img = DynamicImage::from_decoder(decoder).context("Failed to decode photo")?;
    img.apply_orientation(orientation);

    let rgba = img.to_rgba8();
    log::debug!(
        "Photo decoded: {}x{} pixels ({:?})",
        rgba.width(),
        rgba.height(),
        orientation
    );
    Ok(rgba)
}

/// Read and decode a photo file
pub fn load_photo(path: &Path) -> Result<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read photo {}", path.display()))?;
    decode_photo(&bytes).with_context(|| format!("Failed to load photo {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png_keeps_pixels() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        img.put_pixel(2, 1, Rgba([9, 8, 7, 255]));

        let decoded = decode_photo(&png_bytes(&img)).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_photo(b"definitely not a photo").is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_photo(&dir.path().join("missing.png")).is_err());
    }
}
