//! PNG encoding of rendered pixmaps.

use std::io::Cursor;

use iconsmith_core::RasterError;
use image::{ImageBuffer, ImageFormat, Rgba};
use tiny_skia::Pixmap;

/// Encodes a pixmap as an 8-bit RGBA PNG.
///
/// tiny-skia stores premultiplied alpha; PNG expects straight alpha, so every
/// pixel is demultiplied first. The output starts with the PNG signature
/// followed by the IHDR chunk, which puts the width at byte offset 16.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    encode_rgba(pixmap.width(), pixmap.height(), rgba)
}

/// Encodes straight-alpha RGBA rows as a PNG.
///
/// `rgba` must hold exactly `width * height * 4` bytes.
pub fn encode_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<u8>, RasterError> {
    let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(width, height, rgba)
        .ok_or_else(|| RasterError::Encode("pixel buffer does not match surface size".to_string()))?;

    let mut png_data = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
        .map_err(|e| RasterError::Encode(e.to_string()))?;

    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn test_png_signature_and_width() {
        let pixmap = Pixmap::new(20, 20).unwrap();
        let png = encode_png(&pixmap).unwrap();

        // PNG magic bytes
        assert!(png.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]));
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 20);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 20);
    }

    #[test]
    fn test_alpha_is_demultiplied() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(Color::from_rgba8(255, 0, 0, 128));

        let png = encode_png(&pixmap).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        let pixel = decoded.get_pixel(0, 0);

        assert_eq!(pixel[3], 128);
        // Premultiplied storage would leave red at ~128
        assert!(pixel[0] >= 250, "red channel was {}", pixel[0]);
    }

    #[test]
    fn test_short_buffer_is_encode_error() {
        let err = encode_rgba(4, 4, vec![0; 4 * 4 * 4 - 1]).unwrap_err();
        assert!(matches!(err, RasterError::Encode(_)));
    }

    #[test]
    fn test_zero_area_is_encode_error() {
        let err = encode_rgba(0, 0, Vec::new()).unwrap_err();
        assert!(matches!(err, RasterError::Encode(_)), "got {err:?}");
    }
}
