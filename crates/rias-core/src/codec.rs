/// Image codec service: turns a source picture into an icon bundle.
///
/// The rest of the crate only sees the [`ImageCodec`] trait, so tests (and
/// alternative backends) can swap the `image`-crate implementation out.
use crate::error::{CoverError, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageError, Rgba, RgbaImage};
use std::path::Path;
use tracing::trace;

/// Synchronous renderer of multi-resolution icon bundles.
pub trait ImageCodec: Send + Sync {
    /// Render `source` into ICO bytes containing one frame per entry of
    /// `resolutions`, in that order.
    ///
    /// Any decode or encode failure surfaces as [`CoverError::Codec`].
    fn render(&self, source: &Path, resolutions: &[u32]) -> Result<Vec<u8>>;
}

/// Codec backed by the `image` crate; every frame is stored PNG-compressed.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcoCodec;

impl ImageCodec for IcoCodec {
    fn render(&self, source: &Path, resolutions: &[u32]) -> Result<Vec<u8>> {
        let codec_err = |err: ImageError| CoverError::Codec {
            path: source.to_path_buf(),
            reason: err.to_string(),
        };

        let decoded = image::open(source).map_err(codec_err)?;
        let canvas = square_canvas(&decoded.to_rgba8());
        trace!(
            "Rendering {} on a {}px canvas at {:?}",
            source.display(),
            canvas.width(),
            resolutions
        );

        let frames = resolutions
            .iter()
            .map(|&size| {
                let scaled = imageops::resize(&canvas, size, size, FilterType::Lanczos3);
                IcoFrame::as_png(scaled.as_raw(), size, size, ExtendedColorType::Rgba8)
            })
            .collect::<image::ImageResult<Vec<_>>>()
            .map_err(codec_err)?;

        let mut bundle = Vec::new();
        IcoEncoder::new(&mut bundle)
            .encode_images(&frames)
            .map_err(codec_err)?;
        Ok(bundle)
    }
}

/// Extend `img` to a square of its larger dimension, centred on transparency.
pub fn square_canvas(img: &RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    let side = w.max(h);
    if w == h {
        return img.clone();
    }
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 0]));
    let x = i64::from((side - w) / 2);
    let y = i64::from((side - h) / 2);
    imageops::replace(&mut canvas, img, x, y);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_canvas_pads_wide_image_vertically() {
        let img = RgbaImage::from_pixel(40, 20, Rgba([9, 9, 9, 255]));
        let canvas = square_canvas(&img);
        assert_eq!(canvas.dimensions(), (40, 40));
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
        assert_eq!(canvas.get_pixel(20, 20), &Rgba([9, 9, 9, 255]));
        assert_eq!(canvas.get_pixel(20, 39)[3], 0);
    }

    #[test]
    fn test_square_canvas_keeps_square_image() {
        let img = RgbaImage::from_pixel(12, 12, Rgba([1, 2, 3, 4]));
        assert_eq!(square_canvas(&img), img);
    }

    #[test]
    fn test_render_real_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("cover.png");
        RgbaImage::from_pixel(30, 10, Rgba([200, 100, 50, 255]))
            .save(&src)
            .unwrap();

        let ico = IcoCodec.render(&src, &[32, 16]).unwrap();
        assert_eq!(u16::from_le_bytes([ico[4], ico[5]]), 2);
        assert_eq!(ico[6], 32);
        assert_eq!(ico[6 + 16], 16);
        assert_eq!(ico, IcoCodec.render(&src, &[32, 16]).unwrap());
    }

    /// Offset of frame `i`'s payload, read from its directory entry.
    fn frame_offset(ico: &[u8], i: usize) -> usize {
        let at = 6 + 16 * i + 12;
        u32::from_le_bytes([ico[at], ico[at + 1], ico[at + 2], ico[at + 3]]) as usize
    }

    #[test]
    fn test_render_stores_every_frame_as_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("flat.png");
        RgbaImage::from_pixel(300, 300, Rgba([10, 20, 30, 255]))
            .save(&src)
            .unwrap();

        let ico = IcoCodec.render(&src, &[256, 48, 16]).unwrap();
        // Width 256 is encoded as 0 in the directory entry.
        assert_eq!(ico[6], 0);
        for i in 0..3 {
            let offset = frame_offset(&ico, i);
            assert_eq!(&ico[offset..offset + 4], b"\x89PNG");
        }
        // A flat 256px frame compresses far below its raw 256 KiB.
        assert!(ico.len() < 64 * 1024, "bundle is {} bytes", ico.len());
    }

    #[test]
    fn test_render_corrupt_source_is_codec_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("broken.png");
        std::fs::write(&src, b"definitely not a png").unwrap();
        assert!(matches!(
            IcoCodec.render(&src, &[16]),
            Err(CoverError::Codec { .. })
        ));
    }
}
