// ============================================================
// Layer 4 — Frame Loader
// ============================================================
// Decodes a frame image to single-channel grayscale with pixel
// values normalised to [0,1], using the `image` crate. The
// decoded frame is a plain value type so the crop extractor and
// its tests never touch the filesystem.
//
// Reference: image crate documentation

use anyhow::{Context, Result};
use image::GrayImage;
use std::path::Path;

/// A decoded grayscale frame, row-major, values in [0,1].
#[derive(Debug, Clone)]
pub struct GrayFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<f32>,
}

impl GrayFrame {
    pub fn from_luma8(img: &GrayImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let pixels = img.as_raw().iter().map(|&p| p as f32 / 255.0).collect();
        Self { width, height, pixels }
    }

    /// Build a frame from raw normalised pixels (used by tests
    /// and anything that synthesises frames).
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<f32>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self { width, height, pixels }
    }

    #[inline]
    pub fn pixel(&self, y: usize, x: usize) -> f32 {
        self.pixels[y * self.width + x]
    }
}

/// Decode the image at `path` into a normalised grayscale frame.
pub fn load_gray_frame(path: impl AsRef<Path>) -> Result<GrayFrame> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("Cannot decode frame image '{}'", path.display()))?
        .into_luma8();
    Ok(GrayFrame::from_luma8(&img))
}
