// ============================================================
// Layer 4 — Eye-Crop Extractor
// ============================================================
// Cuts the two fixed-size eye regions out of a full-face frame.
// For each eye the crop corner starts at midpoint − size/2,
// floored at zero; if the window would run past the far edge it
// is shifted back so the crop exactly touches that edge. The
// result is always exactly cropH × cropW as long as the frame is
// at least that large — smaller frames are a structured error,
// never an undefined slice.
//
// Pure functions, no side effects.
//
// Reference: Rust Book §9 (Error Handling)

use thiserror::Error;

use crate::data::loader::GrayFrame;
use crate::domain::frame::EyeCenters;

/// A fixed-size single-channel eye region, values in [0,1].
#[derive(Debug, Clone)]
pub struct EyeCrop {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<f32>,
}

#[derive(Debug, Error)]
pub enum CropError {
    #[error(
        "frame {frame_width}x{frame_height} is smaller than the {crop_width}x{crop_height} crop \
         (eye centers: left {left_x},{left_y} / right {right_x},{right_y})"
    )]
    FrameTooSmall {
        frame_width: usize,
        frame_height: usize,
        crop_width: usize,
        crop_height: usize,
        left_x: i64,
        left_y: i64,
        right_x: i64,
        right_y: i64,
    },
}

/// Extract the left and right eye crops around the given centers.
pub fn extract_eye_crops(
    frame: &GrayFrame,
    centers: &EyeCenters,
    crop_height: usize,
    crop_width: usize,
) -> Result<(EyeCrop, EyeCrop), CropError> {
    if frame.height < crop_height || frame.width < crop_width {
        return Err(CropError::FrameTooSmall {
            frame_width: frame.width,
            frame_height: frame.height,
            crop_width,
            crop_height,
            left_x: centers.left_x,
            left_y: centers.left_y,
            right_x: centers.right_x,
            right_y: centers.right_y,
        });
    }

    let left = crop_one(frame, centers.left_y, centers.left_x, crop_height, crop_width);
    let right = crop_one(frame, centers.right_y, centers.right_x, crop_height, crop_width);
    Ok((left, right))
}

fn crop_one(frame: &GrayFrame, mid_y: i64, mid_x: i64, height: usize, width: usize) -> EyeCrop {
    let corner_y = corner(mid_y, height, frame.height);
    let corner_x = corner(mid_x, width, frame.width);

    let mut pixels = Vec::with_capacity(height * width);
    for y in corner_y..corner_y + height {
        let row_start = y * frame.width + corner_x;
        pixels.extend_from_slice(&frame.pixels[row_start..row_start + width]);
    }
    EyeCrop { width, height, pixels }
}

/// Top/left corner for one axis: midpoint − size/2, floored at 0,
/// then pulled back so corner + size stays inside the bound.
fn corner(mid: i64, size: usize, bound: usize) -> usize {
    let c = (mid - size as i64 / 2).max(0) as usize;
    c.min(bound - size)
}
