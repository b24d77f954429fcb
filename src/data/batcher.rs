// ============================================================
// Layer 4 — Crop Batcher
// ============================================================
// Converts eye crops and their scalar labels into burn tensors.
//
// Input:  a batch of N crops, each H×W and already normalised
// Output: an image tensor of shape [N, 1, H, W] (single channel)
//         and a label tensor of shape [N, 1]
//
// All crops in a batch share the same fixed size, so batching is
// a flatten-then-reshape:
//   [c1_p1 ... c1_pHW, c2_p1, ..., cN_pHW] → [N, 1, H, W]
//
// The batcher holds the target device so tensors land on the
// right backend. The default batch size is 1 (pure online
// gradient descent), but the shapes generalise.
//
// Reference: Burn Book §4 (Batcher)

use burn::prelude::*;

use crate::data::crop::EyeCrop;

/// Stacks crops/labels into tensors on a fixed device.
/// B is the burn Backend — generic so the same batcher serves
/// both the autodiff training backend and the inference backend.
#[derive(Clone, Debug)]
pub struct CropBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> CropBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack a batch of crops into an [N, 1, H, W] image tensor.
    /// All crops must share the same dimensions.
    pub fn images(&self, crops: &[&EyeCrop]) -> Tensor<B, 4> {
        let n = crops.len();
        let height = crops[0].height;
        let width = crops[0].width;

        let flat: Vec<f32> = crops.iter().flat_map(|c| c.pixels.iter().copied()).collect();

        Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
            .reshape([n, 1, height, width])
    }

    /// Stack scalar labels into an [N, 1] tensor.
    pub fn labels(&self, values: &[f32]) -> Tensor<B, 2> {
        Tensor::<B, 1>::from_floats(values, &self.device).reshape([values.len(), 1])
    }
}
