// ============================================================
// Layer 5 — Gaze Regression Network
// ============================================================
// The fixed architecture regressing one gaze coordinate from one
// eye crop, after https://arxiv.org/pdf/1605.05258.pdf:
//
//   conv 7×7 ×24, valid, ReLU → max-pool 2×2 stride 2
//   conv 5×5 ×24, valid, ReLU → max-pool 2×2 stride 2
//   conv 3×3 ×24, valid, ReLU → max-pool 2×2 stride 2
//   flatten → dense 4096, ReLU → dense 1 (linear)
//
// For the default 42×50 crop the flattened size is 24·2·3 = 144.
// Loss is mean squared error between the scalar prediction and
// the label, averaged over the batch.
//
// Reference: Burn Book §3 (Building Blocks)

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        loss::{MseLoss, Reduction},
        pool::{MaxPool2d, MaxPool2dConfig},
        Linear, LinearConfig, PaddingConfig2d,
    },
    prelude::*,
    tensor::{activation::relu, backend::AutodiffBackend},
};

/// Kernel sizes of the three conv stages.
const KERNELS: [usize; 3] = [7, 5, 3];

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct GazeCnnConfig {
    pub crop_height: usize,
    pub crop_width: usize,
    #[config(default = 24)]
    pub filters: usize,
    #[config(default = 4096)]
    pub feature_dim: usize,
}

impl GazeCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GazeCnn<B> {
        let conv = |kernel: usize, in_channels: usize| {
            Conv2dConfig::new([in_channels, self.filters], [kernel, kernel])
                .with_padding(PaddingConfig2d::Valid)
                .init(device)
        };
        let pool = || MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        let (pooled_h, pooled_w) = self.pooled_dims();
        let flat_dim = self.filters * pooled_h * pooled_w;

        GazeCnn {
            conv1: conv(KERNELS[0], 1),
            pool1: pool(),
            conv2: conv(KERNELS[1], self.filters),
            pool2: pool(),
            conv3: conv(KERNELS[2], self.filters),
            pool3: pool(),
            feature: LinearConfig::new(flat_dim, self.feature_dim).init(device),
            head: LinearConfig::new(self.feature_dim, 1).init(device),
        }
    }

    /// Spatial size after the three valid conv + stride-2 pool
    /// stages. The crop must stay positive through all stages
    /// (true for the 42×50 default); callers taking untrusted
    /// dimensions check with checked_pooled_dims() first.
    pub fn pooled_dims(&self) -> (usize, usize) {
        let reduce = |mut d: usize| {
            for k in KERNELS {
                d = (d - k + 1) / 2;
            }
            d
        };
        (reduce(self.crop_height), reduce(self.crop_width))
    }

    /// Pooled dimensions, or None when the crop is too small to
    /// pass the three conv stages with at least one output cell.
    pub fn checked_pooled_dims(&self) -> Option<(usize, usize)> {
        let reduce = |mut d: usize| -> Option<usize> {
            for k in KERNELS {
                if d < k {
                    return None;
                }
                d = (d - k + 1) / 2;
            }
            (d > 0).then_some(d)
        };
        Some((reduce(self.crop_height)?, reduce(self.crop_width)?))
    }
}

#[derive(Module, Debug)]
pub struct GazeCnn<B: Backend> {
    pub conv1: Conv2d<B>,
    pub pool1: MaxPool2d,
    pub conv2: Conv2d<B>,
    pub pool2: MaxPool2d,
    pub conv3: Conv2d<B>,
    pub pool3: MaxPool2d,
    pub feature: Linear<B>,
    pub head: Linear<B>,
}

impl<B: Backend> GazeCnn<B> {
    /// Pure forward pass.
    /// images: [batch, 1, H, W] → predictions: [batch, 1]
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool1.forward(relu(self.conv1.forward(images)));
        let x = self.pool2.forward(relu(self.conv2.forward(x)));
        let x = self.pool3.forward(relu(self.conv3.forward(x)));

        let x = x.flatten::<2>(1, 3); // [batch, filters * h * w]
        let features = relu(self.feature.forward(x));
        self.head.forward(features)
    }

    /// Forward pass plus MSE loss, for training steps.
    pub fn forward_step(
        &self,
        images: Tensor<B, 4>,
        labels: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let predictions = self.forward(images);
        let loss = MseLoss::new().forward(predictions.clone(), labels, Reduction::Mean);
        (loss, predictions)
    }
}
