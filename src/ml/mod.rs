// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn framework specific code lives here — no other layer
// imports from burn directly except the data batcher.
//
//   model.rs     — the fixed convolutional regression network:
//                  three valid-padding conv blocks (7×7, 5×5,
//                  3×3 kernels, 24 filters, ReLU, 2×2 stride-2
//                  max-pool), flatten, dense ReLU projection to
//                  4096 features, single-unit linear head.
//                  MSE loss.
//
//   trainer.rs   — per-target training: fresh parameters and a
//                  fresh Adam per target, joint shuffle per
//                  epoch, single-sample gradient steps, then an
//                  immediate checkpoint into the target's slot
//
//   evaluator.rs — per-target inference: restore the target's
//                  checkpoint and run the test sequence through
//                  a pure forward pass, in original order
//
// Training runs on Autodiff<NdArray>; evaluation rebuilds the
// model on plain NdArray and loads the recorded weights.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// The fixed 3-conv-block regression network
pub mod model;

/// Per-target training loop and checkpointing
pub mod trainer;

/// Checkpoint restore and test-set inference
pub mod evaluator;

/// Backend used for training (autodiff over the CPU backend)
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Backend used for inference
pub type InferBackend = burn::backend::NdArray;

/// The single device the whole pipeline runs on.
pub fn device() -> burn::backend::ndarray::NdArrayDevice {
    Default::default()
}
