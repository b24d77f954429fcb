// ============================================================
// Layer 5 — Per-Target Evaluator
// ============================================================
// Restores one target's checkpoint and runs a subject's test
// split through a pure forward pass, collecting the scalar
// predictions in original test order.
//
// The model is rebuilt on the inference backend (no autodiff
// overhead) and the recorded weights are loaded into it — the
// same rebuild-then-load pattern the checkpoint format requires
// everywhere. Batches follow the configured batch size with the
// remainder dropped, mirroring training; at the default batch
// size of 1 every test frame is evaluated.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::Result;
use burn::prelude::*;

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::CropBatcher, crop::EyeCrop, dataset::SubjectSplit};
use crate::domain::target::Target;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{GazeCnn, GazeCnnConfig};
use crate::ml::InferBackend;

/// Predict one target's coordinate for every test frame.
pub fn predict_target(
    cfg: &TrainConfig,
    split: &SubjectSplit,
    target: Target,
    ckpts: &CheckpointManager,
) -> Result<Vec<f64>> {
    let device = crate::ml::device();

    let model_cfg = GazeCnnConfig::new(cfg.crop_height, cfg.crop_width);
    let model: GazeCnn<InferBackend> = model_cfg.init(&device);
    let model = ckpts.load(model, &device, target)?;

    let batcher = CropBatcher::<InferBackend>::new(device);
    let images = split.images_for(target);

    let mut predictions = Vec::with_capacity(split.len());
    let indices: Vec<usize> = (0..split.len()).collect();

    for chunk in indices.chunks_exact(cfg.batch_size) {
        let step_images: Vec<&EyeCrop> = chunk.iter().map(|&k| &images[k]).collect();
        let out = model.forward(batcher.images(&step_images)); // [batch, 1]

        let values = out
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions back: {e:?}"))?;
        predictions.extend(values.into_iter().map(|v| v as f64));
    }

    tracing::debug!("{target}: {} predictions", predictions.len());
    Ok(predictions)
}
