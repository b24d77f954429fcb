// ============================================================
// Layer 5 — Per-Target Trainer
// ============================================================
// Trains one regression target on one subject's training split
// and checkpoints the result into the target's slot.
//
// Independence is the contract here: every call initialises a
// brand-new model and a brand-new Adam optimiser, so parameters
// never leak between targets or between subjects. The four
// copy-pasted training blocks of the reference collapse into
// this one routine parameterised by the target, whose canonical
// image/label selectors live on the dataset — the left-eye
// targets always see left-eye crops and left-eye labels, and
// symmetrically for the right.
//
// Each epoch draws one fresh joint permutation of the sample
// indices and steps through it in exact batches (batch size 1 by
// default — pure online gradient descent; a trailing remainder
// is dropped as in the reference). Step losses are surfaced at
// debug level as a per-epoch mean.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};
use rand::thread_rng;

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::CropBatcher, crop::EyeCrop, dataset::SubjectSplit, shuffle::shuffled_indices};
use crate::domain::target::Target;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{GazeCnn, GazeCnnConfig};
use crate::ml::TrainBackend;

/// Train one target for one subject and write its checkpoint.
pub fn train_target(
    cfg: &TrainConfig,
    split: &SubjectSplit,
    target: Target,
    ckpts: &CheckpointManager,
) -> Result<()> {
    let device = crate::ml::device();

    // Fresh parameters every call — mandatory for target independence.
    let model_cfg = GazeCnnConfig::new(cfg.crop_height, cfg.crop_width);
    let mut model: GazeCnn<TrainBackend> = model_cfg.init(&device);

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let batcher = CropBatcher::<TrainBackend>::new(device);
    let images = split.images_for(target);
    let labels = split.labels_for(target);
    let mut rng = thread_rng();

    tracing::info!("Training {target} ({} samples)", split.len());

    for epoch in 1..=cfg.epochs {
        // One joint permutation per epoch: indexing every parallel
        // sequence through it keeps image/label pairs aligned.
        let order = shuffled_indices(split.len(), &mut rng);

        let mut loss_sum = 0.0f64;
        let mut steps = 0usize;

        for chunk in order.chunks_exact(cfg.batch_size) {
            let step_images: Vec<&EyeCrop> = chunk.iter().map(|&k| &images[k]).collect();
            let step_labels: Vec<f32> = chunk.iter().map(|&k| labels[k]).collect();

            let x = batcher.images(&step_images);
            let y = batcher.labels(&step_labels);

            let (loss, _) = model.forward_step(x, y);
            loss_sum += loss.clone().into_scalar().elem::<f64>();
            steps += 1;

            // Backward pass + Adam update
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.lr, model, grads);
        }

        if steps > 0 {
            tracing::debug!(
                "{target} epoch {epoch}/{}: mean loss {:.6}",
                cfg.epochs,
                loss_sum / steps as f64
            );
        }
    }

    // Checkpoint immediately after the final epoch; the slot is
    // shared across subjects and simply overwritten.
    ckpts.save(&model, target)?;
    Ok(())
}
