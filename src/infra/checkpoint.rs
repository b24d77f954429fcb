// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using burn's CompactRecorder.
//
// Storage layout — one file per regression target, named after
// the target's fixed slot:
//
//   CNNmodels/
//     leftEyeY.mpk.gz    ← weights of the left-eye-Y regressor
//     leftEyeX.mpk.gz
//     rightEyeY.mpk.gz
//     rightEyeX.mpk.gz
//     train_config.json  ← hyperparameters of the run
//
// Slots are plain overwritable storage: every subject iteration
// rewrites all four, so a slot only ever holds the most recently
// completed subject's parameters. Access is strictly sequential
// (train a target, save, restore, evaluate), so no locking.
//
// Burn's CompactRecorder serialises the parameter record to
// MessagePack, gzip-compresses it, and refuses to load into a
// model with a different architecture.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::domain::target::Target;
use crate::ml::model::GazeCnn;

/// Manages the four checkpoint slots in one directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory if
    /// it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    fn slot_path(&self, target: Target) -> PathBuf {
        // The recorder appends its own file extension
        self.dir.join(target.slot())
    }

    /// Save a model's full parameter set into the target's slot,
    /// overwriting whatever subject wrote it last.
    pub fn save<B: Backend>(&self, model: &GazeCnn<B>, target: Target) -> Result<()> {
        let path = self.slot_path(target);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint slot '{}'", path.display()))?;
        tracing::debug!("Saved checkpoint slot '{}'", target.slot());
        Ok(())
    }

    /// Load the target's slot into a freshly built model of the
    /// same architecture. Returns the model with restored weights.
    pub fn load<B: Backend>(
        &self,
        model: GazeCnn<B>,
        device: &B::Device,
        target: Target,
    ) -> Result<GazeCnn<B>> {
        let path = self.slot_path(target);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint slot '{}'. Has this target been trained?",
                    path.display()
                )
            })?;
        Ok(model.load_record(record))
    }

    /// Persist the run's configuration next to the slots so the
    /// hyperparameters behind a results file stay on record.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}
