// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand and its configurable flags.
// Every flag defaults to the reference pipeline's constant, so
// running `gaze-cnn train` with no flags reproduces the
// original experiment setup.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train and evaluate the four gaze regressors for every subject
    Train(TrainArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Root directory of the frames dataset (sessions and images
    /// are referenced relative to this directory)
    #[arg(long, default_value = "framesdataset")]
    pub frames_root: String,

    /// Manifest listing the training session paths, one
    /// `P_<id>/<session>` entry per line
    #[arg(long, default_value = "framesdataset/train_1430_1.txt")]
    pub train_manifest: String,

    /// Manifest listing the held-out test session paths
    #[arg(long, default_value = "framesdataset/test_1430_1.txt")]
    pub test_manifest: String,

    /// CSV file the per-subject result rows are appended to
    #[arg(long, default_value = "CNNresults/results.csv")]
    pub results_path: String,

    /// Directory holding the four checkpoint slots
    #[arg(long, default_value = "CNNmodels")]
    pub checkpoint_dir: String,

    /// Number of subject id slots to scan (ids without data are skipped)
    #[arg(long, default_value_t = 65)]
    pub subjects: usize,

    /// Eye crop height in pixels
    #[arg(long, default_value_t = 42)]
    pub crop_height: usize,

    /// Eye crop width in pixels
    #[arg(long, default_value_t = 50)]
    pub crop_width: usize,

    /// Samples per gradient step (the reference trains fully online)
    #[arg(long, default_value_t = 1)]
    pub batch_size: usize,

    /// Full passes over a subject's training data per target
    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-4)]
    pub lr: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            frames_root:    a.frames_root,
            train_manifest: a.train_manifest,
            test_manifest:  a.test_manifest,
            results_path:   a.results_path,
            checkpoint_dir: a.checkpoint_dir,
            subjects:       a.subjects,
            crop_height:    a.crop_height,
            crop_width:     a.crop_width,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
        }
    }
}
