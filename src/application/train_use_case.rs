// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Drives the whole experiment, one subject at a time:
//
//   Step 1: read the train/test session manifests   (Layer 4)
//   Step 2: for each subject id slot:
//             a. select the subject's sessions; skip the id if
//                either list is empty (no results row)
//             b. build the per-subject dataset        (Layer 4)
//             c. skip if either split has no frames
//             d. train the four targets sequentially, each into
//                its checkpoint slot                  (Layer 5)
//             e. restore each slot and predict over the test
//                split                                (Layer 5)
//             f. aggregate error metrics              (Layer 3)
//             g. append the results row               (Layer 6)
//
// Everything is fully sequential — one subject, one target, one
// sample at a time. A subject's dataset is owned by this loop
// iteration and dropped at its end, so nothing is retained
// across subjects except the overwritten checkpoint slots.
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::data::builder::SubjectDatasetBuilder;
use crate::data::manifest::{read_manifest, subject_paths};
use crate::domain::metrics::{aggregate_subject, TargetPredictions};
use crate::domain::target::Target;
use crate::infra::{checkpoint::CheckpointManager, results::ResultsWriter};
use crate::ml::model::GazeCnnConfig;
use crate::ml::{evaluator::predict_target, trainer::train_target};

// ─── Run Configuration ────────────────────────────────────────────────────────
// All parameters of a sweep. Serialisable so the run's settings
// can be written next to the checkpoints. Defaults reproduce the
// reference experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub frames_root: String,
    pub train_manifest: String,
    pub test_manifest: String,
    pub results_path: String,
    pub checkpoint_dir: String,
    pub subjects: usize,
    pub crop_height: usize,
    pub crop_width: usize,
    pub batch_size: usize,
    pub epochs: usize,
    pub lr: f64,
}

impl TrainConfig {
    /// Reject parameter combinations the sweep cannot run with,
    /// before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch size must be at least 1");
        }
        let network = GazeCnnConfig::new(self.crop_height, self.crop_width);
        if network.checked_pooled_dims().is_none() {
            bail!(
                "crop {}x{} is too small for the three conv/pool stages (minimum 30x30)",
                self.crop_height,
                self.crop_width
            );
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            frames_root: "framesdataset".to_string(),
            train_manifest: "framesdataset/train_1430_1.txt".to_string(),
            test_manifest: "framesdataset/test_1430_1.txt".to_string(),
            results_path: "CNNresults/results.csv".to_string(),
            checkpoint_dir: "CNNmodels".to_string(),
            subjects: 65,
            crop_height: 42,
            crop_width: 50,
            batch_size: 1,
            epochs: 1,
            lr: 1e-4,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full per-subject sweep.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the sweep end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Session manifests ─────────────────────────────────────────────────
        let train_manifest = read_manifest(&cfg.train_manifest)?;
        let test_manifest = read_manifest(&cfg.test_manifest)?;
        tracing::info!(
            "Manifests: {} train sessions, {} test sessions",
            train_manifest.len(),
            test_manifest.len()
        );

        // ── Sinks ─────────────────────────────────────────────────────────────
        let results = ResultsWriter::open(&cfg.results_path)?;
        let ckpts = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpts.save_config(cfg)?;

        let builder = SubjectDatasetBuilder::new(cfg);
        let mut subjects_processed = 0usize;

        // ── Per-subject sweep ─────────────────────────────────────────────────
        for subject in 0..cfg.subjects {
            let train_sessions = subject_paths(&train_manifest, subject);
            let test_sessions = subject_paths(&test_manifest, subject);

            // A subject is processed only with data on both sides.
            if train_sessions.is_empty() || test_sessions.is_empty() {
                tracing::debug!("Subject {subject}: no sessions, skipping");
                continue;
            }

            // Owned for this iteration, dropped at its end.
            let dataset = builder.build(subject, &train_sessions, &test_sessions)?;
            if dataset.train.is_empty() || dataset.test.is_empty() {
                tracing::warn!(
                    "Subject {subject}: empty split after building ({} train / {} test frames), skipping",
                    dataset.train.len(),
                    dataset.test.len()
                );
                continue;
            }

            subjects_processed += 1;
            tracing::info!(
                "Subject {subject} ({subjects_processed} processed): {} train / {} test frames",
                dataset.train.len(),
                dataset.test.len()
            );

            // ── Train ×4, each into its own slot ──────────────────────────────
            let training_start = Instant::now();
            for target in Target::ALL {
                train_target(cfg, &dataset.train, target, &ckpts)?;
            }
            let training_secs = training_start.elapsed().as_secs_f64();

            // ── Eval ×4, restoring the matching slot ──────────────────────────
            let preds = TargetPredictions {
                left_y: predict_target(cfg, &dataset.test, Target::LeftEyeY, &ckpts)?,
                left_x: predict_target(cfg, &dataset.test, Target::LeftEyeX, &ckpts)?,
                right_y: predict_target(cfg, &dataset.test, Target::RightEyeY, &ckpts)?,
                right_x: predict_target(cfg, &dataset.test, Target::RightEyeX, &ckpts)?,
            };
            if preds.frame_count() == 0 {
                tracing::warn!("Subject {subject}: no evaluated frames, skipping results row");
                continue;
            }

            // ── Aggregate and log ─────────────────────────────────────────────
            let metrics = aggregate_subject(
                subject,
                &preds,
                &dataset.test.truth(),
                training_secs,
                dataset.train.len(),
                dataset.test.len(),
            );

            tracing::info!(
                "Subject {subject} results: dist={:.4} (baseline {:.4}), x={:.4}, y={:.4}, trained in {:.1}s",
                metrics.avg_dist,
                metrics.avg_baseline_dist,
                metrics.avg_x_dist,
                metrics.avg_y_dist,
                metrics.training_secs,
            );

            results.append(&metrics)?;
        }

        tracing::info!("Sweep complete: {subjects_processed} subjects processed");
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gaze-cnn-usecase-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// A zero batch size can never form a batch; it is rejected
    /// up front rather than producing an empty sweep.
    #[test]
    fn test_zero_batch_size_is_rejected() {
        let cfg = TrainConfig { batch_size: 0, ..TrainConfig::default() };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("batch size"));
    }

    /// A crop smaller than the first 7×7 kernel cannot pass the
    /// conv stages; it is rejected with a descriptive error.
    #[test]
    fn test_undersized_crop_is_rejected() {
        let cfg = TrainConfig { crop_height: 6, ..TrainConfig::default() };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("too small"));
    }

    /// A subject with train sessions but no test sessions must be
    /// skipped without error and produce no results row.
    #[test]
    fn test_subject_without_test_sessions_emits_no_row() {
        let dir = scratch_dir("skip");
        fs::write(dir.join("train.txt"), "P_0/sessionA\n").unwrap();
        fs::write(dir.join("test.txt"), "P_1/sessionB\n").unwrap();

        let cfg = TrainConfig {
            frames_root: dir.join("framesdataset").to_string_lossy().into_owned(),
            train_manifest: dir.join("train.txt").to_string_lossy().into_owned(),
            test_manifest: dir.join("test.txt").to_string_lossy().into_owned(),
            results_path: dir.join("results.csv").to_string_lossy().into_owned(),
            checkpoint_dir: dir.join("models").to_string_lossy().into_owned(),
            subjects: 1, // only subject 0, which has no test sessions
            ..TrainConfig::default()
        };

        TrainUseCase::new(cfg.clone()).execute().unwrap();

        let contents = fs::read_to_string(&cfg.results_path).unwrap();
        // Only the session header — no subject rows.
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("Session Time Stamp: "));

        fs::remove_dir_all(&dir).ok();
    }

    /// Write one synthetic session with two frames under the
    /// given dataset root.
    fn write_session(root: &PathBuf, session: &str) {
        use image::GrayImage;

        let session_dir = root.join(session);
        fs::create_dir_all(&session_dir).unwrap();
        fs::create_dir_all(root.join("frames")).unwrap();

        let img = GrayImage::from_pixel(60, 60, image::Luma([100]));
        let mut rows = String::new();
        for i in 0..2 {
            let name = format!("frames/{}_{i}.png", session.replace('/', "_"));
            img.save(root.join(&name)).unwrap();

            let mut landmarks = vec![0.0f32; 140];
            landmarks[54] = 30.0;
            landmarks[55] = 20.0;
            landmarks[64] = 30.0;
            landmarks[65] = 40.0;
            let mut cols = vec![
                format!("./{name}"),
                "1491423217564".to_string(),
                "0.2".to_string(),
                "0.3".to_string(),
                "0.4".to_string(),
                "0.5".to_string(),
                "0.25".to_string(),
                "0.35".to_string(),
            ];
            cols.extend(landmarks.iter().map(|v| v.to_string()));
            cols.push("theEnd".to_string());
            rows.push_str(&cols.join(","));
            rows.push('\n');
        }
        fs::write(session_dir.join("gazePredictions.csv"), rows).unwrap();
    }

    /// Full sweep over one synthetic subject: two train frames,
    /// two test frames, one results row with 14 fields.
    #[test]
    fn test_end_to_end_sweep_appends_one_row() {
        let dir = scratch_dir("e2e");
        let root = dir.join("framesdataset");
        write_session(&root, "P_2/sessionA");
        write_session(&root, "P_2/sessionB");
        fs::write(dir.join("train.txt"), "P_2/sessionA\n").unwrap();
        fs::write(dir.join("test.txt"), "P_2/sessionB\n").unwrap();

        let cfg = TrainConfig {
            frames_root: root.to_string_lossy().into_owned(),
            train_manifest: dir.join("train.txt").to_string_lossy().into_owned(),
            test_manifest: dir.join("test.txt").to_string_lossy().into_owned(),
            results_path: dir.join("results.csv").to_string_lossy().into_owned(),
            checkpoint_dir: dir.join("models").to_string_lossy().into_owned(),
            subjects: 3,
            ..TrainConfig::default()
        };

        TrainUseCase::new(cfg.clone()).execute().unwrap();

        let contents = fs::read_to_string(&cfg.results_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Session Time Stamp: "));
        assert!(lines[1].starts_with("2,"));
        assert_eq!(lines[1].split(',').count(), 14);
        assert!(lines[1].ends_with(",2,2")); // train and test sizes

        // All four checkpoint slots exist after the sweep.
        for slot in ["leftEyeY", "leftEyeX", "rightEyeY", "rightEyeX"] {
            assert!(dir.join("models").join(format!("{slot}.mpk.gz")).exists());
        }

        fs::remove_dir_all(&dir).ok();
    }

    /// Subject 1 has sessions in both manifests, but the session
    /// data itself is missing on disk: every session is skipped as
    /// recoverable, the splits come out empty, and the subject is
    /// skipped without a row.
    #[test]
    fn test_subject_with_missing_session_data_is_skipped() {
        let dir = scratch_dir("empty-split");
        fs::write(dir.join("train.txt"), "P_1/sessionA\n").unwrap();
        fs::write(dir.join("test.txt"), "P_1/sessionB\n").unwrap();

        let cfg = TrainConfig {
            frames_root: dir.join("framesdataset").to_string_lossy().into_owned(),
            train_manifest: dir.join("train.txt").to_string_lossy().into_owned(),
            test_manifest: dir.join("test.txt").to_string_lossy().into_owned(),
            results_path: dir.join("results.csv").to_string_lossy().into_owned(),
            checkpoint_dir: dir.join("models").to_string_lossy().into_owned(),
            subjects: 2,
            ..TrainConfig::default()
        };

        TrainUseCase::new(cfg.clone()).execute().unwrap();

        let contents = fs::read_to_string(&cfg.results_path).unwrap();
        assert_eq!(contents.lines().count(), 1);

        fs::remove_dir_all(&dir).ok();
    }
}
