// ============================================================
// Layer 4 — Per-Subject Dataset Builder
// ============================================================
// Walks one subject's recording sessions and accumulates the
// parallel crop/label sequences for training and testing.
//
// For each session path the builder opens the companion
// `gazePredictions.csv`. A missing or unreadable session file is
// recoverable — the session is skipped with a warning and the
// rest of the subject continues. Within a readable session:
//
//   - a malformed CSV row is fatal for the run (surfaced with
//     file and line context)
//   - an unreadable frame image is fatal for the run
//   - a frame smaller than the crop window is skipped with a
//     warning carrying the frame id and the computed centers
//     (the recoverable reinterpretation of the reference's
//     blocking diagnostic)
//
// Emitted sequences are strictly parallel and preserve the
// session/record encounter order.
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::data::crop::extract_eye_crops;
use crate::data::dataset::{SubjectDataset, SubjectSplit};
use crate::data::loader::load_gray_frame;
use crate::domain::frame::FrameRecord;

/// Name of the per-session record file.
const RECORD_FILE: &str = "gazePredictions.csv";

pub struct SubjectDatasetBuilder<'a> {
    cfg: &'a TrainConfig,
}

impl<'a> SubjectDatasetBuilder<'a> {
    pub fn new(cfg: &'a TrainConfig) -> Self {
        Self { cfg }
    }

    /// Build both splits for one subject.
    pub fn build(
        &self,
        subject: usize,
        train_sessions: &[String],
        test_sessions: &[String],
    ) -> Result<SubjectDataset> {
        tracing::info!("Subject {subject}: building training data");
        let train = self.build_split(train_sessions)?;
        tracing::info!("Subject {subject}: building testing data");
        let test = self.build_split(test_sessions)?;
        Ok(SubjectDataset { subject, train, test })
    }

    /// Accumulate one split from its session paths.
    fn build_split(&self, sessions: &[String]) -> Result<SubjectSplit> {
        let mut split = SubjectSplit::new();

        for session in sessions {
            let record_path = Path::new(&self.cfg.frames_root).join(session).join(RECORD_FILE);

            // Missing session data is recoverable: skip, keep going.
            let contents = match fs::read_to_string(&record_path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(
                        "Skipping session '{}': cannot read '{}': {}",
                        session,
                        record_path.display(),
                        e
                    );
                    continue;
                }
            };

            for (line_no, line) in contents.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }

                let record = FrameRecord::parse(line).with_context(|| {
                    format!("Malformed record at {}:{}", record_path.display(), line_no + 1)
                })?;

                let frame = load_gray_frame(self.frame_image_path(&record.frame_path))?;

                let centers = record.eye_centers();
                let crops = extract_eye_crops(
                    &frame,
                    &centers,
                    self.cfg.crop_height,
                    self.cfg.crop_width,
                );
                let (left, right) = match crops {
                    Ok(pair) => pair,
                    Err(e) => {
                        // Undersized frame: drop this frame, keep the subject.
                        tracing::warn!("Skipping frame '{}': {}", record.frame_path, e);
                        continue;
                    }
                };

                split.push_frame(left, right, &record);
            }
        }

        debug_assert!(split.is_parallel());
        Ok(split)
    }

    /// Resolve a record's frame filename against the dataset root.
    /// Record paths start with "./" and may use backslashes.
    fn frame_image_path(&self, frame_path: &str) -> PathBuf {
        let relative = frame_path.replace('\\', "/");
        let relative = relative.trim_start_matches("./");
        Path::new(&self.cfg.frames_root).join(relative)
    }
}
