// ============================================================
// Layer 4 — Subject Dataset
// ============================================================
// Value objects holding one subject's data. A SubjectSplit is a
// set of strictly parallel sequences — the same index always
// refers to the same frame across every sequence, and frames are
// stored in session/record encounter order. The only way to add
// a frame is push_frame(), which appends to every sequence at
// once, so the sequences cannot drift apart.
//
// A SubjectDataset (train split + test split) is built once per
// subject, handed by ownership into training/evaluation, and
// dropped afterwards — no cross-subject retention anywhere.

use crate::data::crop::EyeCrop;
use crate::domain::frame::FrameRecord;
use crate::domain::metrics::TestTruth;
use crate::domain::target::Target;

/// One split (train or test) of a subject's data.
#[derive(Debug, Clone, Default)]
pub struct SubjectSplit {
    pub left_eyes: Vec<EyeCrop>,
    pub right_eyes: Vec<EyeCrop>,
    pub left_labels_x: Vec<f32>,
    pub left_labels_y: Vec<f32>,
    pub right_labels_x: Vec<f32>,
    pub right_labels_y: Vec<f32>,
    /// Mean of the two tracker eye gazes per frame
    pub labels_x: Vec<f32>,
    pub labels_y: Vec<f32>,
    /// Baseline estimator output per frame (compared during eval)
    pub baseline_x: Vec<f32>,
    pub baseline_y: Vec<f32>,
}

impl SubjectSplit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one frame's crops and labels to every sequence.
    pub fn push_frame(&mut self, left: EyeCrop, right: EyeCrop, record: &FrameRecord) {
        let (mean_x, mean_y) = record.mean_gaze();
        self.left_eyes.push(left);
        self.right_eyes.push(right);
        self.left_labels_x.push(record.tracker_left_x);
        self.left_labels_y.push(record.tracker_left_y);
        self.right_labels_x.push(record.tracker_right_x);
        self.right_labels_y.push(record.tracker_right_y);
        self.labels_x.push(mean_x);
        self.labels_y.push(mean_y);
        self.baseline_x.push(record.baseline_x);
        self.baseline_y.push(record.baseline_y);
    }

    pub fn len(&self) -> usize {
        self.left_eyes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left_eyes.is_empty()
    }

    /// The canonical image sequence for a target: left-eye crops
    /// for the left-eye targets, right-eye crops for the right.
    pub fn images_for(&self, target: Target) -> &[EyeCrop] {
        match target {
            Target::LeftEyeY | Target::LeftEyeX => &self.left_eyes,
            Target::RightEyeY | Target::RightEyeX => &self.right_eyes,
        }
    }

    /// The canonical label sequence for a target: each eye's own
    /// tracker coordinate, on the same axis as the target.
    pub fn labels_for(&self, target: Target) -> &[f32] {
        match target {
            Target::LeftEyeY => &self.left_labels_y,
            Target::LeftEyeX => &self.left_labels_x,
            Target::RightEyeY => &self.right_labels_y,
            Target::RightEyeX => &self.right_labels_x,
        }
    }

    /// Borrow the ground-truth and baseline sequences for metric
    /// aggregation.
    pub fn truth(&self) -> TestTruth<'_> {
        TestTruth {
            mean_x: &self.labels_x,
            mean_y: &self.labels_y,
            left_x: &self.left_labels_x,
            left_y: &self.left_labels_y,
            right_x: &self.right_labels_x,
            right_y: &self.right_labels_y,
            baseline_x: &self.baseline_x,
            baseline_y: &self.baseline_y,
        }
    }

    /// Invariant check: every parallel sequence has the same length.
    pub fn is_parallel(&self) -> bool {
        let n = self.left_eyes.len();
        self.right_eyes.len() == n
            && self.left_labels_x.len() == n
            && self.left_labels_y.len() == n
            && self.right_labels_x.len() == n
            && self.right_labels_y.len() == n
            && self.labels_x.len() == n
            && self.labels_y.len() == n
            && self.baseline_x.len() == n
            && self.baseline_y.len() == n
    }
}

/// One subject's train and test splits.
#[derive(Debug, Clone)]
pub struct SubjectDataset {
    pub subject: usize,
    pub train: SubjectSplit,
    pub test: SubjectSplit,
}
