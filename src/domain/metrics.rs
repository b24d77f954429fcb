// ============================================================
// Layer 3 — Subject Metrics
// ============================================================
// Aggregates the per-frame prediction errors for one subject
// into the eleven error metrics of a results row:
//
//   - mean Euclidean / |Y| / |X| error of the combined estimate
//     (combined = (left prediction + right prediction) / 2,
//     per axis, against the mean tracker gaze)
//   - mean |Y| / |X| error of the left and right eye separately,
//     against that eye's own tracker gaze
//   - mean Euclidean / |Y| / |X| error of the baseline estimator
//     against the mean tracker gaze, computed identically
//
// Every aggregate divides by the count of evaluated frames.
// All arithmetic is done in f64 even though labels arrive as f32,
// so averaging long test sets stays stable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Per-target scalar predictions over a subject's test set,
/// in original test order.
#[derive(Debug, Clone, Default)]
pub struct TargetPredictions {
    pub left_y: Vec<f64>,
    pub left_x: Vec<f64>,
    pub right_y: Vec<f64>,
    pub right_x: Vec<f64>,
}

impl TargetPredictions {
    /// Number of frames every target produced a prediction for.
    pub fn frame_count(&self) -> usize {
        self.left_y
            .len()
            .min(self.left_x.len())
            .min(self.right_y.len())
            .min(self.right_x.len())
    }
}

/// Ground truth and baseline values for a subject's test set.
/// Borrowed slices out of the test split's parallel sequences.
#[derive(Debug, Clone, Copy)]
pub struct TestTruth<'a> {
    pub mean_x: &'a [f32],
    pub mean_y: &'a [f32],
    pub left_x: &'a [f32],
    pub left_y: &'a [f32],
    pub right_x: &'a [f32],
    pub right_y: &'a [f32],
    pub baseline_x: &'a [f32],
    pub baseline_y: &'a [f32],
}

/// One results row: subject id plus eleven error aggregates,
/// the training duration, and the train/test set sizes.
#[derive(Debug, Clone)]
pub struct SubjectMetrics {
    pub subject: usize,
    pub avg_dist: f64,
    pub avg_y_dist: f64,
    pub avg_x_dist: f64,
    pub avg_left_y_dist: f64,
    pub avg_left_x_dist: f64,
    pub avg_right_y_dist: f64,
    pub avg_right_x_dist: f64,
    pub avg_baseline_dist: f64,
    pub avg_baseline_y_dist: f64,
    pub avg_baseline_x_dist: f64,
    pub training_secs: f64,
    pub train_size: usize,
    pub test_size: usize,
}

impl SubjectMetrics {
    /// Format as one CSV row, field order matching the results file.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{},{}",
            self.subject,
            self.avg_dist,
            self.avg_y_dist,
            self.avg_x_dist,
            self.avg_left_y_dist,
            self.avg_left_x_dist,
            self.avg_right_y_dist,
            self.avg_right_x_dist,
            self.avg_baseline_dist,
            self.avg_baseline_y_dist,
            self.avg_baseline_x_dist,
            self.training_secs,
            self.train_size,
            self.test_size,
        )
    }
}

/// Euclidean distance between a predicted and a true point.
pub fn euclidean_error(pred_x: f64, pred_y: f64, true_x: f64, true_y: f64) -> f64 {
    ((pred_x - true_x).powi(2) + (pred_y - true_y).powi(2)).sqrt()
}

/// Mean |pred - truth| over the first `n` entries.
fn mean_abs_error(pred: &[f64], truth: &[f32], n: usize) -> f64 {
    (0..n).map(|k| (pred[k] - truth[k] as f64).abs()).sum::<f64>() / n as f64
}

/// Mean Euclidean error over the first `n` entries.
fn mean_euclidean_error(
    pred_x: &[f64],
    pred_y: &[f64],
    true_x: &[f32],
    true_y: &[f32],
    n: usize,
) -> f64 {
    (0..n)
        .map(|k| euclidean_error(pred_x[k], pred_y[k], true_x[k] as f64, true_y[k] as f64))
        .sum::<f64>()
        / n as f64
}

/// Aggregate one subject's predictions into a results row.
///
/// `preds` and `truth` are indexed frame-by-frame in the same
/// order; only the first `preds.frame_count()` frames are scored,
/// which equals the test size when the batch size divides it
/// (always true at batch size 1).
///
/// Caller guarantees at least one evaluated frame.
pub fn aggregate_subject(
    subject: usize,
    preds: &TargetPredictions,
    truth: &TestTruth<'_>,
    training_secs: f64,
    train_size: usize,
    test_size: usize,
) -> SubjectMetrics {
    let n = preds.frame_count();

    // Combined per-axis estimate: average of the two eye predictions
    let comb_x: Vec<f64> = (0..n).map(|k| (preds.left_x[k] + preds.right_x[k]) / 2.0).collect();
    let comb_y: Vec<f64> = (0..n).map(|k| (preds.left_y[k] + preds.right_y[k]) / 2.0).collect();

    let baseline_x: Vec<f64> = truth.baseline_x[..n].iter().map(|&v| v as f64).collect();
    let baseline_y: Vec<f64> = truth.baseline_y[..n].iter().map(|&v| v as f64).collect();

    SubjectMetrics {
        subject,
        avg_dist: mean_euclidean_error(&comb_x, &comb_y, truth.mean_x, truth.mean_y, n),
        avg_y_dist: mean_abs_error(&comb_y, truth.mean_y, n),
        avg_x_dist: mean_abs_error(&comb_x, truth.mean_x, n),
        avg_left_y_dist: mean_abs_error(&preds.left_y, truth.left_y, n),
        avg_left_x_dist: mean_abs_error(&preds.left_x, truth.left_x, n),
        avg_right_y_dist: mean_abs_error(&preds.right_y, truth.right_y, n),
        avg_right_x_dist: mean_abs_error(&preds.right_x, truth.right_x, n),
        avg_baseline_dist: mean_euclidean_error(
            &baseline_x,
            &baseline_y,
            truth.mean_x,
            truth.mean_y,
            n,
        ),
        avg_baseline_y_dist: mean_abs_error(&baseline_y, truth.mean_y, n),
        avg_baseline_x_dist: mean_abs_error(&baseline_x, truth.mean_x, n),
        training_secs,
        train_size,
        test_size,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_zero_on_identical_points() {
        assert_eq!(euclidean_error(1.5, -2.0, 1.5, -2.0), 0.0);
    }

    #[test]
    fn test_euclidean_three_four_five() {
        assert!((euclidean_error(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
    }

    fn truth_one_frame<'a>(
        mean: &'a ([f32; 1], [f32; 1]),
        left: &'a ([f32; 1], [f32; 1]),
        right: &'a ([f32; 1], [f32; 1]),
        baseline: &'a ([f32; 1], [f32; 1]),
    ) -> TestTruth<'a> {
        TestTruth {
            mean_x: &mean.0,
            mean_y: &mean.1,
            left_x: &left.0,
            left_y: &left.1,
            right_x: &right.0,
            right_y: &right.1,
            baseline_x: &baseline.0,
            baseline_y: &baseline.1,
        }
    }

    #[test]
    fn test_aggregate_perfect_predictions() {
        let preds = TargetPredictions {
            left_y: vec![2.0],
            left_x: vec![1.0],
            right_y: vec![4.0],
            right_x: vec![3.0],
        };
        // mean truth = ((1+3)/2, (2+4)/2) = (2, 3) — equals combined estimate
        let mean = ([2.0f32], [3.0f32]);
        let left = ([1.0f32], [2.0f32]);
        let right = ([3.0f32], [4.0f32]);
        let baseline = ([5.0f32], [7.0f32]);
        let truth = truth_one_frame(&mean, &left, &right, &baseline);

        let m = aggregate_subject(7, &preds, &truth, 1.25, 10, 1);
        assert_eq!(m.subject, 7);
        assert!(m.avg_dist.abs() < 1e-12);
        assert!(m.avg_x_dist.abs() < 1e-12);
        assert!(m.avg_y_dist.abs() < 1e-12);
        assert!(m.avg_left_y_dist.abs() < 1e-12);
        assert!(m.avg_right_x_dist.abs() < 1e-12);
        // baseline = (5, 7), truth = (2, 3): a 3-4-5 triangle
        assert!((m.avg_baseline_dist - 5.0).abs() < 1e-9);
        assert!((m.avg_baseline_x_dist - 3.0).abs() < 1e-9);
        assert!((m.avg_baseline_y_dist - 4.0).abs() < 1e-9);
        assert_eq!(m.train_size, 10);
        assert_eq!(m.test_size, 1);
    }

    #[test]
    fn test_aggregate_averages_over_frames() {
        let preds = TargetPredictions {
            left_y: vec![0.0, 0.0],
            left_x: vec![0.0, 0.0],
            right_y: vec![0.0, 0.0],
            right_x: vec![0.0, 0.0],
        };
        // frame 0 error = 5 (3-4-5), frame 1 error = 0
        let mean_x = [3.0f32, 0.0];
        let mean_y = [4.0f32, 0.0];
        let zeros = [0.0f32, 0.0];
        let truth = TestTruth {
            mean_x: &mean_x,
            mean_y: &mean_y,
            left_x: &zeros,
            left_y: &zeros,
            right_x: &zeros,
            right_y: &zeros,
            baseline_x: &zeros,
            baseline_y: &zeros,
        };
        let m = aggregate_subject(0, &preds, &truth, 0.0, 2, 2);
        assert!((m.avg_dist - 2.5).abs() < 1e-9);
        assert!((m.avg_x_dist - 1.5).abs() < 1e-9);
        assert!((m.avg_y_dist - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_csv_row_field_count() {
        let preds = TargetPredictions {
            left_y: vec![0.0],
            left_x: vec![0.0],
            right_y: vec![0.0],
            right_x: vec![0.0],
        };
        let zeros = ([0.0f32], [0.0f32]);
        let truth = truth_one_frame(&zeros, &zeros, &zeros, &zeros);
        let m = aggregate_subject(3, &preds, &truth, 2.0, 4, 1);
        let row = m.to_csv_row();
        assert_eq!(row.split(',').count(), 14);
        assert!(row.starts_with("3,"));
        assert!(row.ends_with(",4,1"));
    }
}
