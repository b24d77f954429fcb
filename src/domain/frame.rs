// ============================================================
// Layer 3 — Frame Record
// ============================================================
// One row of a session's gazePredictions.csv describes a single
// captured frame:
//
//   column 0      frame image filename (relative to dataset root)
//   column 1      capture timestamp
//   columns 2..6  tracker ground truth: left gaze X, left gaze Y,
//                 right gaze X, right gaze Y
//   columns 6..8  baseline estimator gaze X, gaze Y
//   columns 8..   flat run of facial landmark floats from the
//                 70-point tracker, with one trailing column
//                 that is not landmark data and is dropped
//
// The eye mid-points live at fixed offsets inside the flat
// landmark run: 54/55 for the left eye (Y then X) and 64/65 for
// the right eye (Y then X). They are truncated to integers
// before being used as crop centres.
//
// Rows are immutable and read exactly once.
//
// Reference: Rust Book §9 (Error Handling), §8 (Collections)

use thiserror::Error;

/// Flat landmark offsets of the eye mid-points.
const LEFT_EYE_MID_Y: usize = 54;
const LEFT_EYE_MID_X: usize = 55;
const RIGHT_EYE_MID_Y: usize = 64;
const RIGHT_EYE_MID_X: usize = 65;

/// The landmark run must at least cover the right-eye mid-point.
const MIN_LANDMARKS: usize = RIGHT_EYE_MID_X + 1;

/// Fixed columns before the landmark run begins.
const FIXED_COLUMNS: usize = 8;

#[derive(Debug, Error)]
pub enum FrameParseError {
    #[error("expected at least 75 columns (8 fixed, 66 landmarks, 1 trailing), got {got}")]
    TooFewColumns { got: usize },

    #[error("column {column} is not a number: '{value}'")]
    BadNumber { column: usize, value: String },

    #[error("landmark run too short: {got} values, need 66")]
    TooFewLandmarks { got: usize },
}

/// One parsed frame record.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    /// Image path relative to the dataset root (leading "./" kept as-is)
    pub frame_path: String,
    /// Capture timestamp — carried through untouched, never interpreted
    pub timestamp: String,
    pub tracker_left_x: f32,
    pub tracker_left_y: f32,
    pub tracker_right_x: f32,
    pub tracker_right_y: f32,
    /// Baseline estimator output, used only for comparison
    pub baseline_x: f32,
    pub baseline_y: f32,
    /// Flat landmark values (trailing non-landmark column excluded)
    pub landmarks: Vec<f32>,
}

/// Integer eye mid-point coordinates used as crop centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeCenters {
    pub left_y: i64,
    pub left_x: i64,
    pub right_y: i64,
    pub right_x: i64,
}

impl FrameRecord {
    /// Parse one CSV line into a FrameRecord.
    ///
    /// The format is plain comma-separated floats with no quoting,
    /// so a straight split is sufficient. The final column is not
    /// landmark data and is excluded from the landmark run.
    pub fn parse(line: &str) -> Result<Self, FrameParseError> {
        let cols: Vec<&str> = line.split(',').map(str::trim).collect();

        // 8 fixed columns + landmark run + 1 trailing column
        if cols.len() < FIXED_COLUMNS + MIN_LANDMARKS + 1 {
            return Err(FrameParseError::TooFewColumns { got: cols.len() });
        }

        let number = |column: usize| -> Result<f32, FrameParseError> {
            cols[column].parse::<f32>().map_err(|_| FrameParseError::BadNumber {
                column,
                value: cols[column].to_string(),
            })
        };

        let landmarks = cols[FIXED_COLUMNS..cols.len() - 1]
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.parse::<f32>().map_err(|_| FrameParseError::BadNumber {
                    column: FIXED_COLUMNS + i,
                    value: v.to_string(),
                })
            })
            .collect::<Result<Vec<f32>, _>>()?;

        if landmarks.len() < MIN_LANDMARKS {
            return Err(FrameParseError::TooFewLandmarks { got: landmarks.len() });
        }

        Ok(Self {
            frame_path: cols[0].to_string(),
            timestamp: cols[1].to_string(),
            tracker_left_x: number(2)?,
            tracker_left_y: number(3)?,
            tracker_right_x: number(4)?,
            tracker_right_y: number(5)?,
            baseline_x: number(6)?,
            baseline_y: number(7)?,
            landmarks,
        })
    }

    /// Combined ground truth: the mean of the two tracker eye gazes.
    pub fn mean_gaze(&self) -> (f32, f32) {
        (
            (self.tracker_left_x + self.tracker_right_x) / 2.0,
            (self.tracker_left_y + self.tracker_right_y) / 2.0,
        )
    }

    /// Eye mid-points from the fixed landmark offsets, truncated
    /// to integers (matching the crop-centre convention of the
    /// frames dataset).
    pub fn eye_centers(&self) -> EyeCenters {
        EyeCenters {
            left_y: self.landmarks[LEFT_EYE_MID_Y] as i64,
            left_x: self.landmarks[LEFT_EYE_MID_X] as i64,
            right_y: self.landmarks[RIGHT_EYE_MID_Y] as i64,
            right_x: self.landmarks[RIGHT_EYE_MID_X] as i64,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Build a valid CSV line with recognisable values at the
    /// eye mid-point offsets and a non-numeric trailing column.
    fn sample_line() -> String {
        let mut landmarks = vec![0.0f32; 140];
        landmarks[54] = 101.7; // left mid Y
        landmarks[55] = 202.2; // left mid X
        landmarks[64] = 103.9; // right mid Y
        landmarks[65] = 204.1; // right mid X

        let mut cols = vec![
            "./P_1/1491423217564_2/frame.png".to_string(),
            "1491423217564".to_string(),
            "0.25".to_string(),  // tracker left X
            "0.35".to_string(),  // tracker left Y
            "0.45".to_string(),  // tracker right X
            "0.55".to_string(),  // tracker right Y
            "0.30".to_string(),  // baseline X
            "0.40".to_string(),  // baseline Y
        ];
        cols.extend(landmarks.iter().map(|v| v.to_string()));
        cols.push("theEnd".to_string()); // trailing column, excluded
        cols.join(",")
    }

    #[test]
    fn test_parse_fixed_columns() {
        let rec = FrameRecord::parse(&sample_line()).unwrap();
        assert_eq!(rec.frame_path, "./P_1/1491423217564_2/frame.png");
        assert_eq!(rec.tracker_left_x, 0.25);
        assert_eq!(rec.tracker_left_y, 0.35);
        assert_eq!(rec.tracker_right_x, 0.45);
        assert_eq!(rec.tracker_right_y, 0.55);
        assert_eq!(rec.baseline_x, 0.30);
        assert_eq!(rec.baseline_y, 0.40);
    }

    #[test]
    fn test_trailing_column_excluded() {
        let rec = FrameRecord::parse(&sample_line()).unwrap();
        // 140 landmark values in, 140 out — the "theEnd" column is gone
        assert_eq!(rec.landmarks.len(), 140);
    }

    #[test]
    fn test_eye_centers_truncate() {
        let rec = FrameRecord::parse(&sample_line()).unwrap();
        let c = rec.eye_centers();
        assert_eq!(c.left_y, 101);
        assert_eq!(c.left_x, 202);
        assert_eq!(c.right_y, 103);
        assert_eq!(c.right_x, 204);
    }

    #[test]
    fn test_mean_gaze() {
        let rec = FrameRecord::parse(&sample_line()).unwrap();
        let (x, y) = rec.mean_gaze();
        assert!((x - 0.35).abs() < 1e-6);
        assert!((y - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_too_few_columns() {
        let err = FrameRecord::parse("a,b,c").unwrap_err();
        assert!(matches!(err, FrameParseError::TooFewColumns { got: 3 }));
    }

    #[test]
    fn test_bad_number_reports_column() {
        let line = sample_line().replacen("0.45", "oops", 1);
        let err = FrameRecord::parse(&line).unwrap_err();
        match err {
            FrameParseError::BadNumber { column, value } => {
                assert_eq!(column, 4);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
