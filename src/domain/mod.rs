// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain value types and pure computations of the gaze pipeline.
// Nothing in this layer touches the filesystem or the ML
// framework, which keeps it trivially unit-testable.
//
//   frame.rs   — one parsed row of a session's gazePredictions.csv
//                (tracker gaze, baseline estimate, landmarks)
//
//   target.rs  — the four regression targets (left/right eye,
//                X/Y coordinate) and their checkpoint slot names
//
//   metrics.rs — per-subject error aggregation: Euclidean and
//                per-axis distances for the model and for the
//                baseline estimator, plus the results-row format
//
// Reference: Rust Book §5 (Structs), §9 (Error Handling)

/// Frame record parsing (one CSV row per captured frame)
pub mod frame;

/// The four regression targets and their checkpoint slots
pub mod target;

/// Per-subject error metric aggregation
pub mod metrics;
