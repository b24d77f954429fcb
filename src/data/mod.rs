// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw frames dataset on disk to the parallel
// crop/label sequences the trainer consumes.
//
// The pipeline flows in this order:
//
//   manifest files (train/test session lists)
//       │
//       ▼
//   manifest.rs   → normalise paths, group sessions by subject
//       │
//       ▼
//   builder.rs    → walk each session's gazePredictions.csv
//       │
//       ▼
//   loader.rs     → decode the frame image to grayscale [0,1]
//       │
//       ▼
//   crop.rs       → cut the two fixed-size eye regions out
//       │
//       ▼
//   dataset.rs    → accumulate strictly parallel sequences
//       │
//       ▼
//   shuffle.rs    → one joint permutation per training epoch
//       │
//       ▼
//   batcher.rs    → stack crops/labels into burn tensors
//
// Each module is responsible for exactly one step, so each step
// is independently testable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Session manifest reading and per-subject selection
pub mod manifest;

/// Grayscale frame decoding and normalisation
pub mod loader;

/// Fixed-size eye-region extraction with boundary clamping
pub mod crop;

/// Per-subject dataset value objects (parallel sequences)
pub mod dataset;

/// Walks session records and builds a SubjectDataset
pub mod builder;

/// Joint shuffling of the parallel training sequences
pub mod shuffle;

/// Stacks crops and labels into burn tensors
pub mod batcher;
