// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by the other layers:
//
//   checkpoint.rs — the four named checkpoint slots (one per
//                   regression target) saved and restored with
//                   burn's CompactRecorder, plus the run's
//                   train_config.json
//
//   results.rs    — the append-only results CSV: one session
//                   time-stamp header per run, then one 14-field
//                   row per processed subject
//
// Reference: Rust Book §7 (Modules), §9 (Error Handling)
//            Burn Book §5 (Checkpointing)

/// Checkpoint slot saving and loading
pub mod checkpoint;

/// Append-only results CSV writer
pub mod results;
