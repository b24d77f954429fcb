// ============================================================
// Layer 2 — Application Layer
// ============================================================
// Orchestration only: no parsing, no tensors, no file formats.
//
//   train_use_case.rs — the run configuration and the
//                       per-subject state machine:
//                       select subject → build dataset →
//                       [skip if empty] → train ×4 → eval ×4 →
//                       aggregate metrics → append results row
//
// Reference: Rust Book §7 (Modules)

/// Run configuration and the per-subject sweep
pub mod train_use_case;
