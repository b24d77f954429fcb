// ============================================================
// Layer 6 — Results Writer
// ============================================================
// Appends per-subject result rows to the results CSV. The file
// survives across runs; each run first appends a session header
// row with the start time, then one row per processed subject:
//
//   Session Time Stamp: 2017-04-05 21:13:42
//   0,0.131072,...,12.413072,1430,618
//   2,0.129583,...,10.918264,1285,540
//
// Rows are appended, never mutated.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use chrono::Utc;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::metrics::SubjectMetrics;

pub struct ResultsWriter {
    path: PathBuf,
}

impl ResultsWriter {
    /// Open the results file for appending and write this run's
    /// session time-stamp header.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create results directory for '{}'", path.display()))?;
        }

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open results file '{}'", path.display()))?;
        writeln!(f, "Session Time Stamp: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"))?;

        Ok(Self { path })
    }

    /// Append one subject's results row.
    pub fn append(&self, metrics: &SubjectMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Cannot append to results file '{}'", self.path.display()))?;
        writeln!(f, "{}", metrics.to_csv_row())?;

        tracing::debug!(
            "Logged subject {}: dist={:.4}, baseline={:.4}",
            metrics.subject,
            metrics.avg_dist,
            metrics.avg_baseline_dist,
        );
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
