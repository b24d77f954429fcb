// ============================================================
// Layer 4 — Session Manifests
// ============================================================
// The frames dataset ships two manifest files (train/test), one
// recording session per line in the form `P_<id>\<session>` or
// `P_<id>/<session>`. The separators are normalised to forward
// slashes on read, and a subject's sessions are selected by
// exact match on the first path component — `P_1` must never
// pick up `P_14`'s sessions.
//
// Reference: Rust Book §8 (Strings), §12 (I/O)

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a manifest file into normalised relative session paths.
/// Blank lines are ignored; backslash separators become `/`.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Cannot read manifest '{}'", path.display()))?;

    Ok(contents
        .lines()
        .map(|l| l.trim().replace('\\', "/"))
        .filter(|l| !l.is_empty())
        .collect())
}

/// Select the session paths that belong to one subject id.
/// Matches on the whole first path component.
pub fn subject_paths(paths: &[String], subject: usize) -> Vec<String> {
    let prefix = format!("P_{subject}");
    paths
        .iter()
        .filter(|p| p.split('/').next() == Some(prefix.as_str()))
        .cloned()
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_filter_exact_component() {
        let paths = vec![
            "P_1/1491423217564_2".to_string(),
            "P_14/1491487691210_10".to_string(),
            "P_1/1491424813889_3".to_string(),
            "P_2/1491425087183_5".to_string(),
        ];
        let one = subject_paths(&paths, 1);
        assert_eq!(one, vec!["P_1/1491423217564_2", "P_1/1491424813889_3"]);

        let fourteen = subject_paths(&paths, 14);
        assert_eq!(fourteen, vec!["P_14/1491487691210_10"]);
    }

    #[test]
    fn test_subject_without_sessions_is_empty() {
        let paths = vec!["P_1/a".to_string()];
        assert!(subject_paths(&paths, 9).is_empty());
    }

    #[test]
    fn test_read_manifest_normalises_separators() {
        let dir = std::env::temp_dir().join(format!("gaze-cnn-manifest-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("train.txt");
        std::fs::write(&file, "P_1\\1491423217564_2\n\nP_2/1491425087183_5\n").unwrap();

        let paths = read_manifest(&file).unwrap();
        assert_eq!(paths, vec!["P_1/1491423217564_2", "P_2/1491425087183_5"]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
