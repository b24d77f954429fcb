// ============================================================
// Layer 4 — Joint Shuffle
// ============================================================
// Each training epoch visits a subject's samples in a fresh
// random order. The parallel sequences (crops and labels) must
// be shuffled jointly — one permutation applied identically to
// all of them — or image/label pairs desynchronise and training
// silently regresses on the wrong targets.
//
// Instead of reordering the sequences themselves, we shuffle a
// vector of indices once per epoch and index every sequence
// through it. One permutation, applied by construction to every
// sequence, cannot drift.
//
// Uses Fisher-Yates via rand::seq::SliceRandom, the standard
// unbiased shuffle.
//
// Reference: rand crate documentation

use rand::seq::SliceRandom;
use rand::Rng;

/// A random visiting order for `len` samples.
pub fn shuffled_indices(len: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut order = shuffled_indices(100, &mut rng);
        order.sort_unstable();
        assert_eq!(order, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_joint_indexing_preserves_pairing() {
        // Two parallel sequences where pairing is checkable:
        // labels[k] == images[k] * 10 for every original frame k.
        let images: Vec<u32> = (0..50).collect();
        let labels: Vec<u32> = images.iter().map(|&v| v * 10).collect();

        let mut rng = StdRng::seed_from_u64(42);
        let order = shuffled_indices(images.len(), &mut rng);

        for &k in &order {
            assert_eq!(labels[k], images[k] * 10);
        }
    }

    #[test]
    fn test_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(shuffled_indices(0, &mut rng).is_empty());
        assert_eq!(shuffled_indices(1, &mut rng), vec![0]);
    }
}
