//! Synthetic point generation shared by the benches in this crate.

use mfc_core::FloatVec;
use mfc_providers_vectors::uniform_points;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Generates `point_count` uniformly distributed `D`-dimensional points from
/// a fixed seed, so every benchmark run compares like datasets.
#[must_use]
pub fn synthetic_points<const D: usize>(point_count: usize, seed: u64) -> Vec<FloatVec<D>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    uniform_points::<D>(&mut rng, point_count)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::synthetic_points;

    #[rstest]
    fn synthetic_points_has_requested_length() {
        let points = synthetic_points::<4>(64, 7);
        assert_eq!(points.len(), 64);
    }

    #[rstest]
    fn synthetic_points_is_deterministic_for_a_fixed_seed() {
        let first = synthetic_points::<4>(32, 11);
        let second = synthetic_points::<4>(32, 11);
        assert_eq!(first, second);
    }
}
