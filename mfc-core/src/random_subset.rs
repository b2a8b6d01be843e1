//! Random subset selection without replacement.

use rand::Rng;

/// Selects a random subset of size `min(n, vec.len())` without replacement,
/// using partial Fisher-Yates: only the first `n` positions are ever swapped,
/// so the cost is `O(n)` rather than `O(vec.len())`.
///
/// <https://en.wikipedia.org/wiki/Fisher%E2%80%93Yates_shuffle>
#[must_use]
pub fn random_subset<T, R>(mut vec: Vec<T>, n: usize, random: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let n = n.min(vec.len());

    for i in 0..n {
        let j = random.gen_range(i..vec.len());
        vec.swap(i, j);
    }

    vec.truncate(n);
    vec
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::random_subset;

    #[test]
    fn clamps_to_available_length() {
        let mut rng = SmallRng::seed_from_u64(1);
        let subset = random_subset(vec![1, 2, 3], 10, &mut rng);
        assert_eq!(subset.len(), 3);
    }

    #[test]
    fn returns_requested_length() {
        let mut rng = SmallRng::seed_from_u64(1);
        let subset = random_subset((0..100).collect::<Vec<_>>(), 7, &mut rng);
        assert_eq!(subset.len(), 7);
    }

    #[test]
    fn every_element_is_unique_and_from_source() {
        let mut rng = SmallRng::seed_from_u64(42);
        let subset = random_subset((0..20).collect::<Vec<_>>(), 5, &mut rng);
        let mut sorted = subset.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), subset.len());
        assert!(subset.iter().all(|v| (0..20).contains(v)));
    }
}
