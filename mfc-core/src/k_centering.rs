//! Farthest-point traversal: a 2-approximation of the metric k-center
//! problem, used as the clustering primitive the MFC engine partitions on.

#![expect(
    clippy::indexing_slicing,
    reason = "every index used here is a point or centre index produced earlier in the same \
              traversal and is in range by construction"
)]

use std::time::Instant;

use crate::{error::KCenteringError, timing::elapsed_ms};

/// A clustering of `n` points into `k` groups.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    assignments: Vec<usize>,
    runtime_ms: f64,
}

impl Clustering {
    /// Returns the cluster id assigned to each point, in input order.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Returns the wall-clock time spent producing the assignment, in
    /// milliseconds.
    #[must_use]
    pub const fn runtime_ms(&self) -> f64 {
        self.runtime_ms
    }
}

/// Runs farthest-point k-centering with the default seed index `n / 2`.
///
/// # Errors
///
/// Returns [`KCenteringError::NotEnoughPoints`] if `points.len() < k`.
pub fn k_centering<P>(
    points: &[P],
    k: usize,
    dist: impl Fn(&P, &P) -> f32 + Sync,
) -> Result<Clustering, KCenteringError> {
    k_centering_from_seed(points, k, points.len() / 2, dist)
}

/// Runs farthest-point k-centering starting from an explicit seed index.
///
/// Selects `k` centers by repeatedly choosing the point with the greatest
/// distance to its nearest already-chosen center, then assigns every point
/// to its nearest center (ties broken by lowest center id).
///
/// The next-center search at each step re-derives the candidate at index 0
/// from the most recently added center rather than reusing the running
/// minimum computed for every other point. This mirrors a harmless asymmetry
/// in the traversal this was ported from: position 0's entry in the running
/// distance profile is recomputed, not reused, before the scan begins. It
/// never changes which point is chosen because a freshly computed distance
/// is also the correct minimum-so-far value for that point.
///
/// # Errors
///
/// Returns [`KCenteringError::NotEnoughPoints`] if `points.len() < k`.
pub fn k_centering_from_seed<P>(
    points: &[P],
    k: usize,
    seed_index: usize,
    dist: impl Fn(&P, &P) -> f32 + Sync,
) -> Result<Clustering, KCenteringError> {
    let start = Instant::now();
    let n = points.len();

    if n < k {
        return Err(KCenteringError::NotEnoughPoints { n, k });
    }

    if k <= 1 {
        return Ok(Clustering {
            assignments: vec![0; n],
            runtime_ms: elapsed_ms(start),
        });
    }

    let mut centers = vec![seed_index];

    let mut running_min: Vec<f32> = points.iter().map(|p| dist(p, &points[seed_index])).collect();

    let mut second = 0_usize;
    let mut second_dist = running_min[0];
    for (i, &d) in running_min.iter().enumerate() {
        if d > second_dist {
            second_dist = d;
            second = i;
        }
    }
    centers.push(second);

    let mut last_center = second;
    while centers.len() < k {
        let mut next_index = 0_usize;
        let mut next_dist = dist(&points[0], &points[last_center]).min(running_min[0]);
        running_min[0] = next_dist;

        for i in 1..n {
            let d = dist(&points[i], &points[last_center]);
            if d < running_min[i] {
                running_min[i] = d;
            }
            if running_min[i] > next_dist {
                next_dist = running_min[i];
                next_index = i;
            }
        }

        centers.push(next_index);
        last_center = next_index;
    }

    let assignments = points
        .iter()
        .map(|p| {
            let mut best = 0_usize;
            let mut best_dist = dist(p, &points[centers[0]]);
            for (idx, &c) in centers.iter().enumerate().skip(1) {
                let d = dist(p, &points[c]);
                if d < best_dist {
                    best_dist = d;
                    best = idx;
                }
            }
            best
        })
        .collect();

    Ok(Clustering {
        assignments,
        runtime_ms: elapsed_ms(start),
    })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "test assertions fail loudly on unexpected errors")]
mod tests {
    use super::{KCenteringError, k_centering, k_centering_from_seed};

    fn euclid_2d(a: &(f32, f32), b: &(f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn fewer_points_than_k_is_an_error() {
        let points = [(0.0_f32, 0.0_f32), (1.0, 1.0)];
        let err = k_centering(&points, 3, euclid_2d).unwrap_err();
        assert_eq!(err, KCenteringError::NotEnoughPoints { n: 2, k: 3 });
    }

    #[test]
    fn k_of_one_assigns_everything_to_cluster_zero() {
        let points = [(0.0_f32, 0.0_f32), (0.0, 0.0), (0.0, 0.0)];
        let clustering = k_centering(&points, 1, euclid_2d).expect("k=1 never fails");
        assert_eq!(clustering.assignments(), &[0, 0, 0]);
    }

    #[test]
    fn square_with_two_centers_groups_by_nearest_corner() {
        let points = [
            (0.0_f32, 0.0_f32),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ];
        let clustering =
            k_centering_from_seed(&points, 2, 0, euclid_2d).expect("four points, k=2, seed 0");
        assert_eq!(clustering.assignments(), &[0, 0, 1, 1]);
    }
}
