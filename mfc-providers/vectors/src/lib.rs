//! Synthetic and HDF5-backed providers of fixed-dimension float vectors.
//!
//! Two dataset sources feed the Euclidean metric: a uniform `[-1, 1)`
//! synthetic generator, and a loader that reinterprets an
//! [`mfc_core::Dataset`] (rows of `f32`s) as `FloatVec<D>` records.

use mfc_core::{Dataset, FloatVec};
use rand::Rng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal, Uniform};
use thiserror::Error;

/// Range each gaussian's per-dimension mean is drawn from.
const MEAN_RANGE: (f32, f32) = (-5.0, 5.0);
/// Range each gaussian's per-dimension standard deviation is drawn from.
const SIGMA_RANGE: (f32, f32) = (0.5, 0.8);

/// Stable codes describing [`VectorProviderError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum VectorProviderErrorCode {
    /// The loaded dataset's column count did not match the requested
    /// dimension.
    DimensionMismatch,
}

impl VectorProviderErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DimensionMismatch => "VECTOR_PROVIDER_DIMENSION_MISMATCH",
        }
    }
}

impl std::fmt::Display for VectorProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced while loading vector records from an [`mfc_core::Dataset`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum VectorProviderError {
    /// The dataset's column count did not match the requested fixed
    /// dimension `D`.
    #[error("dataset has {actual} columns, expected {expected}")]
    DimensionMismatch {
        /// Dimension requested by the caller (the const generic `D`).
        expected: usize,
        /// Column count actually present in the dataset.
        actual: usize,
    },
}

impl VectorProviderError {
    /// Retrieves the stable [`VectorProviderErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> VectorProviderErrorCode {
        match self {
            Self::DimensionMismatch { .. } => VectorProviderErrorCode::DimensionMismatch,
        }
    }
}

/// Generates `n` points drawn independently and uniformly from `[-1, 1)` in
/// every one of `D` dimensions.
#[must_use]
pub fn uniform_points<const D: usize>(rng: &mut SmallRng, n: usize) -> Vec<FloatVec<D>> {
    let mut points = Vec::with_capacity(n);
    for _ in 0..n {
        let mut components = [0.0_f32; D];
        for component in &mut components {
            *component = rng.gen_range(-1.0_f32..1.0_f32);
        }
        points.push(FloatVec::new(components));
    }
    points
}

/// Generates `num_gauss` clusters of `points_per_gauss` points each, every
/// cluster an independent `D`-dimensional isotropic gaussian with a per-axis
/// mean and standard deviation drawn uniformly from a fixed range.
#[must_use]
pub fn gaussian_points<const D: usize>(
    rng: &mut SmallRng,
    num_gauss: usize,
    points_per_gauss: usize,
) -> Vec<FloatVec<D>> {
    let mean_dist = Uniform::new(MEAN_RANGE.0, MEAN_RANGE.1);
    let sigma_dist = Uniform::new(SIGMA_RANGE.0, SIGMA_RANGE.1);

    let mut points = Vec::with_capacity(num_gauss.saturating_mul(points_per_gauss));
    for _ in 0..num_gauss {
        let params: [(f32, f32); D] =
            std::array::from_fn(|_| (mean_dist.sample(rng), sigma_dist.sample(rng)));

        for _ in 0..points_per_gauss {
            let mut components = [0.0_f32; D];
            for (component, &(mean, sigma)) in components.iter_mut().zip(&params) {
                // `sigma` is always drawn strictly positive from `SIGMA_RANGE`, so
                // `Normal::new` only fails in practice for a NaN standard
                // deviation; fall back to the degenerate (zero-variance) point.
                *component = Normal::new(mean, sigma).map_or(mean, |normal| normal.sample(rng));
            }
            points.push(FloatVec::new(components));
        }
    }
    points
}

/// Reinterprets a loaded [`mfc_core::Dataset`] as a vector of `FloatVec<D>`
/// records, one per row.
///
/// # Errors
///
/// Returns [`VectorProviderError::DimensionMismatch`] if the dataset's
/// column count does not equal `D`.
pub fn vectors_from_dataset<const D: usize>(
    dataset: &Dataset,
) -> Result<Vec<FloatVec<D>>, VectorProviderError> {
    if dataset.cols() != D {
        return Err(VectorProviderError::DimensionMismatch {
            expected: D,
            actual: dataset.cols(),
        });
    }

    Ok(dataset
        .values()
        .chunks_exact(D)
        .map(|row| {
            let mut components = [0.0_f32; D];
            components.copy_from_slice(row);
            FloatVec::new(components)
        })
        .collect())
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "test assertions fail loudly on unexpected errors")]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::{Dataset, VectorProviderError, gaussian_points, uniform_points, vectors_from_dataset};

    #[test]
    fn uniform_points_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let points = uniform_points::<4>(&mut rng, 32);
        assert_eq!(points.len(), 32);
        for point in &points {
            for component in point.as_array() {
                assert!(*component >= -1.0 && *component < 1.0);
            }
        }
    }

    #[test]
    fn gaussian_points_has_num_gauss_times_points_per_gauss_rows() {
        let mut rng = SmallRng::seed_from_u64(7);
        let points = gaussian_points::<3>(&mut rng, 4, 10);
        assert_eq!(points.len(), 40);
    }

    #[test]
    fn gaussian_points_stay_finite() {
        let mut rng = SmallRng::seed_from_u64(11);
        let points = gaussian_points::<2>(&mut rng, 3, 20);
        assert_eq!(points.len(), 60);
        for point in &points {
            for component in point.as_array() {
                assert!(component.is_finite());
            }
        }
    }

    #[test]
    fn vectors_from_dataset_reshapes_rows() {
        let dataset = Dataset::from_rows(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let points = vectors_from_dataset::<3>(&dataset).expect("dimensions match");
        assert_eq!(points.len(), 2);
        let first = points.first().expect("two rows were requested");
        let second = points.get(1).expect("two rows were requested");
        assert_eq!(first.as_array(), &[0.0, 1.0, 2.0]);
        assert_eq!(second.as_array(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn vectors_from_dataset_rejects_wrong_dimension() {
        let dataset = Dataset::from_rows(2, 3, vec![0.0; 6]);
        let err = vectors_from_dataset::<4>(&dataset).expect_err("dimensions differ");
        assert!(matches!(err, VectorProviderError::DimensionMismatch { .. }));
    }
}
