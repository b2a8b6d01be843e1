//! Population mean and standard deviation over a sample.

#![expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "this module's entire purpose is computing floating point summary statistics"
)]

/// Computes `(mean, population standard deviation)` of `values`.
///
/// Divides by `values.len()`, not `values.len() - 1` (population, not
/// sample, variance) — downstream CSV consumers depend on this convention.
///
/// Returns `(0.0, 0.0)` for an empty sample.
#[must_use]
pub fn stats(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / count;

    (mean, variance.sqrt())
}

/// Converts a count (point count, cluster size) to `f64` for statistics and
/// CSV reporting. Counts in this crate never approach `f64`'s exact-integer
/// range, so the conversion is lossless in practice despite the lint.
#[must_use]
pub(crate) fn usize_to_f64(n: usize) -> f64 {
    n as f64
}
