//! Wall-clock timing helper shared by every component that reports a
//! millisecond runtime bucket.

use std::time::Instant;

/// Returns the elapsed time since `start`, in fractional milliseconds.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "millisecond timing does not need nanosecond precision preserved as f64"
)]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_nanos() as f64 / 1_000_000.0
}
