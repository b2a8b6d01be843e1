//! Trial-shape helpers shared by every binary: the default and
//! `cluster_test` cluster-count lists, the single-`N` trial argument type,
//! evaluator construction, and the exit-code mapping for harness failures.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use mfc_core::{Evaluator, HarnessError, HarnessErrorCode, TrialArgs, k_centering, metric_forest_completion};

/// Cluster counts evaluated by every binary's normal-mode run.
pub const DEFAULT_CLUSTER_COUNTS: [usize; 5] = [16, 32, 64, 128, 256];

/// Replicate count used in every binary's normal-mode run.
pub const NORMAL_REPEATS: usize = 16;

/// Replicate count used in `cluster_test` mode.
pub const CLUSTER_TEST_REPEATS: usize = 32;

/// Dataset size used in `cluster_test` mode.
pub const CLUSTER_TEST_N: usize = 20_000;

/// Cluster counts evaluated when `cluster_test` mode is requested: every
/// value in `[2, 150)`.
#[must_use]
pub fn cluster_test_counts() -> Vec<usize> {
    (2..150).collect()
}

/// Trial arguments carrying only the replicate dataset size `N`, shared by
/// every binary in this crate.
#[derive(Clone, Copy, Debug)]
pub struct NArgs {
    /// Number of points drawn (or loaded) for one replicate.
    pub n: usize,
}

impl TrialArgs for NArgs {
    fn headers() -> Vec<String> {
        vec!["N".to_string()]
    }

    fn values(&self) -> Vec<String> {
        vec![self.n.to_string()]
    }
}

/// Total point budget the gaussian sweep divides across clusters in normal
/// mode: `points_per_gauss = GAUSSIAN_SWEEP_N / num_gauss`.
pub const GAUSSIAN_SWEEP_N: usize = 20_000;

/// First `num_gauss` value the gaussian sweep runs in normal mode.
pub const GAUSSIAN_SWEEP_START: usize = 8;

/// Last `num_gauss` value (inclusive) the gaussian sweep runs in normal mode.
pub const GAUSSIAN_SWEEP_END: usize = 300;

/// `num_gauss` used for the gaussian binary's `cluster_test` mode.
pub const GAUSSIAN_CLUSTER_TEST_NUM_GAUSS: usize = 100;

/// `points_per_gauss` used for the gaussian binary's `cluster_test` mode.
pub const GAUSSIAN_CLUSTER_TEST_POINTS_PER_GAUSS: usize = 200;

/// Trial arguments carrying the gaussian dataset shape: how many clusters,
/// and how many points each one contributes.
#[derive(Clone, Copy, Debug)]
pub struct GaussianArgs {
    /// Number of gaussian clusters drawn for one replicate.
    pub num_gauss: usize,
    /// Number of points drawn from each cluster.
    pub points_per_gauss: usize,
}

impl TrialArgs for GaussianArgs {
    fn headers() -> Vec<String> {
        vec!["GaussCount".to_string(), "PointsPerGauss".to_string()]
    }

    fn values(&self) -> Vec<String> {
        vec![self.num_gauss.to_string(), self.points_per_gauss.to_string()]
    }
}

/// Builds one evaluator per cluster count in `counts`, named `"C<count>"`,
/// each running fixed-cluster k-centering followed by MFC approximation.
#[must_use]
pub fn fixed_cluster_evaluators<P, Args>(
    counts: &[usize],
    dist: impl Fn(&P, &P) -> f32 + Sync + Send + Copy + 'static,
) -> Vec<(String, Evaluator<P, Args>)>
where
    P: Send + Sync,
{
    counts
        .iter()
        .map(|&count| {
            let name = format!("C{count}");
            let evaluator: Evaluator<P, Args> = Box::new(move |points: &[P], _args: &Args| {
                let clustering = k_centering(points, count, dist)?;
                let mfc = metric_forest_completion(points, count, clustering.assignments(), dist);
                Ok((clustering, mfc))
            });
            (name, evaluator)
        })
        .collect()
}

/// Runs a single `cluster_test`-mode trial: `CLUSTER_TEST_REPEATS` replicates
/// of `CLUSTER_TEST_N` points each.
///
/// # Errors
///
/// Propagates [`HarnessError`] from the underlying `run_test` call.
pub fn run_cluster_test<P, Args>(
    harness: &mut mfc_core::TestHarness<P, Args>,
    args_for_n: impl Fn(usize) -> Args,
) -> Result<(), HarnessError>
where
    P: Send + Sync,
    Args: TrialArgs + Sync,
{
    harness.run_test(CLUSTER_TEST_REPEATS, &args_for_n(CLUSTER_TEST_N))
}

/// Runs one `run_test` call per `N` in `start..=end` stepping by `step`, the
/// sweep every binary performs in normal mode.
///
/// # Errors
///
/// Propagates [`HarnessError`] from the first failing `run_test` call.
pub fn run_n_sweep<P, Args>(
    harness: &mut mfc_core::TestHarness<P, Args>,
    start: usize,
    end: usize,
    step: usize,
    args_for_n: impl Fn(usize) -> Args,
) -> Result<(), HarnessError>
where
    P: Send + Sync,
    Args: TrialArgs + Sync,
{
    let mut n = start;
    while n <= end {
        harness.run_test(NORMAL_REPEATS, &args_for_n(n))?;
        n += step;
    }
    Ok(())
}

/// Runs the gaussian binary's normal-mode sweep: `num_gauss` from
/// `GAUSSIAN_SWEEP_START` to `GAUSSIAN_SWEEP_END` inclusive, deriving
/// `points_per_gauss` from the fixed total point budget each step.
///
/// # Errors
///
/// Propagates [`HarnessError`] from the first failing `run_test` call.
pub fn run_gaussian_sweep<P>(
    harness: &mut mfc_core::TestHarness<P, GaussianArgs>,
) -> Result<(), HarnessError>
where
    P: Send + Sync,
{
    for num_gauss in GAUSSIAN_SWEEP_START..=GAUSSIAN_SWEEP_END {
        #[expect(
            clippy::integer_division,
            reason = "mirrors the reference driver's truncating split of a fixed point budget across clusters"
        )]
        let points_per_gauss = GAUSSIAN_SWEEP_N / num_gauss;
        harness.run_test(
            NORMAL_REPEATS,
            &GaussianArgs { num_gauss, points_per_gauss },
        )?;
    }
    Ok(())
}

/// Runs the gaussian binary's `cluster_test`-mode trial: fixed `num_gauss`
/// and `points_per_gauss`, at `CLUSTER_TEST_REPEATS` replicates.
///
/// # Errors
///
/// Propagates [`HarnessError`] from the underlying `run_test` call.
pub fn run_gaussian_cluster_test<P>(
    harness: &mut mfc_core::TestHarness<P, GaussianArgs>,
) -> Result<(), HarnessError>
where
    P: Send + Sync,
{
    harness.run_test(
        CLUSTER_TEST_REPEATS,
        &GaussianArgs {
            num_gauss: GAUSSIAN_CLUSTER_TEST_NUM_GAUSS,
            points_per_gauss: GAUSSIAN_CLUSTER_TEST_POINTS_PER_GAUSS,
        },
    )
}

/// Derives a fresh, process-local RNG seed from the current time, matching
/// the reference binaries seeding their random engine from `std::random_device`.
#[must_use]
pub fn random_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low 64 bits of the timestamp are needed to seed a non-cryptographic RNG"
    )]
    let seed = nanos as u64;
    seed
}

/// Maps a harness failure to the exit code policy: evaluator failures are
/// algorithmic precondition violations (exit `2`); dataset generation and
/// I/O failures are treated as input/config problems (exit `1`).
#[must_use]
pub fn harness_error_exit_code(err: &HarnessError) -> ExitCode {
    match err.code() {
        HarnessErrorCode::Evaluator => ExitCode::from(2),
        HarnessErrorCode::DatasetGenerator | HarnessErrorCode::Io => ExitCode::from(1),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "test assertions fail loudly on unexpected errors")]
mod tests {
    use mfc_core::{DatasetGenerator, TestHarness};
    use tempfile::tempdir;

    use mfc_core::HarnessErrorCode;

    use super::{GaussianArgs, NArgs, TrialArgs, fixed_cluster_evaluators, harness_error_exit_code, run_n_sweep};

    fn euclid_2d(a: &(f32, f32), b: &(f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn run_n_sweep_writes_one_summary_row_per_step() {
        let dir = tempdir().expect("tempdir creation never fails in CI sandboxes");
        let summary_path = dir.path().join("summary.csv");
        let all_trials_path = dir.path().join("all_trials.csv");

        let generator: DatasetGenerator<(f32, f32), NArgs> =
            Box::new(|_rng, args: &NArgs| Ok((0..args.n).map(|i| (point(i), point(i))).collect()));

        let evaluators = fixed_cluster_evaluators::<(f32, f32), NArgs>(&[2], euclid_2d);

        let mut harness: TestHarness<(f32, f32), NArgs> = TestHarness::new(
            &summary_path,
            &all_trials_path,
            1,
            false,
            euclid_2d,
            generator,
            evaluators,
        )
        .expect("temp files open for writing");

        run_n_sweep(&mut harness, 4, 8, 2, |n| NArgs { n }).expect("every step has enough points");

        let contents = std::fs::read_to_string(&summary_path).expect("summary file was written");
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn evaluator_exit_code_is_two_for_evaluator_failures() {
        let dir = tempdir().expect("tempdir creation never fails in CI sandboxes");
        let summary_path = dir.path().join("summary.csv");
        let all_trials_path = dir.path().join("all_trials.csv");

        let generator: DatasetGenerator<(f32, f32), NArgs> =
            Box::new(|_rng, args: &NArgs| Ok((0..args.n).map(|i| (point(i), point(i))).collect()));

        let evaluators = fixed_cluster_evaluators::<(f32, f32), NArgs>(&[4], euclid_2d);

        let mut harness: TestHarness<(f32, f32), NArgs> = TestHarness::new(
            &summary_path,
            &all_trials_path,
            1,
            false,
            euclid_2d,
            generator,
            evaluators,
        )
        .expect("temp files open for writing");

        let err = harness
            .run_test(1, &NArgs { n: 2 })
            .expect_err("requesting 4 clusters from 2 points must fail");
        assert_eq!(err.code(), HarnessErrorCode::Evaluator);
        // `ExitCode` has no `PartialEq`; exercise the mapping function directly.
        let _ = harness_error_exit_code(&err);
    }

    #[test]
    fn gaussian_args_reports_its_two_columns_in_order() {
        let args = GaussianArgs { num_gauss: 8, points_per_gauss: 2_500 };
        assert_eq!(GaussianArgs::headers(), vec!["GaussCount", "PointsPerGauss"]);
        assert_eq!(args.values(), vec!["8", "2500"]);
    }

    fn point(i: usize) -> f32 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "small fixture loop index, far below f32's exact-integer range"
        )]
        let value = i as f32;
        value
    }
}
