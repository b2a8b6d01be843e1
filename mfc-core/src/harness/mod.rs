//! The replicate test harness: generates datasets, runs one or more named
//! evaluators against each, and writes two CSV-shaped output streams —
//! `all_trials` (one row per replicate) and `summary` (one aggregated row
//! per [`TestHarness::run_test`] call).
//!
//! Fields are joined with `", "` rather than a bare comma, matching the
//! fixed column schema this harness reproduces; this is not a
//! general-purpose CSV writer and performs no quoting or escaping, since
//! every field is a plain number or identifier.

mod replicate;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use rand::{SeedableRng, rngs::SmallRng};
use rayon::prelude::*;

use crate::{error::HarnessError, k_centering::Clustering, mfc::MetricForestCompletion, stats::stats};

pub use replicate::{EvaluatorTrial, ReplicateResult};

/// Describes how a harness's extra per-trial parameters (`Args`) render as
/// CSV columns.
pub trait TrialArgs {
    /// Column header labels, in the order [`TrialArgs::values`] emits them.
    #[must_use]
    fn headers() -> Vec<String>;

    /// This parameter set's values, in the same order as
    /// [`TrialArgs::headers`].
    #[must_use]
    fn values(&self) -> Vec<String>;
}

/// A seeded dataset generator: produces one replicate's point set from the
/// harness's owned RNG and the trial's extra arguments.
pub type DatasetGenerator<P, Args> = Box<
    dyn FnMut(&mut SmallRng, &Args) -> Result<Vec<P>, Box<dyn std::error::Error + Send + Sync>>
        + Send,
>;

/// A named pipeline from a point set and trial arguments to a clustering and
/// its MFC approximation, typically `k_centering` followed by
/// `metric_forest_completion` with a fixed cluster count. Fallible because
/// `k_centering` rejects a cluster count greater than the point count; a
/// failure here surfaces as [`crate::error::HarnessError`]'s `Evaluator`
/// variant.
pub type Evaluator<P, Args> = Box<
    dyn Fn(&[P], &Args) -> Result<(Clustering, MetricForestCompletion), Box<dyn std::error::Error + Send + Sync>>
        + Sync
        + Send,
>;

/// Runs repeated trials of one or more evaluators against freshly generated
/// datasets, recording a per-replicate CSV row and one aggregate summary row
/// per [`TestHarness::run_test`] call.
pub struct TestHarness<P, Args> {
    summary: BufWriter<File>,
    summary_path: PathBuf,
    all_trials: BufWriter<File>,
    all_trials_path: PathBuf,
    evaluator_names: Vec<String>,
    dist: Box<dyn Fn(&P, &P) -> f32 + Sync + Send>,
    dataset_generator: DatasetGenerator<P, Args>,
    evaluators: Vec<(String, Evaluator<P, Args>)>,
    rng: SmallRng,
    parallel: bool,
}

impl<P, Args> TestHarness<P, Args>
where
    P: Send + Sync,
    Args: TrialArgs + Sync,
{
    /// Opens `summary_path` and `all_trials_path` for writing, writes both
    /// CSV headers immediately, and returns a harness ready for
    /// [`TestHarness::run_test`].
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if either path cannot be created or its
    /// header cannot be written.
    pub fn new(
        summary_path: &Path,
        all_trials_path: &Path,
        seed: u64,
        parallel: bool,
        dist: impl Fn(&P, &P) -> f32 + Sync + Send + 'static,
        dataset_generator: DatasetGenerator<P, Args>,
        evaluators: Vec<(String, Evaluator<P, Args>)>,
    ) -> Result<Self, HarnessError> {
        let summary_file = create_file(summary_path)?;
        let all_trials_file = create_file(all_trials_path)?;

        let mut summary = BufWriter::new(summary_file);
        let mut all_trials = BufWriter::new(all_trials_file);

        let evaluator_names: Vec<String> =
            evaluators.iter().map(|(name, _)| name.clone()).collect();

        write_line(
            &mut summary,
            summary_path,
            &summary_header(&Args::headers(), &evaluator_names),
        )?;
        write_line(
            &mut all_trials,
            all_trials_path,
            &all_trials_header(&Args::headers(), &evaluator_names),
        )?;

        Ok(Self {
            summary,
            summary_path: summary_path.to_path_buf(),
            all_trials,
            all_trials_path: all_trials_path.to_path_buf(),
            evaluator_names,
            dist: Box::new(dist),
            dataset_generator,
            evaluators,
            rng: SmallRng::seed_from_u64(seed),
            parallel,
        })
    }

    /// Generates `repeats` datasets sequentially from the harness's own RNG,
    /// runs one replicate per dataset (in parallel when this harness was
    /// constructed with `parallel = true`), appends one `all_trials` row per
    /// replicate, then appends one aggregated `summary` row.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DatasetGenerator`] if dataset generation
    /// fails — no replicates run in that case — [`HarnessError::Evaluator`]
    /// if an evaluator fails for some replicate, or [`HarnessError::Io`] if a
    /// row cannot be written.
    pub fn run_test(&mut self, repeats: usize, args: &Args) -> Result<(), HarnessError> {
        let mut datasets = Vec::with_capacity(repeats);
        for _ in 0..repeats {
            let points = (self.dataset_generator)(&mut self.rng, args)
                .map_err(HarnessError::DatasetGenerator)?;
            datasets.push(points);
        }

        let dist = &self.dist;
        let evaluators = &self.evaluators;
        let results: Vec<ReplicateResult> = if self.parallel {
            datasets
                .into_par_iter()
                .map(|points| replicate::run_replicate(&points, args, dist, evaluators))
                .collect::<Result<_, _>>()
                .map_err(HarnessError::Evaluator)?
        } else {
            datasets
                .into_iter()
                .map(|points| replicate::run_replicate(&points, args, dist, evaluators))
                .collect::<Result<_, _>>()
                .map_err(HarnessError::Evaluator)?
        };

        for result in &results {
            let row = all_trials_row(args, result);
            write_line(&mut self.all_trials, &self.all_trials_path, &row)?;
        }

        let row = summary_row(args, &self.evaluator_names, &results);
        write_line(&mut self.summary, &self.summary_path, &row)?;

        Ok(())
    }
}

fn create_file(path: &Path) -> Result<File, HarnessError> {
    File::create(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_line(
    writer: &mut BufWriter<File>,
    path: &Path,
    fields: &[String],
) -> Result<(), HarnessError> {
    let line = fields.join(", ");
    writeln!(writer, "{line}")
        .and_then(|()| writer.flush())
        .map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn format_f64(value: f64) -> String {
    format!("{value}")
}

const SUMMARY_METRIC_SUFFIXES: [&str; 18] = [
    "MFC_Cost_mu",
    "MFC_Cost_sigma",
    "MFC_Runtime_mu",
    "MFC_Runtime_sigma",
    "Gamma_mu",
    "Gamma_sigma",
    "Cluster_Size_Mu_mu",
    "Cluster_Size_Mu_sigma",
    "Cluster_Size_Sigma_mu",
    "Cluster_Size_Sigma_sigma",
    "Sub_Clustering_Runtime_mu",
    "Sub_Clustering_Runtime_sigma",
    "Completion_Edges_Runtime_mu",
    "Completion_Edges_Runtime_sigma",
    "Completion_Runtime_mu",
    "Completion_Runtime_sigma",
    "Clustering_Runtime_mu",
    "Clustering_Runtime_sigma",
];

const ALL_TRIALS_METRIC_SUFFIXES: [&str; 9] = [
    "MFC_Cost",
    "MFC_Runtime",
    "Gamma",
    "Cluster_Size_Mu",
    "Cluster_Size_Sigma",
    "Sub_Clustering_Runtime",
    "Completion_Edges_Runtime",
    "Completion_Runtime",
    "Clustering_Runtime",
];

fn summary_header(args_headers: &[String], evaluator_names: &[String]) -> Vec<String> {
    let mut headers = vec!["N_mu".to_string(), "N_sigma".to_string()];
    headers.extend(args_headers.iter().cloned());
    headers.extend(
        ["MST_Cost_mu", "MST_Cost_sigma", "MST_Runtime_mu", "MST_Runtime_sigma"]
            .map(String::from),
    );
    for name in evaluator_names {
        for suffix in SUMMARY_METRIC_SUFFIXES {
            headers.push(format!("{name}_{suffix}"));
        }
    }
    headers
}

fn all_trials_header(args_headers: &[String], evaluator_names: &[String]) -> Vec<String> {
    let mut headers = vec!["N".to_string()];
    headers.extend(args_headers.iter().cloned());
    headers.extend(["MST_Cost", "MST_Runtime"].map(String::from));
    for name in evaluator_names {
        for suffix in ALL_TRIALS_METRIC_SUFFIXES {
            headers.push(format!("{name}_{suffix}"));
        }
    }
    headers
}

fn all_trials_row<Args: TrialArgs>(args: &Args, result: &ReplicateResult) -> Vec<String> {
    let mut row = vec![result.point_count().to_string()];
    row.extend(args.values());
    row.push(format_f64(result.mst_cost()));
    row.push(format_f64(result.mst_runtime_ms()));

    for trial in result.evaluators() {
        row.push(format_f64(trial.mfc_cost()));
        row.push(format_f64(trial.mfc_runtime_ms()));
        row.push(format_f64(trial.gamma()));
        row.push(format_f64(trial.cluster_size_mu()));
        row.push(format_f64(trial.cluster_size_sigma()));
        row.push(format_f64(trial.sub_cluster_runtime_ms()));
        row.push(format_f64(trial.completion_edges_runtime_ms()));
        row.push(format_f64(trial.completion_runtime_ms()));
        row.push(format_f64(trial.clustering_runtime_ms()));
    }

    row
}

fn push_stat(row: &mut Vec<String>, values: &[f64]) {
    let (mu, sigma) = stats(values);
    row.push(format_f64(mu));
    row.push(format_f64(sigma));
}

fn summary_row<Args: TrialArgs>(
    args: &Args,
    evaluator_names: &[String],
    results: &[ReplicateResult],
) -> Vec<String> {
    let point_counts: Vec<f64> = results.iter().map(ReplicateResult::point_count_f64).collect();
    let mut row = Vec::new();
    push_stat(&mut row, &point_counts);
    row.extend(args.values());

    let mst_costs: Vec<f64> = results.iter().map(ReplicateResult::mst_cost).collect();
    push_stat(&mut row, &mst_costs);
    let mst_runtimes: Vec<f64> = results.iter().map(ReplicateResult::mst_runtime_ms).collect();
    push_stat(&mut row, &mst_runtimes);

    for name in evaluator_names {
        let trials: Vec<&EvaluatorTrial> = results
            .iter()
            .filter_map(|r| r.evaluators().iter().find(|t| t.name() == name))
            .collect();

        push_stat(&mut row, &trials.iter().map(|t| t.mfc_cost()).collect::<Vec<_>>());
        push_stat(&mut row, &trials.iter().map(|t| t.mfc_runtime_ms()).collect::<Vec<_>>());
        push_stat(&mut row, &trials.iter().map(|t| t.gamma()).collect::<Vec<_>>());
        push_stat(&mut row, &trials.iter().map(|t| t.cluster_size_mu()).collect::<Vec<_>>());
        push_stat(&mut row, &trials.iter().map(|t| t.cluster_size_sigma()).collect::<Vec<_>>());
        push_stat(
            &mut row,
            &trials.iter().map(|t| t.sub_cluster_runtime_ms()).collect::<Vec<_>>(),
        );
        push_stat(
            &mut row,
            &trials.iter().map(|t| t.completion_edges_runtime_ms()).collect::<Vec<_>>(),
        );
        push_stat(&mut row, &trials.iter().map(|t| t.completion_runtime_ms()).collect::<Vec<_>>());
        push_stat(
            &mut row,
            &trials.iter().map(|t| t.clustering_runtime_ms()).collect::<Vec<_>>(),
        );
    }

    row
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::tempdir;

    use super::{DatasetGenerator, Evaluator, TestHarness, TrialArgs};
    use crate::{k_centering::k_centering_from_seed, mfc::metric_forest_completion};

    #[derive(Clone, Copy)]
    struct PointCountArgs {
        n: usize,
    }

    impl TrialArgs for PointCountArgs {
        fn headers() -> Vec<String> {
            vec!["N_arg".to_string()]
        }

        fn values(&self) -> Vec<String> {
            vec![self.n.to_string()]
        }
    }

    fn euclid_2d(a: &(f32, f32), b: &(f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn two_replicates_write_header_plus_two_rows_and_one_summary_row() {
        let dir = tempdir().expect("tempdir creation never fails in CI sandboxes");
        let summary_path = dir.path().join("summary.csv");
        let all_trials_path = dir.path().join("all_trials.csv");

        let generator: DatasetGenerator<(f32, f32), PointCountArgs> =
            Box::new(|_rng, args: &PointCountArgs| {
                Ok((0..args.n).map(|i| (f64_index(i), f64_index(i))).collect())
            });

        let evaluator: Evaluator<(f32, f32), PointCountArgs> =
            Box::new(|points: &[(f32, f32)], _args: &PointCountArgs| {
                let clustering = k_centering_from_seed(points, 2, 0, euclid_2d)?;
                let mfc =
                    metric_forest_completion(points, 2, clustering.assignments(), euclid_2d);
                Ok((clustering, mfc))
            });

        let mut harness: TestHarness<(f32, f32), PointCountArgs> = TestHarness::new(
            &summary_path,
            &all_trials_path,
            7,
            false,
            euclid_2d,
            generator,
            vec![("C2".to_string(), evaluator)],
        )
        .expect("temp files open for writing");

        harness
            .run_test(2, &PointCountArgs { n: 6 })
            .expect("replicate generation and evaluation never fails in this fixture");

        let all_trials_contents = read_to_string(&all_trials_path);
        let summary_contents = read_to_string(&summary_path);

        assert_eq!(all_trials_contents.lines().count(), 3);
        assert_eq!(summary_contents.lines().count(), 2);
    }

    fn f64_index(i: usize) -> f32 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "small fixture loop index, far below f32's exact-integer range"
        )]
        let value = i as f32;
        value
    }

    fn read_to_string(path: &std::path::Path) -> String {
        let mut contents = String::new();
        std::fs::File::open(path)
            .expect("harness creates this file")
            .read_to_string(&mut contents)
            .expect("harness writes valid UTF-8");
        contents
    }
}
