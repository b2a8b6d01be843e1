//! Levenshtein edit distance benchmark over a line-delimited string corpus.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mfc_core::{DatasetGenerator, TestHarness, random_subset};
use mfc_providers_text::{edit_distance, load_lines};

use mfc_cli::logging;
use mfc_cli::trial::{
    DEFAULT_CLUSTER_COUNTS, NArgs, cluster_test_counts, fixed_cluster_evaluators,
    harness_error_exit_code, random_seed, run_cluster_test,
};

/// Arguments: `<strings file> <out> <all_out> <n> [cluster_test]`.
#[derive(Parser)]
#[command(name = "edit_distance", about = "Levenshtein edit distance benchmark")]
struct Args {
    /// Path to a UTF-8 text file, one string per line.
    strings_file: PathBuf,
    /// Output path for the aggregated summary CSV.
    summary: PathBuf,
    /// Output path for the per-replicate CSV.
    all_trials: PathBuf,
    /// Dataset size for the single trial this binary runs in normal mode.
    n: usize,
    /// When present and equal to `cluster_test`, sweeps cluster counts
    /// `[2, 150)` at a fixed `N` instead of running the single trial above.
    cluster_test: Option<String>,
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        logging::report_init_error(&err);
        return ExitCode::from(1);
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            mfc_cli::report_usage_error(&err);
            return ExitCode::from(1);
        }
    };

    run(&args)
}

fn run(args: &Args) -> ExitCode {
    let dataset = match load_lines(&args.strings_file) {
        Ok(dataset) => dataset,
        Err(err) => {
            mfc_cli::report_provider_error(&err);
            return ExitCode::from(1);
        }
    };

    let cluster_test = args.cluster_test.as_deref() == Some("cluster_test");
    let counts = if cluster_test {
        cluster_test_counts()
    } else {
        DEFAULT_CLUSTER_COUNTS.to_vec()
    };
    let dist = |a: &String, b: &String| edit_distance(a, b);
    let evaluators = fixed_cluster_evaluators::<String, NArgs>(&counts, dist);

    let generator: DatasetGenerator<String, NArgs> = {
        let dataset = dataset.clone();
        Box::new(move |rng, trial_args: &NArgs| Ok(random_subset(dataset.clone(), trial_args.n, rng)))
    };

    let mut harness: TestHarness<String, NArgs> = match TestHarness::new(
        &args.summary,
        &args.all_trials,
        random_seed(),
        true,
        dist,
        generator,
        evaluators,
    ) {
        Ok(harness) => harness,
        Err(err) => return harness_error_exit_code(&err),
    };

    let result = if cluster_test {
        run_cluster_test(&mut harness, |n| NArgs { n })
    } else {
        harness.run_test(mfc_cli::trial::NORMAL_REPEATS, &NArgs { n: args.n })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => harness_error_exit_code(&err),
    }
}
