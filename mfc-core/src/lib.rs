//! Metric Forest Completion core library: an exact-MST-inside-clusters
//! approximation algorithm, its farthest-point clustering primitive, and the
//! replicate test harness used to evaluate it.

mod error;
mod harness;
mod hdf5;
mod index;
mod k_centering;
mod mfc;
mod mst;
mod mst_implicit;
mod random_subset;
mod stats;
mod timing;
mod vec;

pub use crate::{
    error::{
        Hdf5Error, Hdf5ErrorCode, HarnessError, HarnessErrorCode, KCenteringError,
        KCenteringErrorCode,
    },
    harness::{DatasetGenerator, Evaluator, EvaluatorTrial, ReplicateResult, TestHarness, TrialArgs},
    hdf5::{Dataset, read_dataset},
    index::{GlobalIndex, LocalIndex},
    k_centering::{Clustering, k_centering, k_centering_from_seed},
    mfc::{MetricForestCompletion, metric_forest_completion},
    mst::{MinimumSpanningForest, WeightedEdge, array_coloured_mst},
    mst_implicit::mst_implicit,
    random_subset::random_subset,
    stats::stats,
    vec::{FloatVec, euclidean_distance},
};
