//! Error types for the metric forest completion core library.
//!
//! Each public error enum carries a companion `*ErrorCode` enum exposing a
//! stable, machine-readable identifier, independent of the `Display` message.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Stable codes describing [`KCenteringError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum KCenteringErrorCode {
    /// Fewer points were supplied than the requested number of centers.
    NotEnoughPoints,
}

impl KCenteringErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotEnoughPoints => "K_CENTERING_NOT_ENOUGH_POINTS",
        }
    }
}

impl fmt::Display for KCenteringErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by the k-centering clustering primitive.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum KCenteringError {
    /// Fewer points were supplied than the requested number of centers.
    #[error("cannot select {k} centers from only {n} points")]
    NotEnoughPoints {
        /// Number of points supplied.
        n: usize,
        /// Number of centers requested.
        k: usize,
    },
}

impl KCenteringError {
    /// Retrieves the stable [`KCenteringErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> KCenteringErrorCode {
        match self {
            Self::NotEnoughPoints { .. } => KCenteringErrorCode::NotEnoughPoints,
        }
    }
}

/// Stable codes describing [`Hdf5Error`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Hdf5ErrorCode {
    /// Underlying I/O failed.
    Io,
    /// The file signature did not match the HDF5 magic bytes.
    BadSignature,
    /// The superblock version, offset size, or length size is unsupported.
    UnsupportedSuperblock,
    /// The named dataset does not exist in the root group.
    DatasetNotFound,
    /// The dataspace message described an unsupported shape.
    UnsupportedDataspace,
    /// The datatype message described an unsupported type.
    UnsupportedDatatype,
    /// The data layout message described an unsupported (non-contiguous) layout.
    UnsupportedLayout,
    /// A structure (object header, heap, or b-tree node) had a bad signature
    /// or ran past the end of the file.
    Malformed,
}

impl Hdf5ErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "HDF5_IO",
            Self::BadSignature => "HDF5_BAD_SIGNATURE",
            Self::UnsupportedSuperblock => "HDF5_UNSUPPORTED_SUPERBLOCK",
            Self::DatasetNotFound => "HDF5_DATASET_NOT_FOUND",
            Self::UnsupportedDataspace => "HDF5_UNSUPPORTED_DATASPACE",
            Self::UnsupportedDatatype => "HDF5_UNSUPPORTED_DATATYPE",
            Self::UnsupportedLayout => "HDF5_UNSUPPORTED_LAYOUT",
            Self::Malformed => "HDF5_MALFORMED",
        }
    }
}

impl fmt::Display for Hdf5ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced while reading the minimal HDF5 subset this crate supports.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Hdf5Error {
    /// Underlying I/O failed.
    #[error("I/O error reading HDF5 file: {0}")]
    Io(#[from] io::Error),
    /// The file signature did not match the HDF5 magic bytes.
    #[error("not an HDF5 file (bad signature)")]
    BadSignature,
    /// The superblock version, offset size, or length size is unsupported.
    #[error("unsupported superblock: {reason}")]
    UnsupportedSuperblock {
        /// Human-readable detail of which field was unsupported.
        reason: &'static str,
    },
    /// The named dataset does not exist in the root group.
    #[error("dataset '{name}' not found")]
    DatasetNotFound {
        /// The dataset name that was requested.
        name: String,
    },
    /// The dataspace message described an unsupported shape.
    #[error("unsupported dataspace: {reason}")]
    UnsupportedDataspace {
        /// Human-readable detail.
        reason: &'static str,
    },
    /// The datatype message described an unsupported type.
    #[error("unsupported datatype: {reason}")]
    UnsupportedDatatype {
        /// Human-readable detail.
        reason: &'static str,
    },
    /// The data layout message described an unsupported (non-contiguous) layout.
    #[error("unsupported data layout: {reason}")]
    UnsupportedLayout {
        /// Human-readable detail.
        reason: &'static str,
    },
    /// A structure had a bad signature or ran past the end of the file.
    #[error("malformed HDF5 structure: {reason}")]
    Malformed {
        /// Human-readable detail of what was malformed.
        reason: &'static str,
    },
}

impl Hdf5Error {
    /// Retrieves the stable [`Hdf5ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> Hdf5ErrorCode {
        match self {
            Self::Io(_) => Hdf5ErrorCode::Io,
            Self::BadSignature => Hdf5ErrorCode::BadSignature,
            Self::UnsupportedSuperblock { .. } => Hdf5ErrorCode::UnsupportedSuperblock,
            Self::DatasetNotFound { .. } => Hdf5ErrorCode::DatasetNotFound,
            Self::UnsupportedDataspace { .. } => Hdf5ErrorCode::UnsupportedDataspace,
            Self::UnsupportedDatatype { .. } => Hdf5ErrorCode::UnsupportedDatatype,
            Self::UnsupportedLayout { .. } => Hdf5ErrorCode::UnsupportedLayout,
            Self::Malformed { .. } => Hdf5ErrorCode::Malformed,
        }
    }
}

/// Stable codes describing [`HarnessError`] variants, independent of the
/// dataset generator's own error type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum HarnessErrorCode {
    /// The dataset generator returned an error.
    DatasetGenerator,
    /// An output stream could not be opened, written, or flushed.
    Io,
    /// An evaluator returned an error for some replicate.
    Evaluator,
}

impl HarnessErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DatasetGenerator => "HARNESS_DATASET_GENERATOR_FAILED",
            Self::Io => "HARNESS_IO_FAILED",
            Self::Evaluator => "HARNESS_EVALUATOR_FAILED",
        }
    }
}

impl fmt::Display for HarnessErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by the replicate test harness.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The dataset generator returned an error; no replicates were run.
    #[error("dataset generator failed: {0}")]
    DatasetGenerator(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// An output stream could not be opened, written, or flushed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path of the output stream involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An evaluator returned an error for some replicate; no further
    /// replicates in that batch were run.
    #[error("evaluator failed: {0}")]
    Evaluator(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HarnessError {
    /// Retrieves the stable [`HarnessErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> HarnessErrorCode {
        match self {
            Self::DatasetGenerator(_) => HarnessErrorCode::DatasetGenerator,
            Self::Io { .. } => HarnessErrorCode::Io,
            Self::Evaluator(_) => HarnessErrorCode::Evaluator,
        }
    }
}
