//! Jaccard distance and a loader for line-delimited integer sets.

use std::{
    collections::BTreeSet,
    fmt,
    io::{self, BufRead},
    num::ParseIntError,
    path::Path,
};

use thiserror::Error;

/// Stable codes describing [`SetProviderError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SetProviderErrorCode {
    /// The input contained no lines.
    EmptyInput,
    /// Reading the input failed.
    Io,
    /// A line contained a non-integer element.
    InvalidElement,
}

impl SetProviderErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "SET_PROVIDER_EMPTY_INPUT",
            Self::Io => "SET_PROVIDER_IO",
            Self::InvalidElement => "SET_PROVIDER_INVALID_ELEMENT",
        }
    }
}

impl fmt::Display for SetProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced while loading integer sets from a line-delimited file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SetProviderError {
    /// The input contained no lines.
    #[error("input contained no lines")]
    EmptyInput,
    /// Reading the input failed.
    #[error("I/O error reading set input: {0}")]
    Io(#[from] io::Error),
    /// A line contained a non-integer element.
    #[error("line {line} contains a non-integer element: {source}")]
    InvalidElement {
        /// One-based line number of the offending line.
        line: usize,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

impl SetProviderError {
    /// Retrieves the stable [`SetProviderErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> SetProviderErrorCode {
        match self {
            Self::EmptyInput => SetProviderErrorCode::EmptyInput,
            Self::Io(_) => SetProviderErrorCode::Io,
            Self::InvalidElement { .. } => SetProviderErrorCode::InvalidElement,
        }
    }
}

/// Loads one comma-separated integer set per line from `path`.
///
/// When `edge_size_filter` is `Some(bound)`, sets with fewer than `bound`
/// elements are discarded rather than returned.
///
/// # Errors
///
/// Returns [`SetProviderError::Io`] if the file cannot be read,
/// [`SetProviderError::InvalidElement`] if a line contains a non-integer
/// element, or [`SetProviderError::EmptyInput`] if the file contains no
/// lines.
pub fn load_sets(
    path: &Path,
    edge_size_filter: Option<usize>,
) -> Result<Vec<BTreeSet<usize>>, SetProviderError> {
    let file = std::fs::File::open(path)?;
    sets_from_reader(io::BufReader::new(file), edge_size_filter)
}

/// Loads one comma-separated integer set per line from `reader`.
///
/// # Errors
///
/// See [`load_sets`].
pub fn sets_from_reader(
    reader: impl BufRead,
    edge_size_filter: Option<usize>,
) -> Result<Vec<BTreeSet<usize>>, SetProviderError> {
    let mut sets = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut set = BTreeSet::new();
        for element in trimmed.split(',') {
            let value: usize =
                element
                    .trim()
                    .parse()
                    .map_err(|source| SetProviderError::InvalidElement {
                        line: index + 1,
                        source,
                    })?;
            set.insert(value);
        }
        if edge_size_filter.is_some_and(|bound| set.len() < bound) {
            continue;
        }
        sets.push(set);
    }
    if sets.is_empty() {
        return Err(SetProviderError::EmptyInput);
    }
    Ok(sets)
}

/// Jaccard distance between two sets: `1 - |intersection| / |union|`.
///
/// The union of two empty sets is defined as distance `1.0` rather than an
/// undefined `0/0` ratio.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "computing the intersection/union ratio is this function's entire purpose"
)]
pub fn jaccard_distance(a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> f32 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "set sizes are small relative to f32's 24-bit mantissa for any in-memory dataset"
    )]
    let ratio = intersection as f32 / union as f32;
    1.0 - ratio
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "test assertions fail loudly on unexpected errors")]
mod tests {
    use std::{collections::BTreeSet, io::Cursor};

    use rstest::rstest;

    use super::{SetProviderError, jaccard_distance, sets_from_reader};

    fn set(values: &[usize]) -> BTreeSet<usize> {
        values.iter().copied().collect()
    }

    #[rstest]
    #[case(&[1, 2, 3], &[2, 3, 4], 0.5)]
    #[case(&[1, 2], &[1, 2], 0.0)]
    #[case(&[1, 2], &[3, 4], 1.0)]
    fn jaccard_distance_matches_known_pairs(
        #[case] left: &[usize],
        #[case] right: &[usize],
        #[case] expected: f32,
    ) {
        let distance = jaccard_distance(&set(left), &set(right));
        assert!((distance - expected).abs() < 1e-6);
    }

    #[test]
    fn jaccard_distance_of_two_empty_sets_is_one() {
        let distance = jaccard_distance(&BTreeSet::new(), &BTreeSet::new());
        assert!((distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sets_from_reader_parses_comma_separated_lines() {
        let sets = sets_from_reader(Cursor::new("1,2,3\n4,5\n"), None).expect("valid input");
        assert_eq!(sets.len(), 2);
        assert_eq!(sets.first(), Some(&set(&[1, 2, 3])));
    }

    #[test]
    fn sets_from_reader_applies_edge_size_filter() {
        let sets =
            sets_from_reader(Cursor::new("1,2,3\n4,5\n"), Some(3)).expect("valid input");
        assert_eq!(sets.len(), 1);
        assert_eq!(sets.first(), Some(&set(&[1, 2, 3])));
    }

    #[test]
    fn sets_from_reader_rejects_non_integer_element() {
        let err = sets_from_reader(Cursor::new("1,x,3\n"), None).expect_err("invalid element");
        assert!(matches!(err, SetProviderError::InvalidElement { line: 1, .. }));
    }

    #[test]
    fn sets_from_reader_rejects_empty_input() {
        let err = sets_from_reader(Cursor::new(""), None).expect_err("input is empty");
        assert!(matches!(err, SetProviderError::EmptyInput));
    }
}
