//! Text-backed metrics and loaders: Levenshtein edit distance and Hamming
//! distance over line-delimited string files.

use std::{
    fmt,
    io::{self, BufRead},
    path::Path,
};

use thiserror::Error;

/// Stable codes describing [`TextProviderError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TextProviderErrorCode {
    /// The input contained no lines.
    EmptyInput,
    /// Reading the input failed.
    Io,
    /// Hamming distance was requested between strings of different lengths.
    HammingLengthMismatch,
}

impl TextProviderErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "TEXT_PROVIDER_EMPTY_INPUT",
            Self::Io => "TEXT_PROVIDER_IO",
            Self::HammingLengthMismatch => "TEXT_PROVIDER_HAMMING_LENGTH_MISMATCH",
        }
    }
}

impl fmt::Display for TextProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced while loading strings or computing a text metric.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TextProviderError {
    /// The input contained no lines.
    #[error("input contained no lines")]
    EmptyInput,
    /// Reading the input failed.
    #[error("I/O error reading text input: {0}")]
    Io(#[from] io::Error),
    /// Hamming distance was requested between strings of different lengths.
    #[error("hamming distance requires equal-length strings, got {left} and {right}")]
    HammingLengthMismatch {
        /// Length of the first string.
        left: usize,
        /// Length of the second string.
        right: usize,
    },
}

impl TextProviderError {
    /// Retrieves the stable [`TextProviderErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> TextProviderErrorCode {
        match self {
            Self::EmptyInput => TextProviderErrorCode::EmptyInput,
            Self::Io(_) => TextProviderErrorCode::Io,
            Self::HammingLengthMismatch { .. } => TextProviderErrorCode::HammingLengthMismatch,
        }
    }
}

/// Loads one string per line from `path`.
///
/// # Errors
///
/// Returns [`TextProviderError::Io`] if the file cannot be read, or
/// [`TextProviderError::EmptyInput`] if it contains no lines.
pub fn load_lines(path: &Path) -> Result<Vec<String>, TextProviderError> {
    let file = std::fs::File::open(path)?;
    lines_from_reader(io::BufReader::new(file))
}

/// Loads one string per line from `reader`, trimming trailing `\n`/`\r\n`.
///
/// # Errors
///
/// Returns [`TextProviderError::Io`] if a read fails, or
/// [`TextProviderError::EmptyInput`] if the input contains no lines.
pub fn lines_from_reader(mut reader: impl BufRead) -> Result<Vec<String>, TextProviderError> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        lines.push(line);
    }
    if lines.is_empty() {
        return Err(TextProviderError::EmptyInput);
    }
    Ok(lines)
}

/// Levenshtein edit distance between two strings: the minimum number of
/// single-character insertions, deletions, or substitutions turning `a`
/// into `b`.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "edit distances are small relative to f32's 24-bit mantissa for any in-memory dataset"
)]
pub fn edit_distance(a: &str, b: &str) -> f32 {
    strsim::levenshtein(a, b) as f32
}

/// Hamming distance between two equal-length strings: the count of
/// differing character positions.
///
/// # Errors
///
/// Returns [`TextProviderError::HammingLengthMismatch`] if `a` and `b`
/// differ in length, a documented deviation from the reference
/// implementation's abort-on-mismatch behaviour.
#[expect(
    clippy::cast_precision_loss,
    reason = "hamming distances are small relative to f32's 24-bit mantissa for any in-memory dataset"
)]
pub fn hamming_distance(a: &str, b: &str) -> Result<f32, TextProviderError> {
    strsim::hamming(a, b)
        .map(|d| d as f32)
        .map_err(|_| TextProviderError::HammingLengthMismatch {
            left: a.chars().count(),
            right: b.chars().count(),
        })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "test assertions fail loudly on unexpected errors")]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::{TextProviderError, edit_distance, hamming_distance, lines_from_reader};

    #[rstest]
    #[case("kitten", "sitting", 3.0)]
    #[case("gumbo", "gambol", 2.0)]
    #[case("", "", 0.0)]
    fn edit_distance_matches_known_pairs(#[case] left: &str, #[case] right: &str, #[case] expected: f32) {
        assert_eq!(edit_distance(left, right), expected);
        assert_eq!(edit_distance(right, left), expected);
    }

    #[rstest]
    #[case("karolin", "kathrin", 3.0)]
    #[case("abc", "abc", 0.0)]
    fn hamming_distance_matches_known_pairs(#[case] left: &str, #[case] right: &str, #[case] expected: f32) {
        let distance = hamming_distance(left, right).expect("equal-length inputs");
        assert_eq!(distance, expected);
    }

    #[test]
    fn hamming_distance_rejects_length_mismatch() {
        let err = hamming_distance("abc", "ab").expect_err("lengths differ");
        assert!(matches!(
            err,
            TextProviderError::HammingLengthMismatch { left: 3, right: 2 }
        ));
    }

    #[rstest]
    #[case("alpha\nbeta\n", &["alpha", "beta"])]
    #[case("carriage\r\nreturn\r\n", &["carriage", "return"])]
    #[case("lonely", &["lonely"])]
    fn lines_from_reader_trims_newlines(#[case] raw: &str, #[case] expected: &[&str]) {
        let lines = lines_from_reader(Cursor::new(raw)).expect("reader has lines");
        assert_eq!(lines, expected);
    }

    #[test]
    fn lines_from_reader_rejects_empty_input() {
        let err = lines_from_reader(Cursor::new("")).expect_err("input is empty");
        assert!(matches!(err, TextProviderError::EmptyInput));
    }
}
