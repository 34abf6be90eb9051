//! Canonical error type for cone, interface, mesh, and HBondFinder IO.
//!
//! Readers report failures through a single `Error` enum so the pipeline can bubble them up
//! or turn them into user-facing diagnostics with uniform wording. Stream readers do not know
//! their file path; path-based entry points attach it with [`Error::with_path`].

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing pipeline inputs and outputs.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested input file does not exist.
    #[error("input file '{}' was not found", path.display())]
    NotFound {
        /// Path that could not be opened.
        path: PathBuf,
    },

    /// Wrapper around operating-system level I/O failures.
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        /// Path to the file involved in the failed operation, if any.
        path: Option<PathBuf>,
        /// Underlying error emitted by the standard library.
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be parsed into the expected record.
    ///
    /// Raised for short rows, non-numeric coordinates, and missing key delimiters. Parsing
    /// aborts on the first malformed row; no partial result is returned.
    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        /// Name of the textual format (e.g., `"cone"`, `"SURF"`).
        format: &'static str,
        /// Path to the offending file, if known.
        path: Option<PathBuf>,
        /// One-based line number where parsing failed.
        line_number: usize,
        /// Human-readable description of what went wrong.
        details: String,
    },

    /// Reports logical inconsistencies such as mismatched counts or dangling indices.
    #[error(
        "inconsistent data in {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    InconsistentData {
        /// Name of the textual format being processed.
        format: &'static str,
        /// Related file path when available.
        path: Option<PathBuf>,
        /// Summary of the detected inconsistency.
        details: String,
    },
}

impl Error {
    /// Constructs an [`Error::Io`] variant from a standard I/O error.
    ///
    /// A `NotFound` error with a known path is reported as [`Error::NotFound`].
    ///
    /// # Arguments
    ///
    /// * `source` - The original `std::io::Error` emitted by the OS or runtime.
    /// * `path` - Optional file path associated with the operation.
    ///
    /// # Returns
    ///
    /// A ready-to-use `Error` that preserves the source error for chaining.
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if source.kind() == std::io::ErrorKind::NotFound => {
                Self::NotFound { path }
            }
            path => Self::Io { path, source },
        }
    }

    /// Builds an [`Error::Parse`] variant with consistent messaging.
    ///
    /// # Arguments
    ///
    /// * `format` - Name of the textual format being parsed.
    /// * `path` - Optional path pointing to the input file.
    /// * `line_number` - Line where the failure occurred (1-indexed).
    /// * `details` - Additional context about the parsing problem.
    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    /// Creates an [`Error::InconsistentData`] describing logical mismatches.
    pub fn inconsistent_data(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::InconsistentData {
            format,
            path,
            details: details.into(),
        }
    }

    /// Attaches a file path to an error produced by a stream reader.
    ///
    /// Errors that already carry a path keep it.
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            Self::Io { path: None, source } => Self::from_io(source, Some(file.to_path_buf())),
            Self::Parse {
                format,
                path: None,
                line_number,
                details,
            } => Self::Parse {
                format,
                path: Some(file.to_path_buf()),
                line_number,
                details,
            },
            Self::InconsistentData {
                format,
                path: None,
                details,
            } => Self::InconsistentData {
                format,
                path: Some(file.to_path_buf()),
                details,
            },
            other => other,
        }
    }

    /// Returns `true` for the missing-file variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Lightweight formatter for optional paths used in error messages.
///
/// When a path is present it prints `file '<path>'`; otherwise it emits `stream source` so
/// error messages remain grammatically consistent.
struct PathDisplay<'a>(&'a Option<PathBuf>);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn from_io_maps_missing_file_to_not_found() {
        let err = Error::from_io(
            std::io::Error::from(ErrorKind::NotFound),
            Some(PathBuf::from("half1.cones")),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "input file 'half1.cones' was not found");
    }

    #[test]
    fn from_io_without_path_stays_io() {
        let err = Error::from_io(std::io::Error::from(ErrorKind::NotFound), None);
        assert!(matches!(err, Error::Io { path: None, .. }));
        assert!(err.to_string().starts_with("I/O error for stream source"));
    }

    #[test]
    fn with_path_fills_in_missing_path_only() {
        let err = Error::parse("cone", None, 7, "expected 6 numeric tokens");
        let err = err.with_path(Path::new("a.cones"));
        assert_eq!(
            err.to_string(),
            "failed to parse cone file 'a.cones': expected 6 numeric tokens (line 7)"
        );

        let err = err.with_path(Path::new("b.cones"));
        assert!(err.to_string().contains("a.cones"));
    }

    #[test]
    fn inconsistent_data_message_mentions_format() {
        let err = Error::inconsistent_data("SURF", None, "triangle references vertex 9");
        assert_eq!(
            err.to_string(),
            "inconsistent data in SURF stream source: triangle references vertex 9"
        );
    }
}
