//! Error taxonomy for loading, composing and persisting a scene
//!
//! Only [`VisError::MissingSource`] is recoverable: loaders raise it and
//! [`crate::core::source::optional`] downgrades it to a skipped contribution.
//! Everything else propagates to the caller and ends the run.

use std::path::PathBuf;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, VisError>;

#[derive(thiserror::Error, Debug)]
pub enum VisError {
    /// An input file does not exist
    #[error("source not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// A record references a rank the palette has no color for
    #[error("rank {rank} out of palette range (palette has {len} colors)")]
    RankOutOfRange { rank: usize, len: usize },

    /// A line could not be turned into a record
    #[error("malformed record in {origin} line {line}: {reason}")]
    MalformedRecord {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("unknown color `{0}`")]
    UnknownColor(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("viewer failed: {0}")]
    Viewer(String),
}

impl VisError {
    /// True for the one condition a run survives
    pub fn is_missing_source(&self) -> bool {
        matches!(self, VisError::MissingSource(_))
    }

    pub(crate) fn malformed(origin: &str, line: usize, reason: impl Into<String>) -> Self {
        VisError::MalformedRecord {
            origin: origin.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VisError::RankOutOfRange { rank: 4, len: 4 };
        assert_eq!(err.to_string(), "rank 4 out of palette range (palette has 4 colors)");

        let err = VisError::malformed("nodes.txt", 3, "expected 5 fields, found 4");
        assert_eq!(
            err.to_string(),
            "malformed record in nodes.txt line 3: expected 5 fields, found 4"
        );

        let err = VisError::MissingSource(PathBuf::from("points_data_rank_2.txt"));
        assert_eq!(err.to_string(), "source not found: points_data_rank_2.txt");
    }

    #[test]
    fn test_only_missing_source_is_recoverable() {
        assert!(VisError::MissingSource(PathBuf::from("x")).is_missing_source());
        assert!(!VisError::RankOutOfRange { rank: 9, len: 4 }.is_missing_source());
        assert!(!VisError::Config("bad".into()).is_missing_source());
    }
}
