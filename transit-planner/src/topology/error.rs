//! Topology loading error types.

use std::path::PathBuf;

/// Errors that can occur when loading the line/station dataset.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// Dataset file could not be read
    #[error("failed to read topology {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON or lacks the lines array
    #[error("malformed topology document: {message}")]
    Malformed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TopologyError::Malformed {
            message: "missing field `lines`".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed topology document: missing field `lines`"
        );

        let err = TopologyError::Io {
            path: PathBuf::from("data/lines.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("failed to read topology data/lines.json"));
    }
}
