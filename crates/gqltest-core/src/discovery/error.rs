use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering test suites.
///
/// Discovery is all-or-nothing: any of these aborts the build of the whole
/// forest and no partial result is returned.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no suite registered for '{path}'")]
    MissingSuite { path: String },
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }
}
