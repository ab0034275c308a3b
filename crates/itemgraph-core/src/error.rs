use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing record collections.
///
/// All of these are fatal to a build.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("required input not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
