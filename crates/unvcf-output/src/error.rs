use std::path::PathBuf;

use unvcf_model::OutputKey;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove empty output {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {key} is already open")]
    AlreadyOpen { key: OutputKey },

    #[error("outputs {holder} and {key} map to the same file {path}")]
    PathCollision {
        key: OutputKey,
        holder: OutputKey,
        path: PathBuf,
    },

    #[error("output {key} was never opened")]
    NotOpen { key: OutputKey },
}

impl OutputError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
