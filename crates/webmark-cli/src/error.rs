//! CLI error types.

use std::path::PathBuf;

use config::ConfigError;
use webmark::WebmarkError;
use webmark_package::PackageError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Convert(#[from] WebmarkError),

    #[error("{0}")]
    Package(#[from] PackageError),

    #[error("no element matches selector `{0}`")]
    NoMatch(String),

    #[error("table #{index} not found ({count} tables detected)")]
    NoTable { index: usize, count: usize },
}
