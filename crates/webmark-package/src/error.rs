//! Error types for the packaging pipeline.

use std::time::Duration;

/// Why a single image could not be downloaded.
///
/// Never escapes [`Packager::create_package`](crate::Packager::create_package):
/// a failed image is counted and its reference left untouched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} did not answer within {after:?}")]
    Timeout { url: String, after: Duration },
}

/// Failures that abort a packaging step as a whole.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackageError>;
