//! Content index errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A read failure that is not plain absence.
///
/// Missing directories and files are reported as empty results, never as an
/// `IndexError`.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read category directory {path:?} (category {category:?})")]
    ReadDir {
        category: Option<String>,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list category {category:?}")]
    Walk {
        category: Option<String>,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read post {category}/{slug} at {path:?}")]
    ReadPost {
        category: String,
        slug: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
