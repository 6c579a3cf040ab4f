//! Error types for suitefix-edit.
//!
//! A missing target is its own variant: the constructor run skips it with a
//! warning while the status-code run treats it as fatal.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// The target file does not exist.
    #[error("file not found: {path}")]
    Missing { path: Utf8PathBuf },

    /// Any other failure reading or writing the target.
    #[error("i/o error on {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    pub fn is_missing(&self) -> bool {
        matches!(self, EditError::Missing { .. })
    }
}

pub type EditResult<T> = Result<T, EditError>;
