//! The env-file importer boundary.
//!
//! Parsing the `KEY=value` text format is delegated to third-party crates,
//! wrapped behind [`EnvFileImporter`] so the loader is independent of which
//! backend is compiled in. Backends are selected once per load — see
//! [`picker`] — and tests can substitute their own importer via
//! [`FluentEnv::use_importer`](crate::FluentEnv::use_importer).

use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[cfg(feature = "dotenv")]
mod dotenv;
#[cfg(feature = "dotenvy")]
mod dotenvy;
pub(crate) mod picker;

#[cfg(feature = "dotenv")]
pub use dotenv::DotenvImporter;
#[cfg(feature = "dotenvy")]
pub use dotenvy::DotenvyImporter;
pub use picker::ImporterSelection;

/// Failures an importer can report.
///
/// The loader treats the two variants differently: `Unreadable` is
/// swallowed per-path by `safe_load`, while `Parse` always propagates.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The path could not be opened or read.
    #[error("unable to read from the environment file '{}'", path.display())]
    Unreadable {
        /// The unreadable path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// The file was readable but its contents were rejected.
    #[error("failed to parse the environment file '{}': {source}", path.display())]
    Parse {
        /// The offending path.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

/// Reads an environment-definition file into a map of raw string pairs.
///
/// Implementations MUST NOT leave any mutation of shared ambient process
/// state (the native environment table in particular) visible after
/// `import` returns, whether it succeeds or fails.
pub trait EnvFileImporter {
    /// Load the key-value pairs defined in the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ImportError::Unreadable`] when the path cannot be opened or read;
    /// [`ImportError::Parse`] for any other failure.
    fn import(&self, path: &Path) -> Result<BTreeMap<String, String>, ImportError>;
}
