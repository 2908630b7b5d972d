//! Error types produced by the environment loader.

use std::error::Error;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for results returned by this crate.
pub type FluentEnvResult<T> = Result<T, FluentEnvError>;

/// Errors that can occur while loading or validating environment values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FluentEnvError {
    /// `load` or `safe_load` was called on a loader that has already loaded.
    #[error(
        "environment data has already been loaded; \
         load() and safe_load() accept multiple files instead"
    )]
    AlreadyLoaded,

    /// An environment file could not be opened or read.
    #[error("unable to read from the environment file '{}'", path.display())]
    InvalidPath {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying error reported by the importer.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// An environment file was readable but its contents were rejected by
    /// the importer.
    #[error("failed to parse the environment file '{}': {source}", path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// No environment-file importer is available.
    ///
    /// Raised when the selected importer backend was not compiled in, or
    /// when no backend feature is enabled at all.
    #[error("could not find a supported environment-file importer")]
    DependencyUnresolved,

    /// A pattern handed to [`FluentEnv::regex`](crate::FluentEnv::regex)
    /// failed to compile.
    #[error("invalid regex \"{pattern}\" declared for key '{key}': {source}")]
    InvalidRegex {
        /// Key the pattern was declared for.
        key: String,
        /// The pattern that failed to compile.
        pattern: String,
        /// Compiler diagnostics.
        #[source]
        source: Box<regex::Error>,
    },

    /// A declared validation rule was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<crate::importer::ImportError> for FluentEnvError {
    fn from(err: crate::importer::ImportError) -> Self {
        use crate::importer::ImportError;

        match err {
            ImportError::Unreadable { path, source } => Self::InvalidPath { path, source },
            ImportError::Parse { path, source } => Self::Parse { path, source },
        }
    }
}

/// Validation failures, one variant per rule.
///
/// The messages cite the offending key and value so callers can surface
/// them directly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// A key declared as required is absent from the store.
    #[error("required key '{key}' is missing")]
    MissingKey {
        /// The missing key.
        key: String,
    },

    /// A key's value is empty (after trimming whitespace).
    #[error("'{key}' is empty")]
    Empty {
        /// The key whose value is empty.
        key: String,
    },

    /// A key's value does not look like a signed integer literal.
    #[error("{key} value \"{value}\" is not an integer")]
    NotAnInteger {
        /// The key whose value is invalid.
        key: String,
        /// The offending value.
        value: String,
    },

    /// A key's value is not in the boolean vocabulary.
    #[error("{key} value \"{value}\" is not a boolean")]
    NotABoolean {
        /// The key whose value is invalid.
        key: String,
        /// The offending value.
        value: String,
    },

    /// A key's value is outside its allowed-values list.
    #[error("{key} value \"{value}\" is not in the allowed list: \"{}\"", .allowed.join("\", \""))]
    ValueNotAllowed {
        /// The key whose value is invalid.
        key: String,
        /// The offending value.
        value: String,
        /// The values that would have been accepted.
        allowed: Vec<String>,
    },

    /// A key's value did not match one of its declared patterns.
    #[error("{key} value \"{value}\" did not match regex \"{pattern}\"")]
    RegexMismatch {
        /// The key whose value is invalid.
        key: String,
        /// The offending value.
        value: String,
        /// The pattern that failed to match.
        pattern: String,
    },

    /// A per-key callback rejected a value.
    #[error("{key} value \"{value}\" failed a callback check")]
    CallbackFailed {
        /// The key whose value was rejected.
        key: String,
        /// The offending value.
        value: String,
    },

    /// A global callback rejected a value.
    #[error("{key} value \"{value}\" failed a global callback check")]
    GlobalCallbackFailed {
        /// The key whose value was rejected.
        key: String,
        /// The offending value.
        value: String,
    },
}
