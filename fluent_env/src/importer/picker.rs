//! Importer backend selection.
//!
//! The original family of dot-env parsers changed APIs across major
//! versions, so selection is a strategy resolved once per load rather than
//! per call: the loader records which backend the caller asked for and the
//! picker turns that into a concrete importer, or fails with
//! [`FluentEnvError::DependencyUnresolved`] when the backend was not
//! compiled in.

use crate::error::FluentEnvError;

use super::EnvFileImporter;

/// Which importer backend to use for a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImporterSelection {
    /// Try the enabled backends in order: `dotenvy`, then `dotenv`.
    #[default]
    Auto,
    /// Use the `dotenvy` crate (requires the `dotenvy` feature).
    Dotenvy,
    /// Use the `dotenv` crate (requires the `dotenv` feature).
    Dotenv,
}

/// Resolve `selection` into a concrete importer.
pub(crate) fn pick_importer(
    selection: ImporterSelection,
) -> Result<Box<dyn EnvFileImporter>, FluentEnvError> {
    let importer = match selection {
        ImporterSelection::Auto => first_available(),
        ImporterSelection::Dotenvy => dotenvy_importer(),
        ImporterSelection::Dotenv => dotenv_importer(),
    };
    importer.ok_or(FluentEnvError::DependencyUnresolved)
}

fn first_available() -> Option<Box<dyn EnvFileImporter>> {
    dotenvy_importer().or_else(dotenv_importer)
}

fn dotenvy_importer() -> Option<Box<dyn EnvFileImporter>> {
    #[cfg(feature = "dotenvy")]
    {
        tracing::debug!(backend = "dotenvy", "selected env-file importer");
        Some(Box::new(super::DotenvyImporter))
    }
    #[cfg(not(feature = "dotenvy"))]
    {
        None
    }
}

fn dotenv_importer() -> Option<Box<dyn EnvFileImporter>> {
    #[cfg(feature = "dotenv")]
    {
        tracing::debug!(backend = "dotenv", "selected env-file importer");
        Some(Box::new(super::DotenvImporter))
    }
    #[cfg(not(feature = "dotenv"))]
    {
        None
    }
}
