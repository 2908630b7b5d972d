//! Importer backed by the `dotenvy` crate.

use std::collections::BTreeMap;
use std::path::Path;

use super::{EnvFileImporter, ImportError};

/// Imports environment files using [`dotenvy`]'s parser.
///
/// `dotenvy::from_path_iter` parses the file without writing anything to
/// the process environment, so the no-ambient-mutation contract of
/// [`EnvFileImporter`] holds without any snapshot/restore work.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvyImporter;

impl DotenvyImporter {
    fn classify(path: &Path, err: dotenvy::Error) -> ImportError {
        match err {
            dotenvy::Error::Io(source) => ImportError::Unreadable {
                path: path.to_path_buf(),
                source: Box::new(source),
            },
            other => ImportError::Parse {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }
}

impl EnvFileImporter for DotenvyImporter {
    fn import(&self, path: &Path) -> Result<BTreeMap<String, String>, ImportError> {
        let iter = dotenvy::from_path_iter(path).map_err(|err| Self::classify(path, err))?;
        let mut values = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|err| Self::classify(path, err))?;
            values.insert(key, value);
        }
        Ok(values)
    }
}
