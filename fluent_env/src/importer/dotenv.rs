//! Importer backed by the `dotenv` crate.

use std::collections::BTreeMap;
use std::path::Path;

use super::{EnvFileImporter, ImportError};

/// Imports environment files using [`dotenv`]'s parser.
///
/// Kept alongside [`DotenvyImporter`](super::DotenvyImporter) for projects
/// still pinned to `dotenv`; the iterator API parses the file without
/// touching the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvImporter;

impl DotenvImporter {
    fn classify(path: &Path, err: dotenv::Error) -> ImportError {
        match err {
            dotenv::Error::Io(source) => ImportError::Unreadable {
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

impl EnvFileImporter for DotenvImporter {
    fn import(&self, path: &Path) -> Result<BTreeMap<String, String>, ImportError> {
        let iter = dotenv::from_path_iter(path).map_err(|err| Self::classify(path, err))?;
        let mut values = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|err| Self::classify(path, err))?;
            values.insert(key, value);
        }
        Ok(values)
    }
}
