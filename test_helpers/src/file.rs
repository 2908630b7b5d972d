//! Builders for on-disk `.env` fixture files.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tempfile::TempDir;

/// A temporary directory of `.env` fixture files.
///
/// The directory and everything in it are removed on drop.
pub struct EnvFileFixture {
    dir: TempDir,
}

impl EnvFileFixture {
    /// Create an empty fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created.
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new().context("create fixture directory")?;
        Ok(Self { dir })
    }

    /// Write `name` into the fixture directory with one `KEY=value` line
    /// per pair, returning the file's path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, pairs: &[(&str, &str)]) -> anyhow::Result<PathBuf> {
        let mut contents = String::new();
        for (key, value) in pairs {
            contents.push_str(key);
            contents.push('=');
            contents.push_str(value);
            contents.push('\n');
        }
        self.write_raw(name, &contents)
    }

    /// Write `name` with verbatim `contents`, returning the file's path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_raw(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write fixture {name}"))?;
        Ok(path)
    }

    /// The path a file named `name` would have in the fixture directory,
    /// whether or not it exists.
    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
