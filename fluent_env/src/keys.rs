//! Normalisation of the flexible argument shapes accepted by the fluent API.
//!
//! Every declarative entry point accepts either a single key or a list of
//! keys. Rather than duplicating the conversion in each method, the loader
//! funnels its arguments through [`IntoKeys`] (and [`IntoPaths`] for file
//! paths), then deduplicates with [`resolve_keys`] / [`resolve_paths`],
//! preserving the order of first occurrence.

use std::path::{Path, PathBuf};

/// Types accepted wherever the fluent API takes "a key or a list of keys".
///
/// Also used for plain string lists, such as the allowed-values list of
/// [`FluentEnv::allowed_values`](crate::FluentEnv::allowed_values).
pub trait IntoKeys {
    /// Convert into an ordered list of owned keys.
    fn into_keys(self) -> Vec<String>;
}

impl IntoKeys for &str {
    fn into_keys(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoKeys for String {
    fn into_keys(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoKeys for &String {
    fn into_keys(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoKeys for Vec<String> {
    fn into_keys(self) -> Vec<String> {
        self
    }
}

impl IntoKeys for Vec<&str> {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl IntoKeys for &[&str] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| (*k).to_owned()).collect()
    }
}

impl IntoKeys for &[String] {
    fn into_keys(self) -> Vec<String> {
        self.to_vec()
    }
}

impl<const N: usize> IntoKeys for [&str; N] {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl<const N: usize> IntoKeys for [String; N] {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().collect()
    }
}

/// Types accepted wherever the fluent API takes "a path or a list of paths".
pub trait IntoPaths {
    /// Convert into an ordered list of owned paths.
    fn into_paths(self) -> Vec<PathBuf>;
}

impl IntoPaths for &str {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl IntoPaths for String {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl IntoPaths for &Path {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![self.to_path_buf()]
    }
}

impl IntoPaths for PathBuf {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![self]
    }
}

impl IntoPaths for &PathBuf {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![self.clone()]
    }
}

impl IntoPaths for Vec<PathBuf> {
    fn into_paths(self) -> Vec<PathBuf> {
        self
    }
}

impl IntoPaths for Vec<&str> {
    fn into_paths(self) -> Vec<PathBuf> {
        self.into_iter().map(PathBuf::from).collect()
    }
}

impl IntoPaths for Vec<String> {
    fn into_paths(self) -> Vec<PathBuf> {
        self.into_iter().map(PathBuf::from).collect()
    }
}

impl<const N: usize> IntoPaths for [&str; N] {
    fn into_paths(self) -> Vec<PathBuf> {
        self.into_iter().map(PathBuf::from).collect()
    }
}

impl<const N: usize> IntoPaths for [PathBuf; N] {
    fn into_paths(self) -> Vec<PathBuf> {
        self.into_iter().collect()
    }
}

/// Normalise `keys` into an ordered, duplicate-free list.
///
/// The first occurrence of a key wins; later duplicates are dropped.
pub(crate) fn resolve_keys(keys: impl IntoKeys) -> Vec<String> {
    dedup_preserving_order(keys.into_keys())
}

/// Normalise `paths` into an ordered, duplicate-free list.
pub(crate) fn resolve_paths(paths: impl IntoPaths) -> Vec<PathBuf> {
    dedup_preserving_order(paths.into_paths())
}

fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{IntoKeys, resolve_keys, resolve_paths};

    use std::path::PathBuf;

    #[test]
    fn single_key_becomes_a_list() {
        assert_eq!(resolve_keys("HOST"), vec!["HOST".to_owned()]);
    }

    #[test]
    fn duplicates_are_dropped_keeping_first_occurrence() {
        assert_eq!(
            resolve_keys(vec!["A", "B", "A", "C", "B"]),
            vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
        );
    }

    #[test]
    fn arrays_and_slices_are_accepted() {
        assert_eq!(resolve_keys(["X", "Y"]), vec!["X".to_owned(), "Y".to_owned()]);
        let slice: &[&str] = &["X"];
        assert_eq!(slice.into_keys(), vec!["X".to_owned()]);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert_eq!(resolve_keys(Vec::<String>::new()), Vec::<String>::new());
    }

    #[test]
    fn paths_deduplicate_in_order() {
        let paths = resolve_paths(vec![".env", ".env.local", ".env"]);
        assert_eq!(
            paths,
            vec![PathBuf::from(".env"), PathBuf::from(".env.local")],
        );
    }
}
