//! Destinations for generated files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Receives finished files. Paths are relative, `/`-separated.
pub trait OutputSink {
    /// Write one file, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write(&mut self, path: &str, content: &str) -> io::Result<()>;
}

/// Writes files below a directory, creating parent directories as needed.
#[derive(Clone, Debug)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, path: &str, content: &str) -> io::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)
    }
}

/// Collects files in memory, sorted by path.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    #[must_use]
    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, path: &str, content: &str) -> io::Result<()> {
        self.files.insert(path.to_owned(), content.to_owned());
        Ok(())
    }
}
