//! Generated document set
//!
//! Ordered mapping from relative output path to file text, plus the
//! helpers that put it on disk.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::checksum::{manifest_line, Checksum};
use crate::error::Result;

/// Manifest file written next to the generated sources
pub const MANIFEST_FILE: &str = "scaffold.sha256";

/// Every document of one run, in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedFiles {
    files: IndexMap<String, String>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: String, content: String) {
        self.files.insert(path, content);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Checksum of every document, generation order
    pub fn checksums(&self) -> Vec<(&str, Checksum)> {
        self.iter().map(|(p, c)| (p, Checksum::of(c))).collect()
    }

    /// `sha256sum`-compatible manifest text
    pub fn manifest(&self) -> String {
        let mut out = String::new();
        for (path, sum) in self.checksums() {
            out.push_str(&manifest_line(&sum, path));
            out.push('\n');
        }
        out
    }

    /// Write every document under `root`, creating directories as needed
    pub fn write_to(&self, root: &Path) -> Result<usize> {
        for (path, content) in self.iter() {
            let target = root.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
            debug!(path, bytes = content.len(), "wrote file");
        }
        Ok(self.files.len())
    }

    /// Write the manifest to `root/scaffold.sha256`
    pub fn write_manifest(&self, root: &Path) -> Result<PathBuf> {
        fs::create_dir_all(root)?;
        let target = root.join(MANIFEST_FILE);
        fs::write(&target, self.manifest())?;
        Ok(target)
    }
}

impl<'a> IntoIterator for &'a GeneratedFiles {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::parse_manifest;

    fn sample() -> GeneratedFiles {
        let mut files = GeneratedFiles::new();
        files.insert("src/App.tsx".into(), "app\n".into());
        files.insert("src/pages/KursePage.tsx".into(), "page\n".into());
        files
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let written = sample().write_to(dir.path()).unwrap();
        assert_eq!(written, 2);
        let page = fs::read_to_string(dir.path().join("src/pages/KursePage.tsx")).unwrap();
        assert_eq!(page, "page\n");
    }

    #[test]
    fn test_manifest_lines() {
        let files = sample();
        let manifest = files.manifest();
        let parsed = parse_manifest(&manifest);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].1, "src/App.tsx");
        assert!(parsed[1].0.verify(b"page\n"));

        let dir = tempfile::tempdir().unwrap();
        let path = files.write_manifest(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), manifest);
    }
}
