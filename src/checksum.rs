//! Checksum utilities for generated file integrity

use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SHA256 checksum of a generated document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum of text content
    pub fn of(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &[u8]) -> bool {
        Self::from_bytes(content) == *self
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One `<sha256>  <path>` line of a manifest
pub fn manifest_line(checksum: &Checksum, path: &str) -> String {
    format!("{checksum}  {path}")
}

/// Parse `sha256sum`-style manifest text, skipping malformed lines
pub fn parse_manifest(text: &str) -> Vec<(Checksum, String)> {
    text.lines()
        .filter_map(|line| {
            let (hash, path) = line.split_once("  ")?;
            let valid = hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit());
            valid.then(|| (Checksum::from(hash.to_string()), path.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = "export default function App() {}\n";
        assert_eq!(Checksum::of(content), Checksum::of(content));
        assert!(Checksum::of(content).verify(content.as_bytes()));
    }

    #[test]
    fn test_checksum_different_content() {
        assert_ne!(Checksum::of("a\n"), Checksum::of("b\n"));
        assert!(!Checksum::of("a\n").verify(b"a"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            Checksum::of("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_manifest_round_trip() {
        let sum = Checksum::of("x");
        let text = format!("{}\nnot a line\n", manifest_line(&sum, "src/App.tsx"));
        let parsed = parse_manifest(&text);
        assert_eq!(parsed, vec![(sum, "src/App.tsx".to_string())]);
    }
}
