//! Drift detection between a fresh run and an output directory
//!
//! Reports generated files that were edited or deleted on disk, and
//! entity documents on disk that the current metadata no longer produces.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use similar::TextDiff;
use walkdir::WalkDir;

use crate::checksum::Checksum;
use crate::error::Result;
use crate::output::GeneratedFiles;

/// Directories holding one document per entity
const ENTITY_DIRS: &[&str] = &["src/pages", "src/components/dialogs"];

/// State of one generated file on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Unchanged,
    /// On-disk text differs; `diff` is unified, on disk -> generated
    Modified { diff: String },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDrift {
    pub path: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Result of comparing one run against a directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriftReport {
    pub files: Vec<FileDrift>,
    /// Entity documents on disk not produced by this run
    pub orphans: Vec<String>,
}

impl DriftReport {
    pub fn has_drift(&self) -> bool {
        !self.orphans.is_empty()
            || self
                .files
                .iter()
                .any(|f| f.status != FileStatus::Unchanged)
    }

    pub fn modified(&self) -> impl Iterator<Item = &FileDrift> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Modified { .. }))
    }

    pub fn missing(&self) -> impl Iterator<Item = &FileDrift> {
        self.files.iter().filter(|f| f.status == FileStatus::Missing)
    }

    pub fn unchanged_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Unchanged)
            .count()
    }
}

/// Compare generated documents against the files under `root`
pub fn compare(files: &GeneratedFiles, root: &Path) -> Result<DriftReport> {
    let mut report = DriftReport::default();

    for (path, generated) in files.iter() {
        let status = match fs::read(root.join(path)) {
            Ok(bytes) if Checksum::of(generated).verify(&bytes) => FileStatus::Unchanged,
            Ok(bytes) => {
                let on_disk = String::from_utf8_lossy(&bytes);
                let diff = TextDiff::from_lines(&*on_disk, generated)
                    .unified_diff()
                    .context_radius(3)
                    .header(&format!("a/{path}"), &format!("b/{path}"))
                    .to_string();
                FileStatus::Modified { diff }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => FileStatus::Missing,
            Err(e) => return Err(e.into()),
        };
        report.files.push(FileDrift {
            path: path.to_string(),
            status,
        });
    }

    for dir in ENTITY_DIRS {
        let base = root.join(dir);
        if !base.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "tsx") {
                continue;
            }
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !files.contains(&relative) {
                report.orphans.push(relative);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use crate::metadata::AppMetadata;

    fn generated() -> GeneratedFiles {
        let meta = AppMetadata::from_json_str(
            r#"{"apps": {"kurse": {"app_id": "A", "name": "Kurse", "controls": {
                "titel": {"fulltype": "string/text", "label": "Titel"}
            }}}}"#,
        )
        .unwrap();
        Generator::new(meta, ["kurse"]).generate_all().unwrap()
    }

    #[test]
    fn test_fresh_output_has_no_drift() {
        let files = generated();
        let dir = tempfile::tempdir().unwrap();
        files.write_to(dir.path()).unwrap();

        let report = compare(&files, dir.path()).unwrap();
        assert!(!report.has_drift());
        assert_eq!(report.unchanged_count(), files.len());
    }

    #[test]
    fn test_modified_missing_and_orphans() {
        let files = generated();
        let dir = tempfile::tempdir().unwrap();
        files.write_to(dir.path()).unwrap();

        fs::write(dir.path().join("src/App.tsx"), "// edited\n").unwrap();
        fs::remove_file(dir.path().join("src/components/StatCard.tsx")).unwrap();
        fs::write(dir.path().join("src/pages/AltPage.tsx"), "old\n").unwrap();

        let report = compare(&files, dir.path()).unwrap();
        assert!(report.has_drift());

        let modified: Vec<_> = report.modified().collect();
        assert_eq!(modified.len(), 1);
        assert_eq!(modified[0].path, "src/App.tsx");
        let FileStatus::Modified { diff } = &modified[0].status else {
            panic!("expected modification");
        };
        assert!(diff.contains("--- a/src/App.tsx"));
        assert!(diff.contains("-// edited"));

        let missing: Vec<_> = report.missing().map(|f| f.path.as_str()).collect();
        assert_eq!(missing, vec!["src/components/StatCard.tsx"]);
        assert_eq!(report.orphans, vec!["src/pages/AltPage.tsx".to_string()]);
    }
}
