//! Discovery of document source files in a project directory.
//!
//! Files are recognised by category prefix (`parameters_*`, `systems_*`,
//! `simulation_*`, `tools_*`, `report_*`) and ordered by category, then
//! file name. This is the same ordering contract the
//! [`Pipeline`](crate::Pipeline) applies to registered modules, so the
//! on-disk layout of a project reads in document order.
//!
//! Discovery also fingerprints the recognised sources, which is how the
//! interactive view decides that a rerun is worth announcing.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::pipeline::Category;

/// A discovered document source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// The category the file name's prefix assigns it to.
    pub category: Category,
    /// File name without its extension, e.g. `parameters_heatpump`.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// Walks a project directory and returns the recognised sources in
/// document order (category, then file name).
///
/// Hidden directories and the `target` build directory are skipped. Files
/// whose names match no category prefix are ignored; discovery is a
/// convention, not a validation step.
#[must_use]
pub fn discover_sources(root: &Path) -> Vec<SourceFile> {
    let mut sources: Vec<SourceFile> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let stem = entry.path().file_stem()?.to_str()?.to_string();
            let category = Category::from_file_name(&stem)?;
            Some(SourceFile {
                category,
                name: stem,
                path: entry.into_path(),
            })
        })
        .collect();

    sources.sort_by(|left, right| {
        left.category
            .cmp(&right.category)
            .then_with(|| left.name.cmp(&right.name))
    });
    sources
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    // The walk root is always entered, whatever it is called.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| {
            (name.starts_with('.') && name.len() > 1) || name == "target"
        })
}

/// Content digests of a set of discovered sources.
///
/// Two snapshots compare equal exactly when every recognised file has the
/// same content, so change detection is a plain equality check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprints {
    digests: BTreeMap<PathBuf, String>,
}

impl Fingerprints {
    /// Digests every discovered source under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognised file cannot be read.
    pub fn capture(root: &Path) -> io::Result<Self> {
        let mut digests = BTreeMap::new();
        for source in discover_sources(root) {
            let contents = std::fs::read(&source.path)?;
            let hash = Sha256::digest(&contents);
            digests.insert(source.path, format!("{hash:x}"));
        }
        Ok(Self { digests })
    }

    /// The number of fingerprinted files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether no files were fingerprinted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Paths whose digest differs from (or is missing in) `other`.
    #[must_use]
    pub fn changed_since(&self, other: &Self) -> Vec<&Path> {
        self.digests
            .iter()
            .filter(|(path, digest)| other.digests.get(*path) != Some(digest))
            .map(|(path, _)| path.as_path())
            .collect()
    }
}
