//! Project file discovery
//!
//! Only the direct children of the scan root are considered. Candidates are
//! returned sorted by path so that "first found" is the same on every
//! platform and every run, independent of directory enumeration order.

use crate::fs::FileSystem;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Recognized project file flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptorKind {
    CSharp,
    FSharp,
    VisualBasic,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 3] = [
        DescriptorKind::CSharp,
        DescriptorKind::FSharp,
        DescriptorKind::VisualBasic,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DescriptorKind::CSharp => "csproj",
            DescriptorKind::FSharp => "fsproj",
            DescriptorKind::VisualBasic => "vbproj",
        }
    }

    /// Matches the file extension exactly; `App.CSPROJ` is not a project file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorCandidate {
    pub path: PathBuf,
    pub kind: DescriptorKind,
}

pub struct DescriptorLocator<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> DescriptorLocator<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Lists project files directly under `root`, sorted by path.
    ///
    /// A missing or unreadable root yields no candidates rather than an error:
    /// to the caller both mean "nothing to build here".
    pub fn locate(&self, root: &Path) -> Vec<DescriptorCandidate> {
        if !self.fs.is_dir(root) {
            debug!(root = %root.display(), "Scan root is not a directory");
            return Vec::new();
        }

        let entries = match self.fs.read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Failed to list scan root");
                return Vec::new();
            }
        };

        let mut candidates: Vec<DescriptorCandidate> = entries
            .into_iter()
            .filter(|entry| entry.is_file())
            .filter_map(|entry| {
                DescriptorKind::from_path(entry.path()).map(|kind| DescriptorCandidate {
                    path: entry.path,
                    kind,
                })
            })
            .collect();

        candidates.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(root = %root.display(), count = candidates.len(), "Located project files");
        candidates
    }

    /// Picks the authoritative candidate: the first by path.
    ///
    /// Mixed project kinds are accepted; the other kinds are only reported.
    pub fn select(candidates: &[DescriptorCandidate]) -> Option<&DescriptorCandidate> {
        let selected = candidates.first()?;

        let mut ignored_kinds: Vec<DescriptorKind> = candidates
            .iter()
            .map(|c| c.kind)
            .filter(|kind| *kind != selected.kind)
            .collect();
        ignored_kinds.sort();
        ignored_kinds.dedup();

        if !ignored_kinds.is_empty() {
            warn!(
                selected = %selected.path.display(),
                ignored = ?ignored_kinds,
                "Multiple project kinds found; using the first project file"
            );
        } else if candidates.len() > 1 {
            debug!(
                selected = %selected.path.display(),
                count = candidates.len(),
                "Multiple project files found; using the first"
            );
        }

        Some(selected)
    }
}
