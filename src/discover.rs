//! Repository discovery among the immediate children of a directory

use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::submodules::submodule_paths;

/// Name of the entry that marks a git repository root.
pub const GIT_MARKER: &str = ".git";

/// Decides whether a directory is a repository root.
pub trait RepositoryMarker {
    fn is_repository(&self, dir: &Path) -> bool;
}

/// Matches directories that directly contain an entry with the given name.
///
/// The entry may be a directory or a file, so worktrees and submodules whose
/// `.git` is a gitdir link file also qualify.
#[derive(Debug, Clone, Copy)]
pub struct MarkerEntry(pub &'static str);

impl Default for MarkerEntry {
    fn default() -> Self {
        MarkerEntry(GIT_MARKER)
    }
}

impl RepositoryMarker for MarkerEntry {
    fn is_repository(&self, dir: &Path) -> bool {
        dir.join(self.0).symlink_metadata().is_ok()
    }
}

/// List the immediate subdirectories of `working_dir` that are repository roots.
///
/// Symlinked directories are not followed. Submodules registered by a
/// repository at `working_dir` itself are left out. The result is sorted.
///
/// # Errors
///
/// Returns the underlying `io::Error` if `working_dir` or one of its entries
/// cannot be read.
pub fn discover<M: RepositoryMarker + ?Sized>(
    working_dir: &Path,
    marker: &M,
) -> io::Result<Vec<PathBuf>> {
    let mut repositories = Vec::new();

    for entry in std::fs::read_dir(working_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        if marker.is_repository(&path) {
            repositories.push(path);
        }
    }

    let submodules = match submodule_paths(working_dir) {
        Ok(paths) => paths,
        Err(e) => {
            debug!("Not skipping submodules of {}: {e}", working_dir.display());
            Default::default()
        }
    };
    repositories.retain(|path| {
        let keep = !submodules.contains(path);
        if !keep {
            debug!("Skipping submodule {}", path.display());
        }
        keep
    });

    repositories.sort();
    debug!(
        "Discovered {} repositories in {}",
        repositories.len(),
        working_dir.display()
    );
    Ok(repositories)
}
