use std::collections::HashSet;
use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmoduleError {
    #[error("unable to read submodules: {0}")]
    Git(#[from] git2::Error),
}

/// Absolute paths of the submodules registered by the repository rooted at `dir`.
///
/// Only `dir` itself is opened; parent directories are not searched. A
/// directory that is not a repository root has no submodules.
///
/// # Errors
///
/// Returns `SubmoduleError::Git` if the repository exists but its submodule
/// configuration cannot be read.
pub fn submodule_paths(dir: &Path) -> Result<HashSet<PathBuf>, SubmoduleError> {
    let repo = match Repository::open(dir) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => {
            debug!("{} is not a git repository", dir.display());
            return Ok(HashSet::new());
        }
        Err(e) => return Err(e.into()),
    };

    let paths: HashSet<PathBuf> = repo
        .submodules()?
        .iter()
        .map(|submodule| dir.join(submodule.path()))
        .collect();
    debug!(
        "Found {} submodules declared in {}",
        paths.len(),
        dir.display()
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_directory_has_no_submodules() {
        let dir = tempfile::tempdir().unwrap();
        let paths = submodule_paths(dir.path()).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_repository_without_gitmodules() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let paths = submodule_paths(dir.path()).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_declared_submodules_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        std::fs::write(
            dir.path().join(".gitmodules"),
            "[submodule \"vendored\"]\n\tpath = libs/vendored\n\turl = https://example.com/vendored.git\n\
             [submodule \"docs\"]\n\tpath = docs\n\turl = https://example.com/docs.git\n\tbranch = main\n",
        )
        .unwrap();

        let paths = submodule_paths(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&dir.path().join("docs")));
        assert!(paths.contains(&dir.path().join("libs/vendored")));
    }
}
