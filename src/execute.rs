use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command as ProcessCommand;

use log::debug;
use thiserror::Error;

/// Binary invoked in every repository unless overridden.
pub const DEFAULT_PROGRAM: &str = "git";

/// Why a single repository counted as failed.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("unable to spawn command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("command exited with {}", describe_exit(.code.as_ref().copied()))]
    Exit { code: Option<i32> },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Outcome of running the command in one repository.
#[derive(Debug)]
pub enum ExecutionResult {
    Succeeded,
    Failed(ExecutionError),
}

impl ExecutionResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Succeeded)
    }
}

pub trait Executor {
    /// Run the command with `args` inside `repo` and wait for it to finish.
    fn execute(&self, repo: &Path, args: &[OsString]) -> ExecutionResult;
}

impl<T: Executor + ?Sized> Executor for &T {
    fn execute(&self, repo: &Path, args: &[OsString]) -> ExecutionResult {
        (**self).execute(repo, args)
    }
}

/// Spawns a real process with stdout and stderr inherited from the parent.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: OsString,
}

impl ProcessExecutor {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, repo: &Path, args: &[OsString]) -> ExecutionResult {
        debug!(
            "Spawning {} in {}",
            self.program.to_string_lossy(),
            repo.display()
        );
        let status = ProcessCommand::new(&self.program)
            .args(args)
            .current_dir(repo)
            .status();

        match status {
            Ok(s) if s.success() => ExecutionResult::Succeeded,
            Ok(s) => {
                debug!("Command in {} exited with {s}", repo.display());
                ExecutionResult::Failed(ExecutionError::Exit { code: s.code() })
            }
            Err(e) => {
                debug!(
                    "Unable to spawn {} in {}: {e}",
                    self.program.to_string_lossy(),
                    repo.display()
                );
                ExecutionResult::Failed(ExecutionError::Spawn(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_default_program_is_git() {
        assert_eq!(ProcessExecutor::default().program(), "git");
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessExecutor::new("sh").execute(dir.path(), &os_args(&["-c", "exit 0"]));
        assert!(result.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_code() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessExecutor::new("sh").execute(dir.path(), &os_args(&["-c", "exit 3"]));
        match result {
            ExecutionResult::Failed(ExecutionError::Exit { code }) => assert_eq!(code, Some(3)),
            other => panic!("Expected Exit failure, got: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_inside_repo_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker-file"), "").unwrap();
        let result =
            ProcessExecutor::new("sh").execute(dir.path(), &os_args(&["-c", "test -f marker-file"]));
        assert!(result.is_success());
    }

    #[test]
    fn test_missing_binary_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessExecutor::new("gitjuggling-no-such-binary").execute(dir.path(), &[]);
        match result {
            ExecutionResult::Failed(ExecutionError::Spawn(e)) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Spawn failure, got: {other:?}"),
        }
    }

    #[test]
    fn test_exit_error_message() {
        let err = ExecutionError::Exit { code: Some(128) };
        assert_eq!(err.to_string(), "command exited with status 128");
        let err = ExecutionError::Exit { code: None };
        assert_eq!(
            err.to_string(),
            "command exited with no status (terminated by signal)"
        );
    }
}
