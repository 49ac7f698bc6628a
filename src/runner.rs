use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{debug, info};
use thiserror::Error;

use crate::discover::{MarkerEntry, RepositoryMarker, discover};
use crate::execute::{ExecutionResult, Executor, ProcessExecutor};
use crate::render::Painter;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("unable to list repositories in {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Tally of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, result: &ExecutionResult) {
        if result.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Runs one command in every repository found below a working directory.
pub struct Runner<E = ProcessExecutor, M = MarkerEntry> {
    executor: E,
    marker: M,
    painter: Painter,
}

impl Runner {
    /// Runs `git`, detects `.git` markers, colours output when stdout is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Runner {
            executor: ProcessExecutor::default(),
            marker: MarkerEntry::default(),
            painter: Painter::detect(),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Executor, M: RepositoryMarker> Runner<E, M> {
    #[must_use]
    pub fn with_executor<E2: Executor>(self, executor: E2) -> Runner<E2, M> {
        Runner {
            executor,
            marker: self.marker,
            painter: self.painter,
        }
    }

    #[must_use]
    pub fn with_marker<M2: RepositoryMarker>(self, marker: M2) -> Runner<E, M2> {
        Runner {
            executor: self.executor,
            marker,
            painter: self.painter,
        }
    }

    #[must_use]
    pub fn with_painter(mut self, painter: Painter) -> Self {
        self.painter = painter;
        self
    }

    /// Repository roots directly below `working_dir`, sorted.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Discovery` if `working_dir` cannot be listed.
    pub fn discover(&self, working_dir: &Path) -> Result<Vec<PathBuf>, RunError> {
        discover(working_dir, &self.marker).map_err(|source| RunError::Discovery {
            path: working_dir.to_path_buf(),
            source,
        })
    }

    /// Announce and run the command in a single repository.
    ///
    /// `out` is flushed before the command starts so the announcement is
    /// printed ahead of the command's own output.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Output` if writing to `out` fails. A failing
    /// command is reported through the returned `ExecutionResult`.
    pub fn run_one<W: Write>(
        &self,
        repo: &Path,
        args: &[OsString],
        out: &mut W,
    ) -> Result<ExecutionResult, RunError> {
        writeln!(out, "{}", self.painter.executing_line(repo, args))?;
        out.flush()?;

        let result = self.executor.execute(repo, args);
        if let ExecutionResult::Failed(ref e) = result {
            debug!("{} failed: {e}", repo.display());
        }
        Ok(result)
    }

    /// Run the command in every repository below `working_dir`, one at a time,
    /// and print the tally.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Discovery` before running anything if `working_dir`
    /// cannot be listed, or `RunError::Output` if writing to `out` fails.
    pub fn run<W: Write>(
        &self,
        working_dir: &Path,
        args: &[OsString],
        out: &mut W,
    ) -> Result<Summary, RunError> {
        let repositories = self.discover(working_dir)?;
        info!(
            "Running in {} repositories below {}",
            repositories.len(),
            working_dir.display()
        );

        let mut summary = Summary::default();
        for repo in &repositories {
            let result = self.run_one(repo, args, out)?;
            summary.record(&result);
        }

        writeln!(out, "{}", self.painter.summary_line(&summary))?;
        out.flush()?;
        Ok(summary)
    }
}
