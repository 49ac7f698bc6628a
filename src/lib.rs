//! Run one git command in every repository below a directory
//!
//! The immediate subdirectories of the working directory that contain a `.git`
//! entry are treated as repositories. The command runs in each of them in turn,
//! with its output streamed straight to the console, and a tally of successes
//! and failures is printed at the end.

pub mod discover;
pub mod execute;
pub mod logger;
pub mod render;
pub mod runner;
pub mod submodules;

pub use discover::{GIT_MARKER, MarkerEntry, RepositoryMarker, discover};
pub use execute::{ExecutionError, ExecutionResult, Executor, ProcessExecutor};
pub use render::Painter;
pub use runner::{RunError, Runner, Summary};
