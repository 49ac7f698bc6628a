use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::Path;

use anstyle::{AnsiColor, Color, Style};

use crate::runner::Summary;

const PATH_COLOR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const ARGS_COLOR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const COUNT_COLOR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta)));
const LABEL_COLOR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));

/// Formats progress output, emitting ANSI escape codes only when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    /// Colour when stdout is a terminal.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(self, style: Style, s: &str) -> String {
        if self.color {
            format!("{style}{s}{style:#}")
        } else {
            s.to_string()
        }
    }

    /// `<repo> executing <args>`
    #[must_use]
    pub fn executing_line(self, repo: &Path, args: &[OsString]) -> String {
        format!(
            "{} executing {}",
            self.paint(PATH_COLOR, &repo.display().to_string()),
            self.paint(ARGS_COLOR, &join_args(args))
        )
    }

    /// `<succeeded> items succeeded, <failed> items failed`
    #[must_use]
    pub fn summary_line(self, summary: &Summary) -> String {
        format!(
            "{} {} {} {}",
            self.paint(COUNT_COLOR, &summary.succeeded.to_string()),
            self.paint(LABEL_COLOR, "items succeeded,"),
            self.paint(COUNT_COLOR, &summary.failed.to_string()),
            self.paint(LABEL_COLOR, "items failed")
        )
    }
}

/// Arguments joined by single spaces, lossily converted for display.
#[must_use]
pub fn join_args(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
