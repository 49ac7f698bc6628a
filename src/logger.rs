use std::io::Write;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: LevelFilter = LevelFilter::Warn;

/// Writes diagnostics to stderr, keeping stdout for repository output.
struct StderrLogger {
    filter: LevelFilter,
    start: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{elapsed:.3}s] [{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parse a `RUST_LOG` style level name, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn parse_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_FILTER)
}

/// Initialize the global logger. Must be called once before any logging.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init() {
    let filter = parse_filter(std::env::var("RUST_LOG").ok().as_deref());

    let logger = StderrLogger {
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger)).expect("logger already initialized");
    log::set_max_level(filter);
}
