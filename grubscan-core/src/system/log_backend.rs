//! Simple host backend for the [`log`] crate.

use std::io::Write;

use alloc::boxed::Box;
use log::{LevelFilter, Metadata, Record};

/// A simple logging backend that writes to the standard error of the host.
pub struct HostLogger {
    /// The most verbose level that is printed.
    level: LevelFilter,
}

impl HostLogger {
    /// Constructs a new [`HostLogger`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Constructs a new [`HostLogger`], then immediately leaks it so that it can be used with `set_logger`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn static_new(level: LevelFilter) -> &'static Self {
        Box::leak(Box::new(Self::new(level)))
    }

    /// Installs the [`HostLogger`] as the global logger, and sets the maximum level to match it.
    ///
    /// # Errors
    ///
    /// May return an `Error` if a global logger was already installed.
    pub fn install(level: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_logger(Self::static_new(level)).map(|()| log::set_max_level(level))
    }
}

impl Default for HostLogger {
    fn default() -> Self {
        Self::new(LevelFilter::Warn)
    }
}

impl log::Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = record.level();
            let file = record.file().unwrap_or_default();
            let line = record.line().unwrap_or_default();
            let args = record.args();
            let _ = writeln!(std::io::stderr().lock(), "[{level} {file}:{line}] - {args}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, Log};

    use super::*;

    #[test]
    fn test_level_filter() {
        let logger = HostLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
