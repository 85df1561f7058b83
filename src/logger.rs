use crate::chronometer::Chronometer;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fmt::Display;

/// Writes records to stderr, stamped with the time since start-up.
pub struct Logger {
    chronometer: Chronometer,
    level: LevelFilter,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            chronometer: Chronometer::new(),
            level,
        }
    }

    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn format(&self, record: &Record<'_>) -> String {
        format!("{} {} ({} elapsed)", record.level(), record.args(), self.chronometer.elapsed())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

/// Logs only every `interval`-th call, for per-chunk progress.
pub struct PartialLogger {
    index: usize,
    interval: usize,
}

impl PartialLogger {
    pub fn new(interval: usize) -> Self {
        Self { index: 0, interval }
    }

    pub fn log<D: Display>(&mut self, f: impl FnOnce(usize) -> D) {
        if self.index % self.interval == 0 {
            log::debug!("{}", f(self.index));
        }
        self.index += 1;
    }

    pub fn count(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn enabled() {
        let logger = Logger::new(LevelFilter::Info);
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Info).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
        assert!(!Logger::new(LevelFilter::Off).enabled(&Metadata::builder().level(Level::Error).build()));
    }

    #[test]
    fn format() {
        let logger = Logger::new(LevelFilter::Trace);
        let line = logger.format(&Record::builder().level(Level::Warn).args(format_args!("Decoded {} bytes", 12)).build());
        assert!(line.starts_with("WARN Decoded 12 bytes (00:00."));
        assert!(line.ends_with(" elapsed)"));
    }

    #[test]
    fn partial_logger() {
        let mut logger = PartialLogger::new(3);
        let mut logged = Vec::new();
        for _ in 0..7 {
            logger.log(|index| {
                logged.push(index);
                index
            });
        }
        assert_eq!(logged, vec![0, 3, 6]);
        assert_eq!(logger.count(), 7);
    }
}
