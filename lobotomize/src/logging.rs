use anyhow::{anyhow, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub fn init(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|_| anyhow!("logging already initialized"))?;
    log::set_max_level(level);
    Ok(())
}

/// Maps the `-v`/`-q` command line flags to a level filter.
pub fn level_from_flags(verbose: u64, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }

    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

static LOGGER: Logger = Logger;

struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(module) = record.module_path() {
            eprintln!("[{} {}] {}", record.level(), module, record.args());
        } else {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
