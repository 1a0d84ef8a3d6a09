use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use lobotomy::Config;
use minielf::{Header, MAGIC};

pub mod config;
pub mod logging;
pub mod output;

pub struct Options<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub config: Config,
}

/// Rewrites the header of `opts.input` and writes the result, returning the output path.
///
/// Nothing is written unless the whole output could be computed.
pub fn run(opts: &Options<'_>) -> Result<PathBuf> {
    let input = fs::read(opts.input)
        .with_context(|| format!("failed to read {}", opts.input.display()))?;
    info!("read {} bytes from {}", input.len(), opts.input.display());

    if !input.starts_with(&MAGIC) {
        warn!("{} does not start with the ELF magic", opts.input.display());
    }
    log_summary("before", &input);

    let rewritten = lobotomy::transform(&input, &opts.config)
        .with_context(|| format!("failed to rewrite header of {}", opts.input.display()))?;
    log_summary("after", &rewritten);

    let output_path = opts
        .output
        .map_or_else(|| output::default_output_path(opts.input), Path::to_owned);

    output::write_atomic(&output_path, &rewritten)?;
    output::mark_executable(&output_path)?;

    Ok(output_path)
}

fn log_summary(stage: &str, bytes: &[u8]) {
    match Header::parse(bytes) {
        Some(header) => info!(
            "{stage}: {:?} endian, section headers at {:#x}, {} entries of {} bytes, string table {}",
            header.data,
            header.sh_off,
            header.sh_entry_num,
            header.sh_entry_size,
            header.sh_str_index
        ),
        None => debug!("{stage}: not a 64-bit header, no summary"),
    }
}
