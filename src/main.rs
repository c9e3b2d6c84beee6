use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::csv_reader::load_first;
use crate::dataset::Dataset;
use crate::error::LoadError;

mod aggregate;
mod config;
mod csv_reader;
mod dataset;
mod error;
mod report;

fn main() -> Result<()> {
    init_logging();

    let config = ReportConfig::new().context("invalid built-in report configuration")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    report::write_banner(&mut out)?;
    let Some(mut dataset) = load_or_report(&config.candidate_paths, &mut out)? else {
        return Ok(());
    };
    log::info!("reporting on {}", dataset.source().display());

    report::run(&mut dataset, &config, &mut out).context("failed to write report")?;
    out.flush()?;
    Ok(())
}

/// Loads the first candidate that exists.
///
/// When none exists the diagnostic is written to `out` and `Ok(None)` is
/// returned; any other load failure is an error.
fn load_or_report<W: Write>(candidates: &[PathBuf], out: &mut W) -> Result<Option<Dataset>> {
    match load_first(candidates, out) {
        Ok(dataset) => Ok(Some(dataset)),
        Err(LoadError::NotFound { attempted, cwd }) => {
            report::write_not_found(out, &attempted, &cwd)?;
            Ok(None)
        }
        Err(e) => Err(e).context("failed to load housing dataset"),
    }
}

/// Logs go to stderr; stdout carries only the report.
fn init_logging() {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
