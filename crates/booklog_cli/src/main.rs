//! Smoke driver for `booklog_core`.
//!
//! # Responsibility
//! - Start core logging under `./logs`.
//! - Open the default library file in the working directory.
//! - Print the numbered listing and read statistics.
//!
//! Interactive add/remove/search belong to a UI driver, not this binary.

use booklog_core::{default_log_level, init_logging, Catalog, JsonFileBookStore};
use std::path::Path;
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "logs";

fn main() -> ExitCode {
    println!("booklog_core version={}", booklog_core::core_version());

    // Logging is best-effort; the listing still runs without it.
    if let Err(err) = start_logging() {
        eprintln!("logging disabled: {err}");
    }

    let catalog = match Catalog::open(JsonFileBookStore::default()) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("failed to open library ({:?}): {err}", err.kind());
            return ExitCode::FAILURE;
        }
    };

    if catalog.is_empty() {
        println!("Your library is empty.");
        return ExitCode::SUCCESS;
    }

    for (position, book) in catalog.numbered() {
        println!("{position}. {book}");
    }

    let stats = catalog.statistics();
    println!("Total books: {}", stats.total);
    if let Some(label) = stats.percent_read_label() {
        println!("Books read: {} ({label})", stats.read_count);
    }

    ExitCode::SUCCESS
}

fn start_logging() -> Result<(), String> {
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?;
    init_logging(default_log_level(), &log_dir_under(&cwd)?)
}

fn log_dir_under(base: &Path) -> Result<String, String> {
    let log_dir = base.join(LOG_DIR_NAME);
    log_dir
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| format!("log directory `{}` is not UTF-8", log_dir.display()))
}
