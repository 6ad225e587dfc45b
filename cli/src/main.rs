//! Parkir - parking lot operator console.
//!
//! Wires configuration, the transaction history, and the registry together,
//! then hands stdin/stdout to the interactive [`session::Session`].
//!
//! ```text
//! main() -> ParkirConfig::load() -> ParkingRegistry::open(history, tariffs)
//!                                          |
//!                                          v
//!                                   Session::run(stdin, stdout)
//! ```

mod commands;
mod render;
mod session;

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use parkir_config::ParkirConfig;
use parkir_core::{HistoryStore, ParkingRegistry};

use crate::session::Session;

const LOG_FILE: &str = "parkir.log";

/// Send logs to the first writable log file, filtered by `RUST_LOG`
/// (default `info`). Without a file nothing is logged, so log lines never
/// mix with the console.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let mut skipped = Vec::new();
    let opened = log_dirs().into_iter().find_map(|dir| {
        let path = dir.join(LOG_FILE);
        match open_append(&path) {
            Ok(file) => Some((path, file)),
            Err(e) => {
                skipped.push(format!("{}: {e}", path.display()));
                None
            }
        }
    });

    let Some((path, file)) = opened else {
        tracing_subscriber::registry().with(filter).init();
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    tracing::info!(path = %path.display(), "Logging to file");
    for reason in skipped {
        tracing::warn!("Log location unusable: {reason}");
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `logs/` beside the config file, then `./.parkir/logs`.
fn log_dirs() -> Vec<PathBuf> {
    ParkirConfig::path()
        .and_then(|config| config.parent().map(|dir| dir.join("logs")))
        .into_iter()
        .chain([PathBuf::from(".parkir").join("logs")])
        .collect()
}

fn load_config() -> ParkirConfig {
    match ParkirConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %e.path().display(), "Ignoring config: {e}");
            eprintln!("Warning: {e}; using default settings");
            ParkirConfig::default()
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    let store = HistoryStore::new(config.history_path());
    let registry = ParkingRegistry::open(store, config.tariff_table());
    tracing::info!(
        site = config.site_name(),
        history = %registry.store().path().display(),
        transactions = registry.list_history().len(),
        "Session started"
    );

    let mut session = Session::new(
        registry,
        config.site_name(),
        ParkirConfig::path(),
        parkir_core::now,
    );
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    session.run(&mut input, &mut out)?;

    tracing::info!("Session ended");
    Ok(())
}
