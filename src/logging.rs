// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const CRATE: &str = env!("CARGO_CRATE_NAME");
const DEFAULT_LEVEL: &str = "info";

lazy_static! {
    pub static ref PROJECT_NAME: String = CRATE.to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", *PROJECT_NAME);
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
    static ref PROJECT_DIRS: Option<ProjectDirs> = ProjectDirs::from("com", "pricelens", env!("CARGO_PKG_NAME"));
}

/// Where the log file lives; `./.data` when no home directory is known.
pub fn get_data_dir() -> PathBuf {
    PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

/// Where `config.toml` is looked up; `./.config` when no home directory is known.
pub fn get_config_dir() -> PathBuf {
    PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".config"))
}

/// Picks the filter directive.
///
/// `RUST_LOG` is taken verbatim. `PRICELENS_LOGLEVEL` may be a bare level
/// such as `debug`, which is scoped to this crate so dependencies like
/// `reqwest` stay quiet; anything else is taken as a full directive.
pub fn filter_directive(rust_log: Option<String>, app_level: Option<String>) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    match app_level.as_deref().map(str::trim) {
        Some(level) if is_bare_level(level) => format!("{}={}", CRATE, level.to_lowercase()),
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => format!("{}={}", CRATE, DEFAULT_LEVEL),
    }
}

fn is_bare_level(value: &str) -> bool {
    ["trace", "debug", "info", "warn", "error", "off"]
        .iter()
        .any(|level| level.eq_ignore_ascii_case(value))
}

/// Sends tracing output to `pricelens.log` in the data directory, since the
/// terminal belongs to the UI. Returns the path of the log file.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = std::fs::File::create(&log_path)?;

    let directive = filter_directive(std::env::var("RUST_LOG").ok(), std::env::var(LOG_ENV.as_str()).ok());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::try_new(&directive)?);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    info!(version = env!("CARGO_PKG_VERSION"), filter = %directive, "Logging initialized.");
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_derive_from_the_crate() {
        assert_eq!(PROJECT_NAME.as_str(), "PRICELENS");
        assert_eq!(LOG_ENV.as_str(), "PRICELENS_LOGLEVEL");
        assert_eq!(LOG_FILE.as_str(), "pricelens.log");
    }

    #[test]
    fn rust_log_wins_verbatim() {
        let directive = filter_directive(Some("reqwest=debug".into()), Some("trace".into()));
        assert_eq!(directive, "reqwest=debug");
    }

    #[test]
    fn bare_level_is_scoped_to_the_crate() {
        assert_eq!(filter_directive(None, Some("DEBUG".into())), "pricelens=debug");
        assert_eq!(filter_directive(None, Some("pricelens=trace,hyper=warn".into())), "pricelens=trace,hyper=warn");
    }

    #[test]
    fn blank_values_fall_back_to_info() {
        assert_eq!(filter_directive(Some(" ".into()), None), "pricelens=info");
        assert_eq!(filter_directive(None, Some("".into())), "pricelens=info");
    }
}
