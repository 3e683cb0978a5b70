//! Layered defaults: global flag file, local `.pixscrollrc`, then CLI.
//!
//! Flag files hold command-line tokens, one or more per line, with `#`
//! comments. Later layers win for valued options; boolean flags OR together.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::perf::DEFAULT_PERF_LOG;
use crate::session::{DEFAULT_PAGE_SIZE, DEFAULT_PROXIMITY};

/// Smallest and largest page size the search service accepts.
pub const PAGE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 3..=200;

pub const API_KEY_ENV: &str = "PIXABAY_API_KEY";
pub const DEBUG_LOG_ENV: &str = "PIXSCROLL_DEBUG_LOG";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub page_size: Option<u32>,
    pub proximity: Option<usize>,
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            endpoint: other.endpoint.clone().or_else(|| self.endpoint.clone()),
            page_size: other.page_size.or(self.page_size),
            proximity: other.proximity.or(self.proximity),
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Page size to use, clamped to what the service accepts.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(*PAGE_SIZE_RANGE.start(), *PAGE_SIZE_RANGE.end())
    }

    pub fn effective_proximity(&self) -> usize {
        self.proximity.unwrap_or(DEFAULT_PROXIMITY)
    }

    /// Event log path. `--perf` alone still gets a file to write timings to.
    pub fn effective_debug_log(&self) -> Option<PathBuf> {
        self.debug_log
            .clone()
            .or_else(|| self.perf.then(|| PathBuf::from(DEFAULT_PERF_LOG)))
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("pixscroll").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("pixscroll")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("pixscroll").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("pixscroll")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".pixscrollrc")
}

/// Read a flag file. A missing file yields empty flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` as a flag file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# pixscroll defaults (saved with --save)".to_string()];
    if let Some(key) = &flags.api_key {
        lines.push(format!("--api-key {key}"));
    }
    if let Some(endpoint) = &flags.endpoint {
        lines.push(format!("--endpoint {endpoint}"));
    }
    if let Some(page_size) = flags.page_size {
        lines.push(format!("--page-size {page_size}"));
    }
    if let Some(proximity) = flags.proximity {
        lines.push(format!("--proximity {proximity}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a flag file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list, ignoring everything else.
///
/// Accepts both `--flag value` and `--flag=value`. Unparseable numbers are
/// ignored rather than reported; clap validates the real command line.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--perf" {
            flags.perf = true;
            i += 1;
            continue;
        }

        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token, None),
        };
        if !matches!(
            name,
            "--api-key" | "--endpoint" | "--page-size" | "--proximity" | "--debug-log"
        ) {
            i += 1;
            continue;
        }
        let value = if inline_value.is_some() {
            inline_value
        } else {
            i += 1;
            tokens.get(i).cloned()
        };
        if let Some(value) = value {
            match name {
                "--api-key" => flags.api_key = Some(value),
                "--endpoint" => flags.endpoint = Some(value),
                "--page-size" => flags.page_size = value.parse().ok().or(flags.page_size),
                "--proximity" => flags.proximity = value.parse().ok().or(flags.proximity),
                _ => flags.debug_log = Some(PathBuf::from(value)),
            }
        }
        i += 1;
    }
    flags
}
