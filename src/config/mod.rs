//! Configuration for the feed reader
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/postscroll/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top by `cli::RunArgs::apply`.

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod feed;
mod logging;

#[cfg(test)]
mod tests;

pub use feed::{DemoConfig, FileDemo, FileImage, ImageConfig};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

use crate::feed::client::DEFAULT_BASE_URL;
use crate::feed::controller::DEFAULT_PAGE_SIZE;
use crate::tui::theme::DEFAULT_THEME;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default per-request timeout
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Posts collection URL (pagination query is appended)
    pub base_url: String,

    /// Posts per page
    pub page_size: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Whether to run the TUI (false = headless JSON-lines output)
    pub enable_tui: bool,

    /// Demo mode: serve a generated corpus locally and read from it
    pub demo_mode: bool,

    /// Pages to load in headless mode
    pub headless_pages: u32,

    /// Theme name (see `tui::theme::Theme::list_available`)
    pub theme: String,

    /// Placeholder photo settings
    pub image: ImageConfig,

    /// Demo server settings
    pub demo: DemoConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            enable_tui: true,
            demo_mode: false,
            headless_pages: 1,
            theme: DEFAULT_THEME.to_string(),
            image: ImageConfig::default(),
            demo: DemoConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    base_url: Option<String>,
    page_size: Option<u32>,
    request_timeout_secs: Option<u64>,
    theme: Option<String>,

    /// Optional [image] section
    image: Option<FileImage>,

    /// Optional [demo] section
    demo: Option<FileDemo>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

/// Read a boolean runtime flag ("1" or "true")
fn flag_set(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Quote a value as a TOML string, escaping backslashes and quotes
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Get the config file path: ~/.config/postscroll/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("postscroll").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# postscroll configuration

# Posts collection URL (?_page=N&_limit=M is appended)
base_url = {base_url}

# Posts per page
page_size = {page_size}

# Per-request timeout in seconds
request_timeout_secs = {timeout}

# Theme: {themes}
theme = {theme}

# Placeholder photo for each post ({{seed}} and {{size}} are substituted)
[image]
url_template = {template}
seed_bound = {seed_bound}
size = {size}

# Local demo server (run with --demo)
[demo]
bind_addr = {demo_bind}
total_posts = {demo_total}
latency_ms = {demo_latency}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = {log_level}
file_enabled = {file_enabled}
file_dir = {file_dir}
file_rotation = {file_rotation}
file_prefix = {file_prefix}
"#,
            base_url = toml_string(&self.base_url),
            page_size = self.page_size,
            timeout = self.request_timeout_secs,
            themes = crate::tui::theme::Theme::list_available().join(", "),
            theme = toml_string(&self.theme),
            template = toml_string(&self.image.url_template),
            seed_bound = self.image.seed_bound,
            size = self.image.size,
            demo_bind = toml_string(&self.demo.bind_addr.to_string()),
            demo_total = self.demo.total_posts,
            demo_latency = self.demo.latency_ms,
            log_level = toml_string(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            file_rotation = toml_string(self.logging.file_rotation.as_str()),
            file_prefix = toml_string(&self.logging.file_prefix),
        )
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), &|key| std::env::var(key).ok())
    }

    /// Combine a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Base URL: env > file > default
        let base_url = env("POSTSCROLL_BASE_URL")
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        // Page size: env > file > default (zero is rejected)
        let page_size = env("POSTSCROLL_PAGE_SIZE")
            .and_then(|v| match v.parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    eprintln!("Warning: ignoring invalid POSTSCROLL_PAGE_SIZE {:?}", v);
                    None
                }
            })
            .or(file.page_size)
            .unwrap_or(defaults.page_size);
        let page_size = if page_size == 0 {
            eprintln!(
                "Warning: page_size must be positive, using {}",
                defaults.page_size
            );
            defaults.page_size
        } else {
            page_size
        };

        // Request timeout: file > default (zero would fail every request)
        let request_timeout_secs = match file.request_timeout_secs {
            Some(0) => {
                eprintln!(
                    "Warning: request_timeout_secs must be positive, using {}",
                    defaults.request_timeout_secs
                );
                defaults.request_timeout_secs
            }
            Some(secs) => secs,
            None => defaults.request_timeout_secs,
        };

        // Theme: env > file > default
        let theme = env("POSTSCROLL_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // TUI toggle and demo mode: env only (runtime flags)
        let enable_tui = env("POSTSCROLL_NO_TUI")
            .map(|v| !flag_set(&v))
            .unwrap_or(defaults.enable_tui);
        let demo_mode = env("POSTSCROLL_DEMO")
            .map(|v| flag_set(&v))
            .unwrap_or(defaults.demo_mode);

        Self {
            base_url,
            page_size,
            request_timeout_secs,
            enable_tui,
            demo_mode,
            headless_pages: defaults.headless_pages,
            theme,
            image: ImageConfig::from_file(file.image.unwrap_or_default()),
            demo: DemoConfig::from_file(file.demo.unwrap_or_default()),
            logging: LoggingConfig::from_file(file.logging.unwrap_or_default()),
        }
    }
}
