//! Site constants baked in at compile time, plus the server's TOML config.

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub struct SiteConfig {
    pub name: &'static str,
    pub tagline: &'static str,
    /// Where the launch button sends its request unless a caller overrides it.
    pub api_url: &'static str,
}

pub const CONFIG: SiteConfig = SiteConfig {
    name: "Nuke Button",
    tagline: "One button, one request, one way to cancel it.",
    api_url: match option_env!("NUKE_API_URL") {
        Some(url) => url,
        None => "/api/delay?ms=3000",
    },
};

pub const DEFAULT_DELAY_MS: u64 = 1_000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

// ── TOML shape ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    delay: Option<DelaySection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DelaySection {
    #[serde(default = "default_delay_ms")]
    default_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    max_ms: u64,
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

// ── Public config ─────────────────────────────────────────────────────────────

/// How `/api/delay` behaves when the query leaves things out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySettings {
    pub default_ms: u64,
    /// Upper bound applied to any requested delay.
    pub max_ms: u64,
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            default_ms: DEFAULT_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub delay: DelaySettings,
}

impl ServerConfig {
    /// Environment variable naming the config file.
    pub const PATH_ENV: &'static str = "NUKE_CONFIG";
    pub const DEFAULT_PATH: &'static str = "nuke.toml";

    /// Load `$NUKE_CONFIG` (or `./nuke.toml`); defaults when the file is absent.
    pub fn discover() -> Result<Self> {
        let path = std::env::var(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(Self::DEFAULT_PATH));

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(content)?;

        let delay = match file.delay {
            Some(section) => {
                ensure!(section.max_ms > 0, "delay.max_ms must be greater than zero");
                DelaySettings {
                    default_ms: section.default_ms.min(section.max_ms),
                    max_ms: section.max_ms,
                }
            }
            None => DelaySettings::default(),
        };

        Ok(Self { delay })
    }
}
