// File: src/config.rs
// Purpose: Configuration parsing from unnexted.toml plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::document::DocumentShell;
use unnexted_router::TableOptions;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub document: DocumentConfig,
}

/// Deployment mode; decides how the client script is cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_production(self) -> bool {
        self == Mode::Production
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory scanned for page files
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Page file extension without the dot (default: "rs")
    #[serde(default = "default_page_extension")]
    pub page_extension: String,

    /// Page module rendered for unmatched paths
    #[serde(default = "default_not_found_page")]
    pub not_found_page: Option<String>,

    /// Try static routes before dynamic ones (default: true)
    #[serde(default = "default_true")]
    pub rank_static_first: bool,
}

/// Client bundle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL the bootstrap script is served from
    #[serde(default = "default_script_path")]
    pub script_path: String,

    /// Built bundle on disk
    #[serde(default = "default_bundle_path")]
    pub bundle_path: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Document shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Id of the element the page markup is rendered into
    #[serde(default = "default_root_id")]
    pub root_id: String,

    #[serde(default = "default_lang")]
    pub lang: String,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_pages_dir() -> String {
    "crates/unnexted-server/src/pages".to_string()
}

fn default_page_extension() -> String {
    unnexted_router::DEFAULT_EXTENSION.to_string()
}

fn default_not_found_page() -> Option<String> {
    Some("404.rs".to_string())
}

fn default_script_path() -> String {
    "/client.js".to_string()
}

fn default_bundle_path() -> String {
    "dist/client.js".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_title() -> String {
    "Unnexted App".to_string()
}

fn default_root_id() -> String {
    "root".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            page_extension: default_page_extension(),
            not_found_page: default_not_found_page(),
            rank_static_first: true,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            script_path: default_script_path(),
            bundle_path: default_bundle_path(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            root_id: default_root_id(),
            lang: default_lang(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./unnexted.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("unnexted.toml")
    }

    /// Load from `UNNEXTED_CONFIG` (or ./unnexted.toml) and apply environment overrides
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("UNNEXTED_CONFIG").unwrap_or_else(|_| "unnexted.toml".to_string());
        Self::load(path)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PORT`, `HOST` and `UNNEXTED_ENV` overrides read through `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {:?}", port))?;
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }

        if let Some(env) = lookup("UNNEXTED_ENV") {
            self.mode = if env.eq_ignore_ascii_case("production") {
                Mode::Production
            } else {
                Mode::Development
            };
        }

        Ok(self)
    }

    /// Route table options derived from `[routing]`
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            extension: self.routing.page_extension.clone(),
            rank_static_first: self.routing.rank_static_first,
            excluded: self.routing.not_found_page.iter().cloned().collect(),
        }
    }

    /// Document shell derived from `[document]` and `[client]`
    pub fn document_shell(&self) -> DocumentShell {
        DocumentShell {
            default_title: self.document.default_title.clone(),
            root_id: self.document.root_id.clone(),
            lang: self.document.lang.clone(),
            script_path: self.client.script_path.clone(),
        }
    }

    /// Listen address as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
