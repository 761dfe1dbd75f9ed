//! Configuration for the Graphlens CLI.
//!
//! Loaded from TOML. The file is looked up in this order:
//!
//! 1. `--config <path>`
//! 2. `GRAPHLENS_CONFIG`
//! 3. `<platform config dir>/graphlens/config.toml`
//!
//! A missing file at the default location means built-in defaults; a missing
//! file that was asked for explicitly is an error.

use graphlens_core::{Error, Result};
use graphlens_graph::{GraphStyle, RenderOptions};
use graphlens_search::{HttpSearchEngine, ReplaySearchEngine, SearchEngine};
use graphlens_tables::KnowledgeTables;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GRAPHLENS_CONFIG";

const PROJECT_NAME: &str = "graphlens";

// ============================================================================
// Sections
// ============================================================================

/// Where the knowledge tables live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory searched for `entities.*`, `relationships.*` and
    /// `community_reports.*`.
    pub dir: PathBuf,
    /// Explicit entity table, overrides `dir`.
    pub entities: Option<PathBuf>,
    /// Explicit relationship table, overrides `dir`.
    pub relationships: Option<PathBuf>,
    /// Explicit community report table.
    pub reports: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            entities: None,
            relationships: None,
            reports: None,
        }
    }
}

/// Which search service to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBackend {
    /// POST to `search.endpoint`.
    #[default]
    Http,
    /// Replay `search.replay_file`.
    Replay,
}

/// Search service settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Backend kind.
    pub backend: SearchBackend,
    /// Endpoint URL for the HTTP backend.
    pub endpoint: String,
    /// Name of an environment variable holding a bearer token.
    pub token_env: Option<String>,
    /// Recorded response for the replay backend.
    pub replay_file: Option<PathBuf>,
    /// Search timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackend::Http,
            endpoint: "http://127.0.0.1:8000/search".to_string(),
            token_env: None,
            replay_file: None,
            timeout_secs: 300,
        }
    }
}

/// Graph document settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default output path.
    pub output: PathBuf,
    /// CSS height of the graph area.
    pub height: String,
    /// CSS width of the graph area.
    pub width: String,
    /// Draw arrowheads.
    pub directed: bool,
    /// Colors, shape, size and edge-width divisor.
    pub style: GraphStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            output: PathBuf::from("graph.html"),
            height: options.height,
            width: options.width,
            directed: options.directed,
            style: options.style,
        }
    }
}

impl RenderConfig {
    /// Document options for this section.
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            height: self.height.clone(),
            width: self.width.clone(),
            directed: self.directed,
            style: self.style.clone(),
            ..RenderOptions::default()
        }
    }
}

// ============================================================================
// GraphlensConfig
// ============================================================================

/// Top-level CLI configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphlensConfig {
    /// Knowledge tables.
    pub data: DataConfig,
    /// Search service.
    pub search: SearchConfig,
    /// Graph document.
    pub render: RenderConfig,
}

impl GraphlensConfig {
    /// Project name used in paths and messages.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// `<platform config dir>/graphlens/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve the config path from the flag, then the environment, then the
    /// platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, std::env::var(CONFIG_ENV).ok())
    }

    /// [`resolve_config_path`](Self::resolve_config_path) with the
    /// environment value passed in.
    pub fn resolve_config_path_with(
        explicit: Option<&str>,
        env_value: Option<String>,
    ) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Load the configuration.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly requested file is missing, or if any file
    /// that exists cannot be parsed.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let requested =
            explicit.is_some() || std::env::var(CONFIG_ENV).is_ok_and(|v| !v.is_empty());
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) if requested => Err(Error::config(format!(
                "Config file {} does not exist",
                path.display()
            ))),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Load the knowledge tables named by the `[data]` section.
    pub fn load_tables(&self) -> Result<KnowledgeTables> {
        match (&self.data.entities, &self.data.relationships) {
            (Some(entities), Some(relationships)) => {
                KnowledgeTables::load(entities, relationships, self.data.reports.as_deref())
            }
            (None, None) => {
                let mut tables = KnowledgeTables::load_dir(&self.data.dir)?;
                if let Some(reports) = &self.data.reports {
                    tables = tables.with_reports(graphlens_tables::load_table(reports)?);
                }
                Ok(tables)
            }
            _ => Err(Error::config(
                "data.entities and data.relationships must be set together",
            )),
        }
    }

    /// Build the search engine named by the `[search]` section.
    pub fn search_engine(&self) -> Result<Arc<dyn SearchEngine>> {
        match self.search.backend {
            SearchBackend::Http => {
                let mut engine = HttpSearchEngine::new(&self.search.endpoint);
                if let Some(var) = &self.search.token_env {
                    let token = std::env::var(var).map_err(|_| {
                        Error::config(format!("search.token_env names unset variable {var}"))
                    })?;
                    engine = engine.with_bearer_token(token);
                }
                Ok(Arc::new(engine))
            }
            SearchBackend::Replay => {
                let path = self.search.replay_file.as_ref().ok_or_else(|| {
                    Error::config("search.replay_file is required for the replay backend")
                })?;
                Ok(Arc::new(ReplaySearchEngine::new(path)))
            }
        }
    }

    /// The search timeout, if enabled.
    pub fn search_timeout(&self) -> Option<Duration> {
        (self.search.timeout_secs > 0).then(|| Duration::from_secs(self.search.timeout_secs))
    }
}
