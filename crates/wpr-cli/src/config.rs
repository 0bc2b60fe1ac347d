//! TOML configuration.
//!
//! Looked up at `--config` or `<platform config dir>/wpr/config.toml`. Every
//! section and key is optional; missing values fall back to defaults and CLI
//! flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wpr_aggregate::DEFAULT_TOP_N;
use wpr_ingest::{DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT};
use wpr_map::{Candidates, MappingStrategy, PositionalLayout, parse_column_letter};
use wpr_model::DemandMode;

const APP_NAME: &str = "wpr";
const CONFIG_FILENAME: &str = "config.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnsConfig,
    pub source: SourceConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Name,
    Positional,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub strategy: StrategyKind,
    pub candidates: Candidates,
    pub positional: Option<PositionalConfig>,
}

/// A column given as a zero-based index or a spreadsheet letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Index(usize),
    Letter(String),
}

impl ColumnSpec {
    pub fn index(&self) -> Result<usize> {
        match self {
            Self::Index(index) => Ok(*index),
            Self::Letter(letter) => Ok(parse_column_letter(letter)?),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalConfig {
    pub date: ColumnSpec,
    pub collaborator: ColumnSpec,
    pub count: ColumnSpec,
    #[serde(default, rename = "type")]
    pub kind: Option<ColumnSpec>,
    #[serde(default)]
    pub locality: Option<ColumnSpec>,
    #[serde(default)]
    pub demand: Option<ColumnSpec>,
}

impl PositionalConfig {
    pub fn layout(&self) -> Result<PositionalLayout> {
        let optional = |spec: &Option<ColumnSpec>| spec.as_ref().map(ColumnSpec::index).transpose();
        let mut layout = PositionalLayout::new(
            self.date.index()?,
            self.collaborator.index()?,
            self.count.index()?,
        );
        layout.kind = optional(&self.kind)?;
        layout.locality = optional(&self.locality)?;
        layout.demand = optional(&self.demand)?;
        Ok(layout)
    }
}

impl ColumnsConfig {
    pub fn strategy(&self) -> Result<MappingStrategy> {
        match self.strategy {
            StrategyKind::Name => Ok(MappingStrategy::ByName(self.candidates.clone())),
            StrategyKind::Positional => {
                let Some(positional) = &self.positional else {
                    bail!("columns.strategy is \"positional\" but [columns.positional] is missing");
                };
                Ok(MappingStrategy::Positional(positional.layout()?))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path or share link used when no source argument is given.
    pub location: Option<String>,
    pub sheet: Option<String>,
    pub timeout_secs: u64,
    /// Lifetime of a loaded table in the cache. One `wpr report` run loads
    /// once; the TTL matters to hosts that keep a cache across runs.
    pub cache_ttl_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: None,
            sheet: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub chart_top_n: usize,
    pub support_top_n: usize,
    pub demand_mode: DemandMode,
    /// Relative export paths are resolved against this directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_top_n: DEFAULT_TOP_N,
            support_top_n: DEFAULT_TOP_N,
            demand_mode: DemandMode::default(),
            output_dir: None,
        }
    }
}

impl ReportConfig {
    pub fn output_path(&self, path: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the explicit file, or the per-user file when none is given.
    ///
    /// An explicit file must exist and parse. The per-user file is optional;
    /// when it is broken a warning is logged and defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let config = Self::from_toml(&content)
                .with_context(|| format!("parse config {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded config");
                    Ok(config)
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "invalid config, using defaults");
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => {
                warn!(path = %path.display(), %error, "unreadable config, using defaults");
                Ok(Self::default())
            }
        }
    }
}
