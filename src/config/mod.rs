//! Presentation configuration: money formatting, dashboard defaults and chart
//! styling. Loaded once per process and read-only afterwards.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::currency::MoneyFormat;
use crate::errors::{ExpenseError, Result};

pub const CONFIG_ENV: &str = "EXPENSE_CORE_CONFIG";
const CONFIG_DIR_NAME: &str = "expense_core";
const CONFIG_FILE_NAME: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

static PRESENTATION: OnceCell<PresentationConfig> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresentationConfig {
    pub money: MoneyFormat,
    /// Rows shown by the dashboard's `top` view when no count is given.
    pub top_n: usize,
    pub chart_width: u32,
    pub chart_height: u32,
    pub palette: Vec<String>,
    pub trend_color: String,
    pub plain_output: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            money: MoneyFormat::default(),
            top_n: 10,
            chart_width: 960,
            chart_height: 600,
            palette: [
                "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE",
                "#85C1E2", "#F8B88B", "#ABEBC6",
            ]
            .iter()
            .map(|colour| colour.to_string())
            .collect(),
            trend_color: "#4ECDC4".into(),
            plain_output: false,
        }
    }
}

impl PresentationConfig {
    /// Palette colour for series index `idx`, cycling when exhausted.
    pub fn colour(&self, idx: usize) -> &str {
        if self.palette.is_empty() {
            return "#888888";
        }
        &self.palette[idx % self.palette.len()]
    }
}

/// Resolves and reads the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Explicit path first, then `EXPENSE_CORE_CONFIG`, then the user
    /// configuration directory.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::new(path.to_path_buf());
        }
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            return Self::new(PathBuf::from(path));
        }
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<PresentationConfig> {
        if !self.config_path.exists() {
            return Ok(PresentationConfig::default());
        }
        let data = fs::read_to_string(&self.config_path)
            .map_err(|err| ExpenseError::io(&self.config_path, err))?;
        serde_json::from_str(&data).map_err(|err| {
            ExpenseError::Config(format!("{}: {err}", self.config_path.display()))
        })
    }

    pub fn save(&self, config: &PresentationConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|err| ExpenseError::io(parent, err))?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ExpenseError::Config(err.to_string()))?;
        let tmp = self.config_path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json).map_err(|err| ExpenseError::io(&tmp, err))?;
        fs::rename(&tmp, &self.config_path).map_err(|err| ExpenseError::io(&self.config_path, err))
    }
}

/// Installs the process-wide configuration. Later calls are ignored and
/// return the configuration already in place.
pub fn install(config: PresentationConfig) -> &'static PresentationConfig {
    PRESENTATION.get_or_init(|| config)
}

/// The installed configuration, or defaults when nothing was installed.
pub fn presentation() -> &'static PresentationConfig {
    PRESENTATION.get_or_init(PresentationConfig::default)
}
