use anyhow::{Context, Result};
use impactviz_schemas::parameters::SimulationParameters;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "impactviz.yaml";

pub const SUSTREND_LOGO_URL: &str =
    "https://drive.google.com/uc?id=1vx_znPU2VfdkzeDtl91dlpw_p9mmu4dd";
pub const TTGREENFOODS_LOGO_URL: &str =
    "https://drive.google.com/uc?id=1uIQZQywjuQJz6Eokkj6dNSpBroJ8tQf8";

/// Application settings loaded from YAML. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub initial_parameters: Option<SimulationParameters>,
    pub chart: ChartConfig,
    pub logos: LogoConfig,
    /// File the settings were read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./data/exports"),
            initial_parameters: None,
            chart: ChartConfig::default(),
            logos: LogoConfig::default(),
            source: None,
        }
    }
}

/// Pixel sizes of the exported figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub overview_width: u32,
    pub overview_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 8x6 in and 20x7 in figures at 300 and 150 dpi.
        Self {
            width: 2400,
            height: 1800,
            overview_width: 3000,
            overview_height: 1050,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub sources: Vec<LogoSource>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoSource {
    pub name: String,
    pub url: String,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                LogoSource {
                    name: "sustrend".to_string(),
                    url: SUSTREND_LOGO_URL.to_string(),
                },
                LogoSource {
                    name: "ttgreenfoods".to_string(),
                    url: TTGREENFOODS_LOGO_URL.to_string(),
                },
            ],
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `path`, or from `impactviz.yaml` in the
    /// working directory when no path is given and that file exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
        config.source = Some(path);
        Ok(config)
    }
}
