use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use listenstats::download::ActionLabels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigPeriodMode {
    Weeks,
    Months,
    Years,
    Continuous,
}

/// Overrides for the collection action labels; unset keys keep the defaults
#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct LabelConfig {
    #[serde(default)]
    pub(crate) download: Option<String>,
    #[serde(default)]
    pub(crate) downloading: Option<String>,
    #[serde(default)]
    pub(crate) remove: Option<String>,
}

impl LabelConfig {
    pub(crate) fn to_labels(&self) -> ActionLabels {
        let mut labels = ActionLabels::default();
        if let Some(download) = &self.download {
            labels.download = download.clone();
        }
        if let Some(downloading) = &self.downloading {
            labels.downloading = downloading.clone();
        }
        if let Some(remove) = &self.remove {
            labels.remove = remove.clone();
        }
        labels
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) snapshot: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    #[serde(default)]
    pub(crate) mode: Option<ConfigPeriodMode>,
    #[serde(default)]
    pub(crate) labels: LabelConfig,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/listenstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("listenstats").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("listenstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.listenstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".listenstats.toml"));
        }

        paths
    }
}
