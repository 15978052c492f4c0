use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the optional configuration file in the working directory.
pub const CONFIG_FILE: &str = "helm2bundle.toml";

/// helm2bundle.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleConfig {
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Base image the bundle image is built from
    #[serde(default = "default_base_image")]
    pub base_image: String,
    /// Location the chart archive is copied to inside the image
    #[serde(default = "default_chart_path")]
    pub chart_path: String,
    /// Entrypoint executable provided by the base image
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            chart_path: default_chart_path(),
            entrypoint: default_entrypoint(),
        }
    }
}

impl BundleConfig {
    /// Load from helm2bundle.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %config_path.display(), "loaded configuration");
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_base_image() -> String {
    "ansibleplaybookbundle/helm-bundle-base".to_owned()
}

fn default_chart_path() -> String {
    "/opt/chart.tgz".to_owned()
}

fn default_entrypoint() -> String {
    "entrypoint.sh".to_owned()
}
