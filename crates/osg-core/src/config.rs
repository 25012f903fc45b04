use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.osg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsgConfig {
    pub input: String,
    pub output: OutputConfig,
    pub cache: CacheConfig,
}

impl Default for OsgConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: OutputConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Serialization format for a resolved graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Where and how `osg resolve` writes the graph.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Write to this file instead of stdout.
    pub path: Option<String>,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            path: None,
            pretty: true,
        }
    }
}

/// Graph cache options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Store every resolved graph in the cache.
    pub enabled: bool,
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: ".osg-cache".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".osg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OsgConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Some(OsgConfig::default()));
    }
    let config: OsgConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# osg configuration
input: openapi.yaml

output:
  format: json          # json | yaml
  # path: graph.json    # write to a file instead of stdout
  pretty: true

cache:
  enabled: false        # keep the last resolved graph for `osg cache show`
  dir: .osg-cache
"#
}
